//! 单个文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责单个文档的全部批次生成，是文档级别的编排器。
//!
//! 1. **批次循环**：按配置的批次数依次生成
//! 2. **编号分配**：起始题号取自聚合结果的运行计数，按实际入库数推进
//! 3. **失败隔离**：单个批次失败只跳过该批，不中断文档，也不中断整轮
//! 4. **结果折叠**：校验通过的题目编号后并入聚合结果

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::aggregate::AggregateResult;
use crate::models::question::{ParsedQuestion, QuizItem, SourceDocument};
use crate::services::generation_client::GenerationClient;
use crate::services::{prompt_builder, response_parser};
use crate::utils::logging::truncate_text;

/// 处理单个文档的所有批次
///
/// 返回本文档实际新增的题目数量。请求数量和实际入库数量可能不同，
/// 运行计数只按实际入库数推进。
pub async fn process_document(
    client: &GenerationClient,
    document: &SourceDocument,
    config: &Config,
    aggregate: &mut AggregateResult,
) -> Result<usize> {
    log_document_start(document, config.batch_count);

    let quotas = config.batch_quotas();
    let mut added_total = 0usize;

    for batch_index in 0..config.batch_count {
        let batch_num = batch_index + 1;
        let starting_number = aggregate.next_number();

        let request =
            prompt_builder::build(&document.content, &document.category, quotas, starting_number);

        let raw = match client.generate(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("[{}] 第 {} 批生成失败: {}", document.category, batch_num, e);
                continue;
            }
        };

        let parsed = response_parser::parse_questions(&raw, &document.category);
        if parsed.is_empty() {
            warn!("[{}] 第 {} 批未解析出任何题目", document.category, batch_num);
            continue;
        }

        let items = number_questions(starting_number, parsed);
        let added = items.len();
        aggregate.extend(items);
        added_total += added;

        log_batch_complete(&document.category, batch_num, added, quotas.total());
    }

    log_document_complete(&document.category, added_total);

    Ok(added_total)
}

/// 按起始题号给校验通过的题目顺序编号
fn number_questions(starting_number: u32, parsed: Vec<ParsedQuestion>) -> Vec<QuizItem> {
    parsed
        .into_iter()
        .enumerate()
        .map(|(offset, question)| QuizItem::from((starting_number + offset as u32, question)))
        .collect()
}

// ========== 日志辅助函数 ==========

fn log_document_start(document: &SourceDocument, batch_count: usize) {
    info!("\n{}", "─".repeat(60));
    info!("处理文件: {}", document.file_path);
    info!(
        "[{}] 内容长度 {} 字符，计划 {} 批",
        document.category,
        document.content.chars().count(),
        batch_count
    );
    info!(
        "[{}] 内容预览: {}",
        document.category,
        truncate_text(&document.content, 50)
    );
}

fn log_batch_complete(category: &str, batch_num: usize, added: usize, requested: usize) {
    info!(
        "[{}] 已完成第 {} 批，生成了 {}/{} 道题目",
        category, batch_num, added, requested
    );
}

fn log_document_complete(category: &str, added_total: usize) {
    info!("[{}] ✅ 文档处理完成，共生成 {} 道题目\n", category, added_total);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionType;
    use std::collections::BTreeMap;

    fn make_parsed(question: &str) -> ParsedQuestion {
        ParsedQuestion {
            category: "test".to_string(),
            question_type: QuestionType::SingleChoice,
            question: question.to_string(),
            options: BTreeMap::from([
                ("A".to_string(), "甲".to_string()),
                ("B".to_string(), "乙".to_string()),
            ]),
            answer: "A".to_string(),
            explanation: String::new(),
        }
    }

    #[test]
    fn test_number_questions_sequential_from_start() {
        let parsed = vec![make_parsed("一"), make_parsed("二"), make_parsed("三")];
        let items = number_questions(26, parsed);

        let numbers: Vec<u32> = items.iter().map(|item| item.number).collect();
        assert_eq!(numbers, vec![26, 27, 28]);
    }

    #[test]
    fn test_number_questions_keeps_content_order() {
        let parsed = vec![make_parsed("一"), make_parsed("二")];
        let items = number_questions(1, parsed);
        assert_eq!(items[0].question, "一");
        assert_eq!(items[1].question, "二");
    }
}
