use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::BatchQuotas;

/// 题型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    /// 单选题
    #[serde(rename = "单选题")]
    SingleChoice,
    /// 多选题
    #[serde(rename = "多选题")]
    MultipleChoice,
}

impl QuestionType {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "单选题",
            QuestionType::MultipleChoice => "多选题",
        }
    }

    /// 从后端返回的文本解析题型（容忍前后空白）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "单选题" => Some(QuestionType::SingleChoice),
            "多选题" => Some(QuestionType::MultipleChoice),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 校验通过、尚未编号的题目
///
/// 由 response_parser 产出；category 已用文档分类覆盖，后端输出不作数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuestion {
    pub category: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    /// 选项标签（A-F）到选项内容的有序映射
    pub options: BTreeMap<String, String>,
    /// 规范化后的答案标签串，如 "A" 或 "ABD"
    pub answer: String,
    pub explanation: String,
}

/// 一道最终入库的题目
///
/// 题号由编排层统一分配，全程唯一且递增，入库后不再改动
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    pub number: u32,
    pub category: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    pub options: BTreeMap<String, String>,
    pub answer: String,
    pub explanation: String,
}

impl From<(u32, ParsedQuestion)> for QuizItem {
    fn from((number, question): (u32, ParsedQuestion)) -> Self {
        Self {
            number,
            category: question.category,
            question_type: question.question_type,
            question: question.question,
            options: question.options,
            answer: question.answer,
            explanation: question.explanation,
        }
    }
}

/// 一次批次生成请求
///
/// 由 prompt_builder 构建，generation_client 立即消费，不保留
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub category: String,
    pub quotas: BatchQuotas,
    pub starting_number: u32,
    pub system_message: String,
    pub user_message: String,
}

/// 一个待出题的源文档
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// 分类，取自文件名（去扩展名）
    pub category: String,
    /// 提取出的纯文本内容
    pub content: String,
    /// 源文件路径
    pub file_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_parse() {
        assert_eq!(QuestionType::parse("单选题"), Some(QuestionType::SingleChoice));
        assert_eq!(QuestionType::parse("多选题"), Some(QuestionType::MultipleChoice));
        assert_eq!(QuestionType::parse(" 单选题 "), Some(QuestionType::SingleChoice));
        assert_eq!(QuestionType::parse("判断题"), None);
        assert_eq!(QuestionType::parse(""), None);
    }

    #[test]
    fn test_question_type_name() {
        assert_eq!(QuestionType::SingleChoice.name(), "单选题");
        assert_eq!(QuestionType::MultipleChoice.name(), "多选题");
    }

    #[test]
    fn test_quiz_item_from_parsed() {
        let parsed = ParsedQuestion {
            category: "phishing".to_string(),
            question_type: QuestionType::SingleChoice,
            question: "以下哪种行为最可能是钓鱼攻击？".to_string(),
            options: BTreeMap::from([
                ("A".to_string(), "点击陌生邮件中的链接".to_string()),
                ("B".to_string(), "定期修改密码".to_string()),
            ]),
            answer: "A".to_string(),
            explanation: "钓鱼攻击通常通过诱导点击实施".to_string(),
        };

        let item = QuizItem::from((7, parsed.clone()));
        assert_eq!(item.number, 7);
        assert_eq!(item.category, parsed.category);
        assert_eq!(item.answer, "A");
    }
}
