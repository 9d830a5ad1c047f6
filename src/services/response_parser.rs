//! 响应解析与校验 - 业务能力层
//!
//! 生成后端返回的是自由文本：JSON 前后可能混着说明文字，
//! 记录本身也不保证每条都合规。本模块分两层防御：
//! 先定位 JSON 数组（定位失败整批为空），再逐条解码校验（坏记录单条丢弃）。
//! 对外永不报错，失败只体现为空结果加告警日志，由编排层决定是否继续。

use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::MalformedResponseError;
use crate::models::question::{ParsedQuestion, QuestionType};

/// 合法的选项标签范围
const OPTION_LABELS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// 多选题正确答案数量范围
const MULTI_ANSWER_MIN: usize = 2;
const MULTI_ANSWER_MAX: usize = 4;

/// 定位 JSON 数组用的模式：锚定在「数组开头紧跟对象」上
const PAYLOAD_PATTERN: &str = r"(?s)\[\s*\{.*\}\s*\]";

/// 后端返回的单条题目记录（宽松解码，字段逐条校验）
///
/// number 和 category 后端会随意填写，仅作参考，解码时直接忽略
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(rename = "type")]
    question_type: String,
    #[serde(default)]
    question: String,
    #[serde(default)]
    options: BTreeMap<String, String>,
    #[serde(default)]
    answer: String,
    #[serde(default)]
    explanation: String,
}

/// 从原始响应中解析出校验通过的题目列表
///
/// - 定位失败 / 整体解码失败：返回空列表并记录诊断
/// - 单条记录不合规：仅丢弃该条，不影响同批其他记录
/// - category 一律以 expected_category 为准，后端输出不作数
pub fn parse_questions(raw: &str, expected_category: &str) -> Vec<ParsedQuestion> {
    let payload = match locate_payload(raw) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("响应不可解析（{}），本批次跳过", e);
            return Vec::new();
        }
    };

    let records: Vec<serde_json::Value> = match serde_json::from_str(&payload) {
        Ok(records) => records,
        Err(e) => {
            let e = MalformedResponseError::from(e);
            warn!("响应不可解析（{}），本批次跳过", e);
            return Vec::new();
        }
    };

    let total = records.len();
    let mut questions = Vec::new();
    for (index, record) in records.into_iter().enumerate() {
        match validate_record(record, expected_category) {
            Ok(question) => questions.push(question),
            Err(reason) => warn!("第 {} 条记录不合规，已丢弃: {}", index + 1, reason),
        }
    }

    if questions.len() < total {
        warn!("本批次 {} 条记录中有 {} 条被丢弃", total, total - questions.len());
    }

    questions
}

/// 在自由文本中定位形如 [{ ... }] 的 JSON 数组
///
/// 先用贪婪正则匹配（与提示词约定的返回格式一致）；
/// 当匹配段落无法解码时（正文里混入了多余的方括号会让贪婪匹配越界），
/// 退回到带字符串感知的括号配对扫描。
fn locate_payload(raw: &str) -> Result<String, MalformedResponseError> {
    if let Ok(re) = Regex::new(PAYLOAD_PATTERN) {
        if let Some(m) = re.find(raw) {
            let candidate = m.as_str();
            if serde_json::from_str::<serde_json::Value>(candidate).is_ok() {
                return Ok(candidate.to_string());
            }
            debug!("正则匹配段落无法解码，改用括号配对扫描");
        }
    }

    scan_balanced_array(raw).ok_or(MalformedResponseError::PayloadNotFound)
}

/// 从每个 '[' 起做括号配对扫描，返回第一个能解码成对象数组的段落
fn scan_balanced_array(raw: &str) -> Option<String> {
    for (start, _) in raw.char_indices().filter(|&(_, c)| c == '[') {
        if let Some(candidate) = balanced_slice(&raw[start..]) {
            if candidate.contains('{')
                && serde_json::from_str::<Vec<serde_json::Value>>(candidate).is_ok()
            {
                return Some(candidate.to_string());
            }
        }
    }
    None
}

/// 从文本开头的括号起，找到配对闭合处并返回该片段
///
/// 跳过字符串字面量内部的括号和转义字符
fn balanced_slice(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '[' | '{' if !in_string => depth += 1,
            ']' | '}' if !in_string => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[..i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// 校验单条记录，不合规时返回丢弃原因
fn validate_record(
    record: serde_json::Value,
    expected_category: &str,
) -> Result<ParsedQuestion, String> {
    let raw: RawQuestion =
        serde_json::from_value(record).map_err(|e| format!("字段缺失或类型不符: {}", e))?;

    let question_type = QuestionType::parse(&raw.question_type)
        .ok_or_else(|| format!("未知题型: {:?}", raw.question_type))?;

    let question = raw.question.trim().to_string();
    if question.is_empty() {
        return Err("题目内容为空".to_string());
    }

    // 选项标签统一成大写，必须落在 A-F 范围内
    let mut options = BTreeMap::new();
    for (label, text) in raw.options {
        let label = label.trim().to_uppercase();
        if !OPTION_LABELS.contains(&label.as_str()) {
            return Err(format!("选项标签超出 A-F 范围: {:?}", label));
        }
        options.insert(label, text);
    }
    if options.is_empty() {
        return Err("选项为空".to_string());
    }

    let answer = normalize_answer(&raw.answer);
    if answer.is_empty() {
        return Err("答案为空".to_string());
    }

    for label in answer.chars() {
        if !options.contains_key(label.to_string().as_str()) {
            return Err(format!("答案引用了不存在的选项: {}", label));
        }
    }

    let answer_count = answer.chars().count();
    match question_type {
        QuestionType::SingleChoice => {
            if answer_count != 1 {
                return Err(format!("单选题答案必须恰好一个，实际 {} 个", answer_count));
            }
        }
        QuestionType::MultipleChoice => {
            if !(MULTI_ANSWER_MIN..=MULTI_ANSWER_MAX).contains(&answer_count) {
                return Err(format!(
                    "多选题答案必须在 {}-{} 个之间，实际 {} 个",
                    MULTI_ANSWER_MIN, MULTI_ANSWER_MAX, answer_count
                ));
            }
            if answer_count >= options.len() {
                return Err("多选题答案不能覆盖全部选项".to_string());
            }
        }
    }

    Ok(ParsedQuestion {
        category: expected_category.to_string(),
        question_type,
        question,
        options,
        answer,
        explanation: raw.explanation.trim().to_string(),
    })
}

/// 规范化答案标签串：去空白和分隔符、大写、去重、按字母排序
fn normalize_answer(answer: &str) -> String {
    let mut labels: Vec<char> = answer
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();
    labels.sort_unstable();
    labels.dedup();
    labels.into_iter().collect()
}
