//! 提示词构建 - 业务能力层
//!
//! 只负责把文档内容和配额拼装成一次生成请求，不做任何 IO
//!
//! 职责：
//! - 截断文档内容到字符预算内
//! - 在提示词里写清字段名、选项标签范围、起始题号和多选题答案规则
//! - 纯函数：相同输入得到相同请求

use crate::config::BatchQuotas;
use crate::models::question::GenerationRequest;

/// 传给模型的文档内容上限（字符数），超出部分直接截断以控制 token 消耗
pub const MAX_EXCERPT_CHARS: usize = 4000;

/// 生成器的系统人设
pub const SYSTEM_MESSAGE: &str = "你是一个专业的网络安全培训题目生成器";

/// 构建一次批次生成请求
pub fn build(
    document_text: &str,
    category: &str,
    quotas: BatchQuotas,
    starting_number: u32,
) -> GenerationRequest {
    // 按字符截断，不能按字节切（内容以中文为主）
    let excerpt: String = document_text.chars().take(MAX_EXCERPT_CHARS).collect();

    let user_message = format!(
        r#"你是一个网络安全培训机构的专业出题老师。请根据以下内容，创建{single_choice}道单选题和{multiple_choice}道多选题，总共{total}道题。

文档内容:
{excerpt}

要求:
1. 题目必须基于上述内容，题目不能有xxx的比喻/类比这种类似的问题。
2. 单选题只有一个正确答案，多选题有2-4个正确答案，且不能所有选项都是正确答案
3. 每道题必须包括题目、选项A-D(最多到F)、正确答案和解析
4. 以JSON格式返回，每道题包括以下字段:
  - type: "单选题"或"多选题"
  - question: 题目内容
  - options: 包含选项A-D(或更多)的对象
  - answer: 正确答案，如"A"或"ABD"
  - explanation: 试题解析
5. 题目号从{starting_number}开始

返回格式示例:
[
  {{
    "number": {starting_number},
    "category": "{category}",
    "type": "单选题",
    "question": "题目内容",
    "options": {{
      "A": "选项A内容",
      "B": "选项B内容",
      "C": "选项C内容",
      "D": "选项D内容"
    }},
    "answer": "A",
    "explanation": "解析内容"
  }}
]

请确保JSON格式正确，不要在JSON前后添加多余说明。每道多选题的正确答案必须在2-4个之间，不能所有选项都是正确答案。"#,
        single_choice = quotas.single_choice,
        multiple_choice = quotas.multiple_choice,
        total = quotas.total(),
        excerpt = excerpt,
        starting_number = starting_number,
        category = category,
    );

    GenerationRequest {
        category: category.to_string(),
        quotas,
        starting_number,
        system_message: SYSTEM_MESSAGE.to_string(),
        user_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotas(single_choice: usize, multiple_choice: usize) -> BatchQuotas {
        BatchQuotas {
            single_choice,
            multiple_choice,
        }
    }

    #[test]
    fn test_embeds_quotas_and_starting_number() {
        let request = build("安全意识培训内容", "phishing", quotas(20, 5), 26);

        assert!(request.user_message.contains("创建20道单选题和5道多选题"));
        assert!(request.user_message.contains("总共25道题"));
        assert!(request.user_message.contains("题目号从26开始"));
        assert_eq!(request.starting_number, 26);
        assert_eq!(request.category, "phishing");
        assert_eq!(request.system_message, SYSTEM_MESSAGE);
    }

    #[test]
    fn test_truncates_to_char_limit() {
        let long_text = "安".repeat(MAX_EXCERPT_CHARS + 500);
        let request = build(&long_text, "test", quotas(1, 1), 1);

        // 截断后正好保留预算内的前缀，多字节字符不会被切坏
        let expected: String = long_text.chars().take(MAX_EXCERPT_CHARS).collect();
        assert!(request.user_message.contains(&expected));
        assert!(!request.user_message.contains(&long_text));
    }

    #[test]
    fn test_short_document_kept_whole() {
        let text = "短文档内容";
        let request = build(text, "test", quotas(2, 1), 1);
        assert!(request.user_message.contains(text));
    }

    #[test]
    fn test_deterministic() {
        let a = build("相同输入", "category", quotas(3, 2), 10);
        let b = build("相同输入", "category", quotas(3, 2), 10);
        assert_eq!(a, b);
    }
}
