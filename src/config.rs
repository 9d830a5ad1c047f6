/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 培训文档存放目录
    pub docs_folder: String,
    /// 输出的Excel文件路径
    pub output_file: String,
    /// 每个文档生成的批次数
    pub batch_count: usize,
    /// 每批单选题数量
    pub single_choice_per_batch: usize,
    /// 每批多选题数量
    pub multiple_choice_per_batch: usize,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_folder: "docs".to_string(),
            output_file: "security_questions.xlsx".to_string(),
            batch_count: 1,
            single_choice_per_batch: 20,
            multiple_choice_per_batch: 5,
            llm_api_key: String::new(),
            llm_api_base_url: "https://ark.cn-beijing.volces.com/api/v3".to_string(),
            llm_model_name: "deepseek-v3-241226".to_string(),
            llm_temperature: 0.7,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            docs_folder: std::env::var("DOCS_FOLDER").unwrap_or(default.docs_folder),
            output_file: std::env::var("OUTPUT_FILE").unwrap_or(default.output_file),
            batch_count: std::env::var("BATCH_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.batch_count),
            single_choice_per_batch: std::env::var("SINGLE_CHOICE_PER_BATCH").ok().and_then(|v| v.parse().ok()).unwrap_or(default.single_choice_per_batch),
            multiple_choice_per_batch: std::env::var("MULTIPLE_CHOICE_PER_BATCH").ok().and_then(|v| v.parse().ok()).unwrap_or(default.multiple_choice_per_batch),
            llm_api_key: std::env::var("ARK_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_temperature),
        }
    }

    /// 当前配置下每批的题型配额
    pub fn batch_quotas(&self) -> BatchQuotas {
        BatchQuotas {
            single_choice: self.single_choice_per_batch,
            multiple_choice: self.multiple_choice_per_batch,
        }
    }
}

/// 每批题型配额
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchQuotas {
    /// 单选题数量
    pub single_choice: usize,
    /// 多选题数量
    pub multiple_choice: usize,
}

impl BatchQuotas {
    /// 每批题目总数
    pub fn total(&self) -> usize {
        self.single_choice + self.multiple_choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_batch_plan() {
        let config = Config::default();
        assert_eq!(config.batch_count, 1);
        assert_eq!(config.batch_quotas().single_choice, 20);
        assert_eq!(config.batch_quotas().multiple_choice, 5);
        assert_eq!(config.batch_quotas().total(), 25);
    }

    #[test]
    fn test_default_output_file() {
        let config = Config::default();
        assert_eq!(config.output_file, "security_questions.xlsx");
    }
}
