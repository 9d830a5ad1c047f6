//! 生成客户端 - 业务能力层
//!
//! 只负责把一次生成请求发给文本生成后端并取回原始文本，不解析内容
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务（火山方舟、DeepSeek 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::question::GenerationRequest;

/// 生成客户端
///
/// 职责：
/// - 单次调用生成后端，失败不重试，由编排层决定跳过该批次
/// - 不解析返回文本（交给 response_parser）
/// - 不关心批次顺序与编号
pub struct GenerationClient {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
}

impl GenerationClient {
    /// 创建新的生成客户端
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.llm_api_key.clone())
            .with_api_base(config.llm_api_base_url.clone());

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
        }
    }

    /// 发送一次生成请求，返回后端的原始文本
    ///
    /// 凭证缺失或被拒绝、网络失败、超时都会以 `BackendError` 上报
    pub async fn generate(&self, request: &GenerationRequest) -> AppResult<String> {
        debug!("调用生成后端，模型: {}", self.model_name);
        debug!(
            "用户消息长度: {} 字符，起始题号: {}",
            request.user_message.chars().count(),
            request.starting_number
        );

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(request.system_message.as_str())
            .build()
            .map_err(|e| AppError::backend_request_failed(&self.model_name, e))?;

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(request.user_message.as_str())
            .build()
            .map_err(|e| AppError::backend_request_failed(&self.model_name, e))?;

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(self.temperature)
            .build()
            .map_err(|e| AppError::backend_request_failed(&self.model_name, e))?;

        let response = self.client.chat().create(chat_request).await.map_err(|e| {
            warn!("生成后端调用失败: {}", e);
            AppError::backend_request_failed(&self.model_name, e)
        })?;

        let content = response
            .choices
            .first()
            .ok_or_else(|| AppError::backend_empty_response(&self.model_name))?
            .message
            .content
            .clone()
            .ok_or_else(|| AppError::backend_empty_content(&self.model_name))?;

        if content.trim().is_empty() {
            return Err(AppError::backend_empty_content(&self.model_name));
        }

        debug!("生成后端调用成功，返回 {} 字符", content.chars().count());

        Ok(content)
    }
}
