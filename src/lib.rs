//! # Question Gen
//!
//! 一个把培训文档批量转换成选择题并导出 Excel 的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的三层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 数据类型与加载器
//! - `docx_loader` - 文档内容提取（docx / 纯文本），单个文件失败不影响整轮
//! - `AggregateResult` - 整轮运行的题目聚合，题号的唯一来源
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个批次
//! - `prompt_builder` - 生成请求构建能力（纯函数）
//! - `GenerationClient` - 文本生成能力（单次调用，不重试）
//! - `response_parser` - 响应定位、解码与逐条校验能力
//! - `excel_exporter` - Excel 导出能力
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 整轮运行编排，持有聚合结果
//! - `orchestrator/document_processor` - 单个文档的批次循环与编号分配
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::{BatchQuotas, Config};
pub use error::{
    AppError, AppResult, BackendError, DocumentError, ExportError, MalformedResponseError,
};
pub use models::aggregate::AggregateResult;
pub use models::question::{
    GenerationRequest, ParsedQuestion, QuestionType, QuizItem, SourceDocument,
};
pub use orchestrator::App;
pub use services::GenerationClient;
