//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文档处理器
//! - 管理应用生命周期（初始化、运行、导出）
//! - 批量加载文档（Vec<SourceDocument>）
//! - 持有整轮运行的 AggregateResult
//! - 输出全局统计信息
//!
//! ### `document_processor` - 单个文档处理器
//! - 按配置的批次数循环生成
//! - 从聚合结果领取起始题号，给校验通过的题目编号
//! - 单个批次失败只跳过该批
//! - 输出单个文档的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<SourceDocument>)
//!     ↓
//! document_processor (处理单个文档的批次循环)
//!     ↓
//! services (能力层：prompt / generate / parse / export)
//!     ↓
//! models (数据层：题目、聚合结果、加载器)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管整轮，document_processor 管单个文档
//! 2. **状态隔离**：只有编排层持有可变的 AggregateResult
//! 3. **失败隔离**：文档级和批次级失败都不越过本层
//! 4. **无业务逻辑**：只做调度、编号和统计，不做内容校验

pub mod batch_processor;
pub mod document_processor;

// 重新导出主要类型
pub use batch_processor::App;
pub use document_processor::process_document;
