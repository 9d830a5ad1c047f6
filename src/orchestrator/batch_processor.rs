//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责整轮运行的生命周期。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：创建生成客户端
//! 2. **批量加载**：扫描并加载所有待处理的文档（`Vec<SourceDocument>`）
//! 3. **顺序处理**：文档逐个处理，单个文档失败不影响整轮
//! 4. **聚合导出**：运行结束时一次性写出 Excel；没有题目就不写文件
//! 5. **全局统计**：汇总所有文档的生成结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个文档的细节
//! - **状态所有者**：AggregateResult 只在本层持有与可变
//! - **向下委托**：委托 document_processor 处理单个文档

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::aggregate::AggregateResult;
use crate::models::loaders::docx_loader;
use crate::orchestrator::document_processor;
use crate::services::excel_exporter;
use crate::services::generation_client::GenerationClient;

/// 应用主结构
pub struct App {
    config: Config,
    client: GenerationClient,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let client = GenerationClient::new(&config);

        Ok(Self { config, client })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待处理的文档
        let documents = docx_loader::load_all_documents(&self.config.docs_folder).await?;

        if documents.is_empty() {
            warn!(
                "⚠️ 在 {} 下没有找到任何培训文档，程序结束",
                self.config.docs_folder
            );
            return Ok(());
        }

        info!("✓ 找到 {} 个培训文档", documents.len());

        let mut aggregate = AggregateResult::new();
        let mut stats = ProcessingStats {
            total: documents.len(),
            ..Default::default()
        };

        // 文档逐个顺序处理，聚合结果只在本层可变
        for (index, document) in documents.iter().enumerate() {
            info!(
                "\n📄 处理第 {}/{} 个文档: {}",
                index + 1,
                stats.total,
                document.category
            );

            match document_processor::process_document(
                &self.client,
                document,
                &self.config,
                &mut aggregate,
            )
            .await
            {
                Ok(added) => {
                    stats.succeeded += 1;
                    info!("从 {} 生成了 {} 道题目", document.file_path, added);
                }
                Err(e) => {
                    stats.failed += 1;
                    error!("处理文档 {} 时出错: {}", document.file_path, e);
                }
            }
        }

        // 一轮结束后一次性导出；没有题目就不写文件
        if aggregate.is_empty() {
            warn!("未生成任何题目，跳过导出");
            return Ok(());
        }

        excel_exporter::write_excel(&self.config.output_file, aggregate.items())?;

        print_final_stats(&stats, aggregate.len(), &self.config);

        Ok(())
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    succeeded: usize,
    failed: usize,
    total: usize,
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 培训文档出题模式");
    info!("📂 文档目录: {}", config.docs_folder);
    info!(
        "📊 每文档 {} 批，每批 {} 单选 + {} 多选",
        config.batch_count, config.single_choice_per_batch, config.multiple_choice_per_batch
    );
    info!("{}", "=".repeat(60));
}

fn print_final_stats(stats: &ProcessingStats, item_count: usize, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 文档成功: {}/{}", stats.succeeded, stats.total);
    info!("❌ 文档失败: {}", stats.failed);
    info!("📝 题目总数: {}", item_count);
    info!("{}", "=".repeat(60));
    info!("\n所有题目已保存到 {}", config.output_file);
}
