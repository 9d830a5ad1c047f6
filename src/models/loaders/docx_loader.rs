//! 文档加载器
//!
//! 从文档目录提取纯文本内容：docx 取段落文本，txt/md 直接读取。
//! 单个文档加载失败只记录警告并跳过，不影响整轮运行。

use anyhow::Result;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use crate::error::{AppError, AppResult, DocumentError};
use crate::models::question::SourceDocument;

/// 支持的纯文本扩展名
const PLAIN_TEXT_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// 从单个文档文件提取纯文本并构造 SourceDocument
///
/// 分类取文件名去扩展名；内容为空视为错误，由调用方决定跳过
pub async fn load_document(path: &Path) -> AppResult<SourceDocument> {
    let display_path = path.display().to_string();
    let category = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    let content = if extension == "docx" {
        let bytes = fs::read(path)
            .await
            .map_err(|e| AppError::document_read_failed(&display_path, e))?;
        extract_docx_text(&bytes).map_err(|e| AppError::document_parse_failed(&display_path, e))?
    } else if PLAIN_TEXT_EXTENSIONS.contains(&extension.as_str()) {
        fs::read_to_string(path)
            .await
            .map_err(|e| AppError::document_read_failed(&display_path, e))?
    } else {
        return Err(AppError::Document(DocumentError::Unsupported {
            path: display_path,
        }));
    };

    if content.trim().is_empty() {
        return Err(AppError::Document(DocumentError::Empty {
            path: display_path,
        }));
    }

    Ok(SourceDocument {
        category,
        content,
        file_path: display_path,
    })
}

/// 扫描文件夹，加载所有支持的文档
pub async fn load_all_documents(folder_path: &str) -> Result<Vec<SourceDocument>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文档目录不存在: {}", folder_path);
    }

    let mut documents = Vec::new();
    let mut entries = fs::read_dir(&folder).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        // Word 的锁文件以 ~$ 开头，不是正文
        if file_name.starts_with("~$") {
            continue;
        }

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default();

        if extension == "doc" {
            warn!("暂不支持旧版 .doc 格式，跳过: {}", file_name);
            continue;
        }

        if extension != "docx" && !PLAIN_TEXT_EXTENSIONS.contains(&extension.as_str()) {
            continue;
        }

        tracing::info!("正在加载: {}", file_name);

        match load_document(&path).await {
            Ok(document) => {
                tracing::info!(
                    "成功加载 {}，内容 {} 字符",
                    document.category,
                    document.content.chars().count()
                );
                documents.push(document);
            }
            Err(e) => {
                warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(documents)
}

/// 从 docx 字节流提取段落文本，空白段落跳过，段落间以换行连接
fn extract_docx_text(bytes: &[u8]) -> Result<String, docx_rs::ReaderError> {
    let docx = docx_rs::read_docx(bytes)?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let text = paragraph_text(paragraph);
            if !text.trim().is_empty() {
                paragraphs.push(text);
            }
        }
    }

    Ok(paragraphs.join("\n"))
}

/// 拼接段落内所有 Run 的文本
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_plain_text_document() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("phishing.txt");
        tokio::fs::write(&path, "钓鱼邮件的常见特征……")
            .await
            .expect("写入测试文件失败");

        let document = load_document(&path).await.expect("加载纯文本文档失败");
        assert_eq!(document.category, "phishing");
        assert!(document.content.contains("钓鱼邮件"));
    }

    #[tokio::test]
    async fn test_empty_document_rejected() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("blank.txt");
        tokio::fs::write(&path, "   \n  ").await.expect("写入测试文件失败");

        let result = load_document(&path).await;
        assert!(matches!(
            result,
            Err(AppError::Document(DocumentError::Empty { .. }))
        ));
    }

    #[tokio::test]
    async fn test_unsupported_extension_rejected() {
        let path = Path::new("slides.pptx");
        let result = load_document(path).await;
        assert!(matches!(
            result,
            Err(AppError::Document(DocumentError::Unsupported { .. }))
        ));
    }

    #[tokio::test]
    async fn test_scan_skips_bad_files_and_continues() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        tokio::fs::write(dir.path().join("good.txt"), "正文内容")
            .await
            .expect("写入测试文件失败");
        tokio::fs::write(dir.path().join("empty.txt"), "")
            .await
            .expect("写入测试文件失败");
        // 损坏的 docx（不是合法的 zip 包）
        tokio::fs::write(dir.path().join("broken.docx"), b"not a docx")
            .await
            .expect("写入测试文件失败");
        tokio::fs::write(dir.path().join("~$lock.docx"), b"lock")
            .await
            .expect("写入测试文件失败");

        let documents = load_all_documents(&dir.path().to_string_lossy())
            .await
            .expect("扫描目录失败");

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].category, "good");
    }

    #[tokio::test]
    async fn test_missing_folder_is_fatal() {
        let result = load_all_documents("no_such_folder_anywhere").await;
        assert!(result.is_err());
    }
}
