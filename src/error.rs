use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 文档读取/提取错误
    Document(DocumentError),
    /// 生成后端调用错误
    Backend(BackendError),
    /// 响应内容不可解析（仅作诊断，不会越过编排层）
    Response(MalformedResponseError),
    /// 导出错误
    Export(ExportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Document(e) => write!(f, "文档错误: {}", e),
            AppError::Backend(e) => write!(f, "后端错误: {}", e),
            AppError::Response(e) => write!(f, "响应错误: {}", e),
            AppError::Export(e) => write!(f, "导出错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Document(e) => Some(e),
            AppError::Backend(e) => Some(e),
            AppError::Response(e) => Some(e),
            AppError::Export(e) => Some(e),
        }
    }
}

/// 文档读取/提取错误
#[derive(Debug)]
pub enum DocumentError {
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 提取文档内容失败
    ParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 文档内容为空
    Empty { path: String },
    /// 不支持的文档格式
    Unsupported { path: String },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            DocumentError::ParseFailed { path, source } => {
                write!(f, "提取文档内容失败 ({}): {}", path, source)
            }
            DocumentError::Empty { path } => write!(f, "文档内容为空: {}", path),
            DocumentError::Unsupported { path } => write!(f, "不支持的文档格式: {}", path),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::ReadFailed { source, .. } | DocumentError::ParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 生成后端调用错误
#[derive(Debug)]
pub enum BackendError {
    /// 请求失败（网络、鉴权、HTTP 错误响应）
    RequestFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回结果为空
    EmptyResponse { model: String },
    /// 返回内容为空
    EmptyContent { model: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::RequestFailed { model, source } => {
                write!(f, "生成后端调用失败 (模型: {}): {}", model, source)
            }
            BackendError::EmptyResponse { model } => {
                write!(f, "生成后端返回结果为空 (模型: {})", model)
            }
            BackendError::EmptyContent { model } => {
                write!(f, "生成后端返回内容为空 (模型: {})", model)
            }
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::RequestFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 响应内容不可解析
///
/// 只在解析层内部消费：定位失败或解码失败都会被降级为诊断日志，
/// 整个批次返回空结果，不会向上传播
#[derive(Debug)]
pub enum MalformedResponseError {
    /// 响应中找不到 JSON 数组
    PayloadNotFound,
    /// 定位到的 JSON 段落解码失败
    DecodeFailed { source: serde_json::Error },
}

impl fmt::Display for MalformedResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedResponseError::PayloadNotFound => {
                write!(f, "响应中找不到 JSON 数组")
            }
            MalformedResponseError::DecodeFailed { source } => {
                write!(f, "JSON 解码失败: {}", source)
            }
        }
    }
}

impl std::error::Error for MalformedResponseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MalformedResponseError::DecodeFailed { source } => Some(source),
            _ => None,
        }
    }
}

/// 导出错误
#[derive(Debug)]
pub enum ExportError {
    /// 写入输出文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::WriteFailed { path, source } => {
                write!(f, "写入输出文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        AppError::Document(err)
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        AppError::Backend(err)
    }
}

impl From<MalformedResponseError> for AppError {
    fn from(err: MalformedResponseError) -> Self {
        AppError::Response(err)
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err)
    }
}

impl From<serde_json::Error> for MalformedResponseError {
    fn from(err: serde_json::Error) -> Self {
        MalformedResponseError::DecodeFailed { source: err }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn document_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Document(DocumentError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文档内容提取错误
    pub fn document_parse_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Document(DocumentError::ParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建后端请求失败错误
    pub fn backend_request_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Backend(BackendError::RequestFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建后端空结果错误
    pub fn backend_empty_response(model: impl Into<String>) -> Self {
        AppError::Backend(BackendError::EmptyResponse {
            model: model.into(),
        })
    }

    /// 创建后端空内容错误
    pub fn backend_empty_content(model: impl Into<String>) -> Self {
        AppError::Backend(BackendError::EmptyContent {
            model: model.into(),
        })
    }

    /// 创建导出写入错误
    pub fn export_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Export(ExportError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
