use thiserror::Error;

use crate::workflow::Operation;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 出题服务调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 文档导出错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 输入校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 业务流程错误
    #[error("业务错误: {0}")]
    Business(#[from] BusinessError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// 出题服务调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（连接、超时等）
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: BoxedSource,
    },
    /// 服务返回非 2xx 状态
    #[error("API返回错误响应 ({endpoint}): status={status}, body={body}")]
    BadResponse {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 响应结构与约定不符
    #[error("API响应格式不正确 ({endpoint}): {reason}")]
    MalformedResponse { endpoint: String, reason: String },
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed {
        #[source]
        source: BoxedSource,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
}

/// 文档导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 题目列表为空，无可导出内容
    #[error("没有可导出的题目")]
    NothingToExport,
    /// docx 打包失败
    #[error("文档序列化失败: {source}")]
    SerializationFailed {
        #[source]
        source: BoxedSource,
    },
    /// 写入文件失败
    #[error("写入文档失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: BoxedSource,
    },
}

/// 输入校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 主题不在当前主题集合中
    #[error("未知主题: {topic}")]
    UnknownTopic { topic: String },
    /// 题目数量必须为正整数
    #[error("主题 {topic} 的题目数量无效: {value}（必须 >= 1）")]
    InvalidCount { topic: String, value: i64 },
}

/// 业务流程错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BusinessError {
    /// 同类操作仍在进行中
    #[error("操作 {0} 正在进行中，请等待完成")]
    OperationInFlight(Operation),
    /// 生成期间主题已被新的上传替换，结果作废
    #[error("生成期间主题已变化，结果已丢弃")]
    TopicsChanged,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("无法解析配置文件 {path}: {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建响应格式错误
    pub fn malformed_response(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Api(ApiError::MalformedResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文档序列化错误
    pub fn export_serialization_failed(
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Export(ExportError::SerializationFailed {
            source: Box::new(source),
        })
    }

    /// 创建文档写入错误
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
