// 统一错误类型定义

use thiserror::Error;

/// 日志门面错误类型
///
/// 只有两类失败: 级别文本无效、后端构建失败。
/// 每个变体的消息都以失败的操作作为前缀，并包含底层原因。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoggerError {
    /// 无法识别的级别文本
    #[error("unrecognized level: {text:?}")]
    InvalidLevel { text: String },

    /// 初始化失败（调用方应视为致命）
    #[error("failed to initialize logger due to: {0}")]
    Initialize(String),

    /// 调整级别失败
    #[error("failed to set logger level due to: {0}")]
    SetLevel(String),

    /// 后端构建失败
    #[error("failed to build logger: {0}")]
    Build(String),

    /// 告警通道构建失败
    #[error("failed to attach alerting sink: {0}")]
    AlertSink(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl LoggerError {
    /// 创建级别错误
    pub fn invalid_level(text: impl Into<String>) -> Self {
        Self::InvalidLevel { text: text.into() }
    }

    /// 创建构建错误
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build(message.into())
    }

    /// 创建告警通道错误
    pub fn alert_sink(message: impl Into<String>) -> Self {
        Self::AlertSink(message.into())
    }

    /// 创建配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// 包装为初始化错误
    pub fn during_initialize(self) -> Self {
        match self {
            Self::Initialize(_) => self,
            other => Self::Initialize(other.to_string()),
        }
    }

    /// 包装为调整级别错误
    pub fn during_set_level(self) -> Self {
        match self {
            Self::SetLevel(_) => self,
            other => Self::SetLevel(other.to_string()),
        }
    }

    /// 错误代码
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidLevel { .. } => "INVALID_LEVEL",
            Self::Initialize(_) => "INITIALIZE_ERROR",
            Self::SetLevel(_) => "SET_LEVEL_ERROR",
            Self::Build(_) => "BUILD_ERROR",
            Self::AlertSink(_) => "ALERT_SINK_ERROR",
            Self::Config(_) => "CONFIGURATION_ERROR",
        }
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for LoggerError {
    fn from(err: config::ConfigError) -> Self {
        Self::config(format!("配置加载错误: {}", err))
    }
}

/// 从 url::ParseError 转换
impl From<url::ParseError> for LoggerError {
    fn from(err: url::ParseError) -> Self {
        Self::alert_sink(format!("invalid DSN: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, LoggerError>;
