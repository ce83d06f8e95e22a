// 日志级别

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::LoggerError;

/// 日志级别，按严重程度递增
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    /// 开发模式下记录后 panic
    DPanic,
    /// 记录后 panic
    Panic,
    /// 记录后退出进程
    Fatal,
}

impl Level {
    pub const ALL: [Level; 7] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::DPanic,
        Level::Panic,
        Level::Fatal,
    ];

    /// 解析级别文本
    ///
    /// 接受全小写或全大写；空串视为 `info`。
    pub fn parse(text: &str) -> Result<Self, LoggerError> {
        match text {
            "debug" | "DEBUG" => Ok(Self::Debug),
            "info" | "INFO" | "" => Ok(Self::Info),
            "warn" | "WARN" => Ok(Self::Warn),
            "error" | "ERROR" => Ok(Self::Error),
            "dpanic" | "DPANIC" => Ok(Self::DPanic),
            "panic" | "PANIC" => Ok(Self::Panic),
            "fatal" | "FATAL" => Ok(Self::Fatal),
            _ => Err(LoggerError::invalid_level(text)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::DPanic => "dpanic",
            Self::Panic => "panic",
            Self::Fatal => "fatal",
        }
    }

    /// 在 `ALL` 中的下标
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// 映射到 tracing 的级别；error 以上统一为 ERROR
    pub fn as_tracing(&self) -> tracing::Level {
        match self {
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error | Self::DPanic | Self::Panic | Self::Fatal => tracing::Level::ERROR,
        }
    }

    /// 当前阈值下是否输出 `level`
    pub fn enables(&self, level: Level) -> bool {
        level >= *self
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::Info
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
