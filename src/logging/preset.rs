// 日志构建配置与预设

use std::time::Duration;

use crate::logging::{Level, OutputTarget};

/// 编码格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// 面向人读的多行格式
    Console,
    Json,
}

/// 采样配置：每个 tick 内同级别同消息先放行 `initial` 条，之后每 `thereafter` 条放行一条
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingConfig {
    pub tick: Duration,
    pub initial: u64,
    pub thereafter: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            initial: 100,
            thereafter: 100,
        }
    }
}

/// 日志构建配置
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: Level,
    pub development: bool,
    pub encoding: Encoding,
    pub sampling: Option<SamplingConfig>,
    /// 达到该级别的记录附带调用栈
    pub stacktrace_level: Level,
    pub with_caller: bool,
    pub ansi: bool,
    pub outputs: Vec<OutputTarget>,
}

impl LoggerConfig {
    /// 开发环境预设
    pub fn development() -> Self {
        Self {
            level: Level::Debug,
            development: true,
            encoding: Encoding::Console,
            sampling: None,
            stacktrace_level: Level::Warn,
            with_caller: true,
            ansi: true,
            outputs: vec![OutputTarget::Stderr],
        }
    }

    /// 生产环境预设
    pub fn production() -> Self {
        Self {
            level: Level::Info,
            development: false,
            encoding: Encoding::Json,
            sampling: Some(SamplingConfig::default()),
            stacktrace_level: Level::Error,
            with_caller: true,
            ansi: false,
            outputs: vec![OutputTarget::Stderr],
        }
    }

    /// 按级别选择预设: 仅 debug 使用开发预设
    pub fn for_level(level: Level) -> Self {
        let mut config = if level == Level::Debug {
            Self::development()
        } else {
            Self::production()
        };
        config.level = level;
        config
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_stacktrace_level(mut self, level: Level) -> Self {
        self.stacktrace_level = level;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<OutputTarget>) -> Self {
        self.outputs = outputs;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::production()
    }
}
