// 配置验证器

use crate::config::{AppConfig, EnvironmentConfig, LoggingConfig};
use crate::errors::LoggerError;
use crate::logging::{Dsn, Level};

/// 配置验证器
pub struct ConfigValidator;

impl ConfigValidator {
    /// 验证完整配置
    pub fn validate_all(config: &AppConfig) -> Result<(), Vec<LoggerError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_logging(&config.logging) {
            errors.push(e);
        }

        if let Err(e) = Self::validate_environment(&config.environment) {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// 验证日志配置
    pub fn validate_logging(config: &LoggingConfig) -> Result<(), LoggerError> {
        Level::parse(&config.level)
            .map_err(|e| LoggerError::config(format!("无效的日志级别: {}", e)))?;

        if config.output_paths.is_empty() {
            return Err(LoggerError::config("日志输出不能为空"));
        }

        if config.output_paths.iter().any(|path| path.trim().is_empty()) {
            return Err(LoggerError::config("日志输出路径不能为空字符串"));
        }

        if let Some(dsn) = config.alert_dsn() {
            Dsn::parse(dsn).map_err(|e| LoggerError::config(format!("无效的告警 DSN: {}", e)))?;
        }

        Ok(())
    }

    /// 验证环境配置
    pub fn validate_environment(config: &EnvironmentConfig) -> Result<(), LoggerError> {
        if config.name.is_empty() {
            return Err(LoggerError::config("环境名称不能为空"));
        }

        Ok(())
    }
}
