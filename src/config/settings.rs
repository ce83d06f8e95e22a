// 应用程序设置和配置
// 定义配置结构体和加载逻辑

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::LoggerError;
use crate::logging::{OutputTarget, DEFAULT_LEVEL};

/// 默认配置文件
pub const CONFIG_FILE: &str = "config.toml";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "MOE";

/// 应用程序配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub environment: EnvironmentConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 级别文本，如 debug、info、error
    pub level: String,
    /// 输出: stderr、stdout 或文件路径
    pub output_paths: Vec<String>,
    /// 告警服务 DSN，为空时不挂载
    pub alert_dsn: Option<String>,
}

impl LoggingConfig {
    pub fn output_targets(&self) -> Vec<OutputTarget> {
        self.output_paths
            .iter()
            .map(|path| OutputTarget::from_path(path))
            .collect()
    }

    /// 非空的告警 DSN
    pub fn alert_dsn(&self) -> Option<&str> {
        self.alert_dsn
            .as_deref()
            .map(str::trim)
            .filter(|dsn| !dsn.is_empty())
    }
}

/// 环境配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub name: String,
    pub version: String,
}

impl AppConfig {
    /// 从环境变量和配置文件加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(CONFIG_FILE);
        let file = path.exists().then_some(path);
        Self::load_from(file, ENV_PREFIX)
    }

    /// 按指定的配置文件与环境变量前缀加载
    pub fn load_from(file: Option<&Path>, env_prefix: &str) -> Result<Self, ConfigError> {
        let mut config = Config::builder();

        // 1. 加载默认配置
        config = config.add_source(Config::try_from(&AppConfig::default())?);

        // 2. 尝试加载配置文件
        if let Some(file) = file {
            config = config.add_source(File::from(file));
        }

        // 3. 加载环境变量（优先级最高）
        config = config.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("logging.output_paths")
                .try_parsing(true),
        );

        let config = config.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        app_config.environment.version = env!("CARGO_PKG_VERSION").to_string();

        Ok(app_config)
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), LoggerError> {
        use crate::config::ConfigValidator;

        match ConfigValidator::validate_all(self) {
            Ok(()) => Ok(()),
            Err(errors) => {
                let error_messages: Vec<String> =
                    errors.iter().map(|e| e.to_string()).collect();
                Err(LoggerError::config(format!(
                    "配置验证失败: {}",
                    error_messages.join("; ")
                )))
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: DEFAULT_LEVEL.to_string(),
                output_paths: vec!["stderr".to_string()],
                alert_dsn: None,
            },
            environment: EnvironmentConfig {
                name: "development".to_string(),
                version: "0.1.0".to_string(),
            },
        }
    }
}
