// 配置加载器
// 处理 .env 文件、配置文件与环境变量

use dotenvy::dotenv;

use crate::config::AppConfig;
use crate::errors::LoggerError;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 加载并验证配置
    ///
    /// 此时日志门面尚未建立，提示信息由调用方在初始化日志后输出。
    pub fn init() -> Result<AppConfig, LoggerError> {
        // 缺少 .env 文件不算错误
        let _ = dotenv();

        let config = AppConfig::load()?;
        config.validate()?;

        Ok(config)
    }

    /// 配置摘要，敏感字段打码
    pub fn summary(config: &AppConfig) -> String {
        let alert = match config.logging.alert_dsn() {
            Some(_) => "已配置",
            None => "未配置",
        };

        format!(
            "环境: {} | 版本: {} | 日志级别: {} | 输出: {} | 告警: {}",
            config.environment.name,
            config.environment.version,
            config.logging.level,
            config.logging.output_paths.join(","),
            alert
        )
    }
}
