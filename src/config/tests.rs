// 配置系统测试

#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::logging::OutputTarget;
    use std::io::Write;

    // 测试使用独立前缀，避免读到真实环境变量
    const TEST_PREFIX: &str = "MOE_CONFIG_TEST_UNSET";

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "error");
        assert_eq!(config.logging.output_paths, vec!["stderr"]);
        assert!(config.logging.alert_dsn.is_none());
        assert_eq!(config.environment.name, "development");
    }

    #[test]
    fn test_default_config_validates() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = AppConfig::load_from(None, TEST_PREFIX).unwrap();

        assert_eq!(config.logging.level, "error");
        assert_eq!(config.environment.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[logging]
level = "debug"
output_paths = ["stdout", "/tmp/moe.log"]
alert_dsn = "https://key@alerts.example.com/3"

[environment]
name = "production"
version = "0.0.0"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(Some(file.path()), TEST_PREFIX).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.alert_dsn(), Some("https://key@alerts.example.com/3"));
        assert_eq!(config.environment.name, "production");
        assert!(config.validate().is_ok());

        let targets = config.logging.output_targets();
        assert_eq!(targets.len(), 2);
        assert!(matches!(targets[0], OutputTarget::Stdout));
        assert!(matches!(targets[1], OutputTarget::File(_)));
    }

    #[test]
    fn test_invalid_config_validation() {
        let mut config = AppConfig::default();

        config.logging.level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unrecognized level"));

        config.logging.level = "info".to_string();
        config.logging.output_paths.clear();
        assert!(config.validate().is_err());

        config.logging.output_paths = vec!["stderr".to_string()];
        config.logging.alert_dsn = Some("not a dsn".to_string());
        assert!(config.validate().is_err());

        config.logging.alert_dsn = Some("   ".to_string());
        assert!(config.validate().is_ok());
        assert!(config.logging.alert_dsn().is_none());
    }

    #[test]
    fn test_config_validator_environment() {
        let mut environment = AppConfig::default().environment;
        assert!(ConfigValidator::validate_environment(&environment).is_ok());

        environment.name.clear();
        assert!(ConfigValidator::validate_environment(&environment).is_err());
    }

    #[test]
    fn test_validate_all_collects_errors() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        config.environment.name.clear();

        let errors = ConfigValidator::validate_all(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_summary_masks_dsn() {
        let mut config = AppConfig::default();
        config.logging.alert_dsn = Some("https://secret@alerts.example.com/1".to_string());

        let summary = ConfigLoader::summary(&config);
        assert!(summary.contains("日志级别: error"));
        assert!(!summary.contains("secret"));
    }
}
