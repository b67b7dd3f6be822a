use serial_test::serial;
use std::path::PathBuf;
use teddy_bot_backend::domain::CompletionRule;
use teddy_bot_backend::infrastructure::config::{
    default_config_path_for_root, AppConfig, BootstrapFileConfig, EnvOverrides, LoggingFileConfig,
    SetupFileConfig,
};
use tempfile::tempdir;

struct EnvVarGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvVarGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        std::env::set_var(key, value);
        Self { key, original }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(value) = &self.original {
            std::env::set_var(self.key, value);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

#[test]
fn defaults_live_under_root() {
    let config = AppConfig::defaults_for_root(PathBuf::from("/srv/teddybot"));

    assert_eq!(config.config_path, PathBuf::from("/srv/teddybot/teddybot.json"));
    assert_eq!(config.log_dir, PathBuf::from("/srv/teddybot/logs"));
    assert_eq!(config.info_dir(), PathBuf::from("/srv/teddybot/info"));
    assert_eq!(config.log_level, "info");
    assert_eq!(config.log_retention_days, 7);
    assert_eq!(config.completion_rule, CompletionRule::LoaderOverrides);
}

#[test]
fn load_from_writes_template_when_missing() {
    let temp = tempdir().unwrap();
    let root = temp.path().to_path_buf();

    let config = AppConfig::load_from(EnvOverrides::default(), root.clone()).unwrap();

    let config_path = default_config_path_for_root(&root);
    assert!(config_path.exists());
    assert_eq!(config.config_path, config_path);
    assert_eq!(config.root_dir, root);
    assert_eq!(config.log_dir, root.join("logs"));
    assert_eq!(config.completion_rule, CompletionRule::LoaderOverrides);
}

#[test]
fn load_from_reads_existing_file() {
    let temp = tempdir().unwrap();
    let root = temp.path().to_path_buf();
    std::fs::write(
        root.join("teddybot.json"),
        r#"{
  "logging": { "level": "WARNING", "retention_days": 0, "directory": "var/log" },
  "setup": { "completion_rule": "either" }
}"#,
    )
    .unwrap();

    let config = AppConfig::load_from(EnvOverrides::default(), root.clone()).unwrap();

    assert_eq!(config.log_level, "warn");
    assert_eq!(config.log_retention_days, 1);
    assert_eq!(config.log_dir, root.join("var/log"));
    assert_eq!(config.completion_rule, CompletionRule::Either);
}

#[test]
fn load_from_rejects_invalid_json() {
    let temp = tempdir().unwrap();
    std::fs::write(temp.path().join("teddybot.json"), "{ \"setup\": ").unwrap();

    let error = AppConfig::load_from(EnvOverrides::default(), temp.path().to_path_buf()).unwrap_err();

    assert!(error.to_string().contains("invalid config json"));
}

#[test]
fn written_template_uses_loader_result_for_completion() {
    let temp = tempdir().unwrap();
    let root = temp.path().to_path_buf();
    AppConfig::load_from(EnvOverrides::default(), root.clone()).unwrap();

    let raw = std::fs::read_to_string(default_config_path_for_root(&root)).unwrap();
    let parsed: BootstrapFileConfig = serde_json::from_str(&raw).unwrap();

    assert_eq!(parsed.setup.completion_rule, Some(CompletionRule::LoaderOverrides));
}

#[test]
fn overrides_resolve_relative_root_and_config_path() {
    let temp = tempdir().unwrap();
    let cwd = temp.path().to_path_buf();
    let overrides = EnvOverrides {
        root_dir: Some(PathBuf::from("bot")),
        config_path: Some(PathBuf::from("conf/bootstrap.json")),
        log_level: Some("debug".to_string()),
        completion_rule: Some(CompletionRule::Either),
    };

    let config = AppConfig::load_from(overrides, cwd.clone()).unwrap();

    assert_eq!(config.root_dir, cwd.join("bot"));
    assert_eq!(config.config_path, cwd.join("bot/conf/bootstrap.json"));
    assert!(config.config_path.exists());
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.completion_rule, CompletionRule::Either);
}

#[test]
fn env_overrides_win_over_file() {
    let file = BootstrapFileConfig {
        logging: LoggingFileConfig {
            level: Some("error".to_string()),
            retention_days: Some(3),
            directory: Some(PathBuf::from("/var/log/teddybot")),
        },
        setup: SetupFileConfig {
            completion_rule: Some(CompletionRule::LoaderOverrides),
        },
    };
    let overrides = EnvOverrides {
        log_level: Some("trace".to_string()),
        completion_rule: Some(CompletionRule::Either),
        ..EnvOverrides::default()
    };

    let config = AppConfig::from_inputs(file, overrides, PathBuf::from("/bot"));

    assert_eq!(config.log_level, "trace");
    assert_eq!(config.log_retention_days, 3);
    assert_eq!(config.log_dir, PathBuf::from("/var/log/teddybot"));
    assert_eq!(config.completion_rule, CompletionRule::Either);
}

#[test]
#[serial]
fn from_env_reads_prefixed_variables() {
    let _root = EnvVarGuard::set("TEDDY_BOT_ROOT", "/srv/teddybot");
    let _level = EnvVarGuard::set("TEDDY_BOT_LOG_LEVEL", "warn");
    let _rule = EnvVarGuard::set("TEDDY_BOT_COMPLETION_RULE", "either");
    let _path = EnvVarGuard::set("TEDDY_BOT_CONFIG_PATH", "");

    let overrides = EnvOverrides::from_env().unwrap();

    assert_eq!(overrides.root_dir, Some(PathBuf::from("/srv/teddybot")));
    assert_eq!(overrides.config_path, None);
    assert_eq!(overrides.log_level.as_deref(), Some("warn"));
    assert_eq!(overrides.completion_rule, Some(CompletionRule::Either));
}

#[test]
#[serial]
fn from_env_rejects_unknown_completion_rule() {
    let _rule = EnvVarGuard::set("TEDDY_BOT_COMPLETION_RULE", "sometimes");

    let error = EnvOverrides::from_env().unwrap_err();

    assert!(error.to_string().contains("TEDDY_BOT_COMPLETION_RULE"));
}
