pub const DEFAULT_BOOTSTRAP_JSON: &str = r#"{
  "logging": {
    "level": "info",
    "retention_days": 7,
    "directory": "logs"
  },
  "setup": {
    "completion_rule": "loader_overrides"
  }
}
"#;
