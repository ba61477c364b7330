use mimic::prelude::*;
use std::time::Duration;

#[test]
fn test_defaults_when_empty() {
    let config = ConfigLoader::from_yaml_str("{}").unwrap();
    assert_eq!(config, MimicConfig::default());
    assert_eq!(config.runner_config().failure_policy, FailurePolicy::Continue);
    assert_eq!(config.runner_config().request_timeout, None);
    assert_eq!(config.gateway_config().timeout, Some(Duration::from_secs(30)));
    assert_eq!(config.bind_addr().unwrap().port(), 8787);
    assert!(!config.log.json);
}

#[test]
fn test_yaml_sections() {
    let yaml = r#"
runner:
  failure_policy: stop_on_first_failure
  request_timeout_ms: 1500
gateway:
  bind: "0.0.0.0:9000"
  timeout_ms: 5000
  user_agent: "mimic-test"
store:
  dir: "/tmp/mimic-flows"
log:
  json: true
"#;
    let config = ConfigLoader::from_yaml_str(yaml).unwrap();

    let runner = config.runner_config();
    assert_eq!(runner.failure_policy, FailurePolicy::StopOnFirstFailure);
    assert_eq!(runner.request_timeout, Some(Duration::from_millis(1500)));

    let gateway = config.gateway_config();
    assert_eq!(gateway.timeout, Some(Duration::from_millis(5000)));
    assert_eq!(gateway.user_agent, "mimic-test");
    assert_eq!(config.bind_addr().unwrap().port(), 9000);
    assert_eq!(config.store.dir.to_str(), Some("/tmp/mimic-flows"));
    assert!(config.log.json);
}

#[test]
fn test_json_config() {
    let config = ConfigLoader::from_json_str(
        r#"{"runner": {"failure_policy": "continue"}, "gateway": {"timeout_ms": null}}"#,
    )
    .unwrap();
    assert_eq!(config.gateway_config().timeout, None);
}

#[test]
fn test_invalid_values_rejected() {
    assert!(ConfigLoader::from_yaml_str("gateway:\n  bind: not-an-address\n").is_err());
    assert!(ConfigLoader::from_yaml_str("runner:\n  request_timeout_ms: 0\n").is_err());
    assert!(ConfigLoader::from_yaml_str("runner:\n  failure_policy: sometimes\n").is_err());
}

#[test]
fn test_yaml_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mimic.yaml");
    let mut config = MimicConfig::default();
    config.runner.request_timeout_ms = Some(250);

    ConfigLoader::save_to_yaml(&config, &path).unwrap();
    let loaded = ConfigLoader::from_yaml_file(&path).unwrap();
    assert_eq!(loaded, config);
}
