//! Tests for loading capability configs from disk

use capability_registry::{
    CapabilitiesConfig, ConfigError, Context, Error, Registry,
};

fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!(
        "capability_registry_{}_{}",
        std::process::id(),
        name
    ));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_yaml_file() {
    let path = write_temp(
        "channel.yaml",
        r#"
capabilities:
  V2_0:
    required: true
  V1_4_3: {}
  Experimental: ~
"#,
    );

    let result = CapabilitiesConfig::load_from_file(&path);
    let _ = std::fs::remove_file(&path);

    let set = result.unwrap().into_capability_set();
    assert_eq!(set.len(), 3);
    assert_eq!(set.required_names().collect::<Vec<_>>(), vec!["V2_0"]);
}

#[test]
fn test_load_json_file() {
    let path = write_temp(
        "orderer.json",
        r#"{"capabilities": {"V2_0": {"required": true}, "V1_1": {"required": false}}}"#,
    );

    let result = CapabilitiesConfig::load_from_file(&path);
    let _ = std::fs::remove_file(&path);

    let set = result.unwrap().into_capability_set();
    assert!(set.get("V2_0").unwrap().required);
    assert!(!set.get("V1_1").unwrap().required);
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("capability_registry_does_not_exist.yaml");
    let err = CapabilitiesConfig::load_from_file(&path).unwrap_err();
    match err {
        ConfigError::Load { hint, .. } => assert!(hint.is_some()),
        other => panic!("Expected Load error, got: {:?}", other),
    }
}

#[test]
fn test_unsupported_extension() {
    let path = std::env::temp_dir().join("capability_registry_config.toml");
    let err = CapabilitiesConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    assert!(err.to_string().contains("Hint"));
}

#[test]
fn test_registry_from_config_file() {
    let path = write_temp(
        "application.yml",
        "capabilities:\n  V2_0:\n    required: true\n  V9_9:\n    required: true\n",
    );

    let registry = Registry::from_config_file(Context::Application.provider(), &path);
    let _ = std::fs::remove_file(&path);

    let registry = registry.unwrap();
    let err = Error::from(registry.supported().unwrap_err());
    assert!(err.is_incompatible());
    assert!(err.to_string().contains("Application capability V9_9"));
}

#[test]
fn test_registry_from_malformed_config_file() {
    let path = write_temp("broken.json", "{\"capabilities\": [");

    let result = Registry::from_config_file(Context::Channel.provider(), &path);
    let _ = std::fs::remove_file(&path);

    match result {
        Err(Error::Config(ConfigError::Parse {
            format,
            path: Some(source),
            ..
        })) => {
            assert_eq!(format, "JSON");
            assert_eq!(source, path.display().to_string());
        }
        other => panic!("Expected JSON parse error with path, got: {:?}", other),
    }
}

#[test]
fn test_duplicate_capability_in_file_is_rejected() {
    let path = write_temp(
        "duplicate.yaml",
        "capabilities:\n  V9_9:\n    required: true\n  V9_9: {}\n",
    );

    let result = Registry::from_config_file(Context::Channel.provider(), &path);
    let _ = std::fs::remove_file(&path);

    match result {
        Err(Error::Config(ConfigError::Parse { path: Some(_), .. })) => {}
        other => panic!("Expected parse error for duplicate key, got: {:?}", other),
    }
}
