use config::Config;
use osm_oauth_fixture::config::{AccountConfig, AppConfig, ConfigError, SeedIdentity, load_config_from};
use std::env;
use std::fs;

#[test]
fn test_account_config_deserialization() {
    let yaml_content = r#"
account_created: "2019-01-01T00:00:00Z"
description: "Mapper"
languages: ["de"]
"#;

    let config = Config::builder()
        .add_source(config::File::from_str(
            yaml_content,
            config::FileFormat::Yaml,
        ))
        .build()
        .expect("Failed to build config");

    let account: AccountConfig = config
        .try_deserialize()
        .expect("Failed to deserialize account config");
    assert_eq!(account.account_created, "2019-01-01T00:00:00Z");
    assert_eq!(account.description, "Mapper");
    assert_eq!(account.languages, vec!["de".to_string()]);
}

#[test]
fn test_app_config_deserialization() {
    let yaml_content = r#"
listen_addr: "127.0.0.1:9100"
token_secret: "bar"
account:
  account_created: "2020-03-26T22:24:52Z"
seed_identities:
  - id: "1"
    display_name: "john"
  - id: "2"
    display_name: "jane"
"#;

    let config = Config::builder()
        .add_source(config::File::from_str(
            yaml_content,
            config::FileFormat::Yaml,
        ))
        .build()
        .expect("Failed to build config");

    let app_config: AppConfig = config
        .try_deserialize()
        .expect("Failed to deserialize app config");
    assert_eq!(app_config.listen_addr, "127.0.0.1:9100");
    assert_eq!(app_config.token_secret, "bar");
    assert_eq!(app_config.account.languages, vec!["en-US", "en"]);
    assert_eq!(
        app_config.seed_identities,
        vec![
            SeedIdentity {
                id: "1".into(),
                display_name: "john".into()
            },
            SeedIdentity {
                id: "2".into(),
                display_name: "jane".into()
            },
        ]
    );
    assert!(app_config.validate().is_ok());
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::builder()
        .add_source(config::File::from_str("{}", config::FileFormat::Yaml))
        .build()
        .expect("Failed to build config");

    let app_config: AppConfig = config.try_deserialize().expect("Failed to deserialize");
    assert_eq!(app_config.listen_addr, "0.0.0.0:9000");
    assert_eq!(app_config.token_secret, "fixture-secret");
    assert_eq!(app_config.account, AccountConfig::default());
    assert!(app_config.seed_identities.is_empty());
}

#[test]
fn test_load_config_from_file() {
    let config_path = env::temp_dir().join("osm_oauth_fixture_test_config.yaml");
    fs::write(
        &config_path,
        r#"
listen_addr: "127.0.0.1:9200"
seed_identities:
  - id: "9"
    display_name: "nine"
"#,
    )
    .expect("Failed to write temp config");

    let app_config = load_config_from(&config_path).expect("Failed to load config");
    assert_eq!(app_config.listen_addr, "127.0.0.1:9200");
    assert_eq!(app_config.seed_identities.len(), 1);

    let _ = fs::remove_file(config_path);
}

#[test]
fn test_load_config_missing_file_falls_back_to_defaults() {
    let config_path = env::temp_dir().join("osm_oauth_fixture_does_not_exist.yaml");
    let _ = fs::remove_file(&config_path);

    let app_config = load_config_from(&config_path).expect("Missing file is optional");
    assert_eq!(app_config.listen_addr, "0.0.0.0:9000");
}

#[test]
fn test_load_config_rejects_invalid_values() {
    let config_path = env::temp_dir().join("osm_oauth_fixture_invalid_config.yaml");
    fs::write(&config_path, "listen_addr: \"not an address\"\n")
        .expect("Failed to write temp config");

    let result = load_config_from(&config_path);
    assert!(matches!(result, Err(ConfigError::Validation(_))));

    let _ = fs::remove_file(config_path);
}

#[test]
fn test_config_with_environment_variables() {
    let config_path = env::temp_dir().join("osm_oauth_fixture_env_config.yaml");
    fs::write(&config_path, "token_secret: \"from-file\"\n").expect("Failed to write temp config");

    // Environment variables should override file values
    unsafe {
        env::set_var("FIXTURE__TOKEN_SECRET", "from-env");
    }
    let app_config = load_config_from(&config_path).expect("Failed to load config");
    unsafe {
        env::remove_var("FIXTURE__TOKEN_SECRET");
    }

    assert_eq!(app_config.token_secret, "from-env");
    let _ = fs::remove_file(config_path);
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::Validation("listen_addr is wrong".into());
    assert_eq!(
        err.to_string(),
        "Invalid configuration: listen_addr is wrong"
    );
}
