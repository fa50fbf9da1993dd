use service_registry::config::{Backends, Config, Parser, CONFIG_FILE_NAME};
use service_registry::systemd::{Scope, SystemdError};
use service_registry::{Error, Registry};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SAMPLE: &str = r#"
filter:
  - mc-server
  - ngrok

backends:
  systemd:
    scope: user
"#;

fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn test_load_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, CONFIG_FILE_NAME, SAMPLE);

    let config = Parser::new().load_config(&path).expect("config loads");
    config.validate().expect("config is valid");

    let types: Vec<&str> = config.filter.iter().collect();
    assert_eq!(types, vec!["mc-server", "ngrok"]);
    assert_eq!(config.backends.systemd.unwrap().scope, Scope::User);
}

#[test]
fn test_discovery_walks_up_to_parent() {
    let dir = tempfile::tempdir().unwrap();
    let expected = write_config(&dir, CONFIG_FILE_NAME, SAMPLE);
    let nested = dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    let found = Parser::find_config_in_dir(&nested).expect("found in ancestor");
    assert_eq!(found, expected);
}

#[test]
fn test_discovery_accepts_yml_extension() {
    let dir = tempfile::tempdir().unwrap();
    let expected = write_config(&dir, "service-registry.yml", SAMPLE);

    let found = Parser::find_config_in_dir(dir.path()).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_yaml_name_wins_over_yml() {
    let dir = tempfile::tempdir().unwrap();
    write_config(&dir, "service-registry.yml", "filter: [old]");
    let preferred = write_config(&dir, CONFIG_FILE_NAME, SAMPLE);

    assert_eq!(Parser::find_config_in_dir(dir.path()).unwrap(), preferred);
}

#[test]
fn test_discovery_skips_directory_named_like_config() {
    let dir = tempfile::tempdir().unwrap();
    let expected = write_config(&dir, CONFIG_FILE_NAME, SAMPLE);
    let nested = dir.path().join("project");
    fs::create_dir_all(nested.join(CONFIG_FILE_NAME)).unwrap();

    assert_eq!(Parser::find_config_in_dir(&nested).unwrap(), expected);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Parser::new().load_config(dir.path().join(CONFIG_FILE_NAME));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_yaml_is_parse_error() {
    let result = Parser::new().parse_config("filter: [web\n");
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[test]
fn test_from_config_rejects_invalid_filter() {
    let config = Config {
        filter: ["web@.service"].into_iter().collect(),
        ..Config::default()
    };
    assert!(matches!(
        Registry::from_config(&config),
        Err(Error::Validation(_))
    ));
}

#[test]
fn test_from_config_requires_a_backend() {
    let config = Config {
        filter: ["web"].into_iter().collect(),
        backends: Backends { systemd: None },
    };
    let err = Registry::from_config(&config).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(err.with_suggestion().contains("Hint:"));
}

#[test]
fn test_from_config_surfaces_unreachable_systemctl() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = format!(
        "filter: [web]\nbackends:\n  systemd:\n    systemctl: {}\n",
        dir.path().join("no-such-systemctl").display()
    );
    let config = Parser::new().parse_config(&yaml).unwrap();

    let err = Registry::from_config(&config).unwrap_err();
    assert!(
        matches!(err, Error::Systemd(SystemdError::ExecFailed { .. })),
        "unexpected error: {:?}",
        err
    );
}
