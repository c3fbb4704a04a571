use std::fs;
use std::path::PathBuf;

use super::*;

fn sample() -> FancyConfig {
    let mut config = FancyConfig::default();
    config.insert_profile(ProfileConfig {
        name: "ACME_DEV_ADMIN".into(),
        account_id: Some("123456789012".into()),
        ecr_login: true,
        ecr_region: "eu-west-1".into(),
        k8s_context: "dev-cluster".into(),
        k9s_auto_launch: true,
        display_name: Some("Dev".into()),
        namespace: None,
    });
    config.insert_profile(ProfileConfig { name: "ACME_PROD_ADMIN".into(), ..ProfileConfig::default() });
    config.settings.wizard_completed = true;
    config
}

fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
    ConfigStore::with_paths(dir.path().join("local").join(store::CONFIG_FILE_NAME), dir.path().join("home.yaml"))
}

#[test]
fn default_config_has_expected_settings() {
    let config = FancyConfig::default();
    assert!(config.profile_configs.is_empty());
    assert_eq!(config.settings.default_region, "eu-central-1");
    assert!(!config.settings.wizard_completed);
    assert!(config.settings.prefer_local_config);
}

#[test]
fn parse_document_with_reference_keys() {
    let raw = r#"
profile_configs:
  OV_TEST_DEVENG:
    name: OV_TEST_DEVENG
    account_id: "111122223333"
    ecr_login: true
    ecr_region: ""
    k8s_context: test-cluster
    k9s_auto_launch: true
settings:
  default_region: us-east-1
  config_wizard_run: true
  prefer_local_configs: false
"#;
    let config = FancyConfig::from_yaml(raw, &PathBuf::from("x.yaml")).unwrap();
    let profile = config.profile("OV_TEST_DEVENG").unwrap();
    assert_eq!(profile.account_id.as_deref(), Some("111122223333"));
    assert!(profile.ecr_login);
    assert_eq!(profile.k8s_context, "test-cluster");
    assert!(profile.wants_dashboard());
    assert_eq!(config.settings.default_region, "us-east-1");
    assert!(config.settings.wizard_completed);
    assert!(!config.settings.prefer_local_config);
}

#[test]
fn missing_fields_are_filled_by_normalization() {
    let raw = "profile_configs:\n  dev:\n    ecr_login: true\nsettings:\n  config_wizard_run: true\n";
    let config = FancyConfig::from_yaml(raw, &PathBuf::from("x.yaml")).unwrap();
    let profile = config.profile("dev").unwrap();
    assert_eq!(profile.name, "dev");
    assert!(!profile.has_context());
    assert_eq!(config.settings.default_region, "eu-central-1");
}

#[test]
fn explicit_empty_region_is_kept() {
    let raw = "settings:\n  default_region: \"\"\n";
    let config = FancyConfig::from_yaml(raw, &PathBuf::from("x.yaml")).unwrap();
    assert_eq!(config.settings.default_region, "");
}

#[test]
fn legacy_free_text_name_becomes_display_name() {
    let raw = "profile_configs:\n  dev:\n    name: \"Development\"\n";
    let config = FancyConfig::from_yaml(raw, &PathBuf::from("x.yaml")).unwrap();
    let profile = config.profile("dev").unwrap();
    assert_eq!(profile.name, "dev");
    assert_eq!(profile.display_label(), "Development");
}

#[test]
fn null_sections_read_as_empty() {
    let config = FancyConfig::from_yaml("profile_configs:\nsettings:\n", &PathBuf::from("x.yaml")).unwrap();
    assert!(config.is_empty());
    assert_eq!(config.settings, GlobalSettings::default());
}

#[test]
fn wrong_types_are_parse_errors() {
    let raw = "profile_configs:\n  dev:\n    ecr_login: maybe\n";
    let err = FancyConfig::from_yaml(raw, &PathBuf::from("bad.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("bad.yaml"));
}

#[test]
fn ecr_region_prefers_profile_then_default() {
    let mut config = sample();
    let dev = config.profile("ACME_DEV_ADMIN").unwrap().clone();
    assert_eq!(config.ecr_region_for(&dev), "eu-west-1");

    let prod = config.profile("ACME_PROD_ADMIN").unwrap().clone();
    assert_eq!(config.ecr_region_for(&prod), "eu-central-1");

    config.settings.default_region.clear();
    assert_eq!(config.ecr_region_for(&prod), "");
}

#[test]
fn auto_launch_requires_context() {
    let profile = ProfileConfig { k9s_auto_launch: true, ..ProfileConfig::new("x") };
    assert!(!profile.wants_dashboard());
}

#[test]
fn load_without_file_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert!(!store.exists());
    assert_eq!(store.load().unwrap(), FancyConfig::default());
}

#[test]
fn load_surfaces_parse_error_instead_of_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    fs::write(dir.path().join("home.yaml"), "profile_configs: [unclosed\n").unwrap();
    assert!(matches!(store.load().unwrap_err(), ConfigError::Parse { .. }));
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let config = sample();

    let path = store.save(&config).unwrap();
    assert_eq!(path, dir.path().join("home.yaml"));
    assert_eq!(store.load().unwrap(), config);
}

#[test]
fn persistence_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&sample()).unwrap();
    let first = fs::read_to_string(store.path()).unwrap();

    let reloaded = store.load().unwrap();
    store.save(&reloaded).unwrap();
    let second = fs::read_to_string(store.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn persistence_is_idempotent_for_empty_values() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let mut config = sample();
    config.settings.default_region.clear();
    config.insert_profile(ProfileConfig {
        name: "ACME_QA_ADMIN".into(),
        account_id: Some(String::new()),
        display_name: Some(" ".into()),
        ..ProfileConfig::default()
    });
    config
        .profile_configs
        .insert("ACME_STAGE_ADMIN".into(), ProfileConfig { name: "Stage".into(), ..ProfileConfig::default() });

    store.save(&config).unwrap();
    let first = fs::read_to_string(store.path()).unwrap();
    let reloaded = store.load().unwrap();
    store.save(&reloaded).unwrap();
    let second = fs::read_to_string(store.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(reloaded.settings.default_region, "");
    assert_eq!(reloaded.profile("ACME_QA_ADMIN").unwrap().account_id, None);
    assert_eq!(reloaded.profile("ACME_STAGE_ADMIN").unwrap().display_label(), "Stage");
}

#[test]
fn save_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&sample()).unwrap();
    let names: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert!(names.iter().all(|n| !n.to_string_lossy().ends_with(".tmp")));
}

#[test]
fn local_document_shadows_home_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&FancyConfig::default()).unwrap();
    assert_eq!(store.path(), dir.path().join("home.yaml"));

    let local = dir.path().join("local").join(store::CONFIG_FILE_NAME);
    fs::create_dir_all(local.parent().unwrap()).unwrap();
    fs::write(&local, "settings:\n  default_region: ap-south-1\n").unwrap();

    assert_eq!(store.path(), local);
    assert_eq!(store.load().unwrap().settings.default_region, "ap-south-1");
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::with_paths(dir.path().join("absent.yaml"), dir.path().join("nested/deeper/home.yaml"));
    store.save(&sample()).unwrap();
    assert!(dir.path().join("nested/deeper/home.yaml").is_file());
}
