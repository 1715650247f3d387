use std::{collections::HashMap, fs, path::PathBuf};

use super::{load_settings, resolve_settings, CliOverrides, ClientSettings};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings =
        resolve_settings(None, env_from(&[]), &CliOverrides::default()).expect("settings");
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn file_values_are_read() {
    let raw = r#"
service_url = "https://netsereno.example/"
report_dir = "informes"
accept_invalid_certs = true
"#;
    let settings =
        resolve_settings(Some(raw), env_from(&[]), &CliOverrides::default()).expect("settings");
    assert_eq!(settings.service_url, "https://netsereno.example");
    assert_eq!(settings.report_dir, PathBuf::from("informes"));
    assert!(settings.accept_invalid_certs);
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let raw = r#"service_url = "http://file:5000""#;
    let env = env_from(&[
        ("NETSERENO_SERVICE_URL", "http://env:5000"),
        ("APP__SERVICE_URL", "http://app-env:5000"),
        ("NETSERENO_REPORT_DIR", "/tmp/reports"),
    ]);
    let settings = resolve_settings(Some(raw), env, &CliOverrides::default()).expect("settings");
    assert_eq!(settings.service_url, "http://app-env:5000");
    assert_eq!(settings.report_dir, PathBuf::from("/tmp/reports"));
}

#[test]
fn cli_overrides_everything() {
    let cli = CliOverrides {
        service_url: Some("http://cli:8080/".into()),
        report_dir: Some(PathBuf::from("out")),
        accept_invalid_certs: false,
    };
    let env = env_from(&[("APP__SERVICE_URL", "http://app-env:5000")]);
    let settings = resolve_settings(None, env, &cli).expect("settings");
    assert_eq!(settings.service_url, "http://cli:8080");
    assert_eq!(settings.report_dir, PathBuf::from("out"));
}

#[test]
fn invalid_service_url_is_an_error() {
    let cli = CliOverrides {
        service_url: Some("localhost without scheme".into()),
        ..CliOverrides::default()
    };
    assert!(resolve_settings(None, env_from(&[]), &cli).is_err());
}

#[test]
fn invalid_toml_is_an_error() {
    let result = resolve_settings(
        Some("service_url = "),
        env_from(&[]),
        &CliOverrides::default(),
    );
    assert!(result.is_err());
}

#[test]
fn load_settings_reads_file_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("netsereno.toml");
    fs::write(&path, "report_dir = \"reports\"\n").expect("write");

    let cli = CliOverrides {
        service_url: Some("http://127.0.0.1:9".into()),
        ..CliOverrides::default()
    };
    let settings = load_settings(&path, &cli).expect("settings");
    assert_eq!(settings.report_dir, PathBuf::from("reports"));

    let missing = load_settings(&dir.path().join("absent.toml"), &cli).expect("missing file");
    assert_eq!(missing.report_dir, PathBuf::from("."));
}
