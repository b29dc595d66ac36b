use super::*;

use std::fs;

fn env(vars: &[(&str, &str)]) -> Option<HashMap<String, String>> {
    Some(
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[test]
fn defaults_apply_without_file_or_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(&dir.path().join(SETTINGS_FILE), env(&[])).expect("settings");

    assert_eq!(settings.bind_addr, "127.0.0.1:8000");
    assert_eq!(settings.weather_base_url, OPENWEATHERMAP_BASE_URL);
    assert_eq!(settings.model_settings(), ModelSettings::default());
    assert!(settings.openweathermap_api_key.is_none());
}

#[test]
fn missing_api_key_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(
        &dir.path().join(SETTINGS_FILE),
        env(&[("OPENWEATHERMAP_API_KEY", "   ")]),
    )
    .expect("settings");

    let err = settings.require_api_key().expect_err("should fail");
    assert!(err.to_string().contains("OPENWEATHERMAP_API_KEY"));
}

#[test]
fn file_values_are_overridden_by_prefixed_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(SETTINGS_FILE);
    fs::write(
        &path,
        r#"
bind_addr = "0.0.0.0:9000"
anomaly_threshold = 3.0
mean_yield = 120.0
std_dev_yield = 40.0
openweathermap_api_key = "from-file"
"#,
    )
    .expect("write settings");

    let settings = load_settings_from(&path, env(&[("APP__ANOMALY_THRESHOLD", "2.5")]))
        .expect("settings");

    assert_eq!(settings.bind_addr, "0.0.0.0:9000");
    assert_eq!(settings.anomaly_threshold, 2.5);
    assert_eq!(settings.model_settings().stats.mean_yield, 120.0);
    assert_eq!(settings.model_settings().stats.std_dev_yield, 40.0);
    assert_eq!(settings.require_api_key().expect("key"), "from-file");
}

#[test]
fn plain_env_names_fill_in_when_prefixed_ones_are_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(
        &dir.path().join(SETTINGS_FILE),
        env(&[
            ("OPENWEATHERMAP_API_KEY", "plain-key"),
            ("SERVER_BIND", "127.0.0.1:7000"),
        ]),
    )
    .expect("settings");

    assert_eq!(settings.bind_addr, "127.0.0.1:7000");
    assert_eq!(settings.require_api_key().expect("key"), "plain-key");
}

#[test]
fn prefixed_env_wins_over_plain_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = load_settings_from(
        &dir.path().join(SETTINGS_FILE),
        env(&[
            ("OPENWEATHERMAP_API_KEY", "plain-key"),
            ("APP__OPENWEATHERMAP_API_KEY", "prefixed-key"),
            ("SERVER_BIND", "127.0.0.1:7000"),
            ("APP__BIND_ADDR", "127.0.0.1:7001"),
        ]),
    )
    .expect("settings");

    assert_eq!(settings.bind_addr, "127.0.0.1:7001");
    assert_eq!(settings.require_api_key().expect("key"), "prefixed-key");
}
