use std::io::Write;

use tempfile::NamedTempFile;

use super::*;

fn raw_with_site(site: &str) -> RawSettings {
    let mut raw = RawSettings::default();
    raw.api.site_url = Some(site.to_string());
    raw
}

#[test]
fn base_url_joins_site_and_default_base_path() {
    let settings = Settings::from_raw(raw_with_site("https://example.com/")).expect("settings");
    assert_eq!(settings.api.base_url.as_str(), "https://example.com/api");
    assert_eq!(settings.api.timeout, None);
    assert_eq!(settings.toasts.ttl, Duration::from_millis(2600));
}

#[test]
fn base_path_is_normalized() {
    let mut raw = raw_with_site("http://localhost:8080");
    raw.api.base_path = Some("v2/api/".to_string());
    let settings = Settings::from_raw(raw).expect("settings");
    assert_eq!(settings.api.base_url.as_str(), "http://localhost:8080/v2/api");
}

#[test]
fn missing_site_is_rejected_with_key() {
    let err = Settings::from_raw(RawSettings::default()).expect_err("site required");
    assert!(matches!(err, LoadError::Invalid { key: "api.site_url", .. }));
}

#[test]
fn non_http_scheme_is_rejected() {
    let err = Settings::from_raw(raw_with_site("ftp://example.com")).expect_err("scheme");
    assert!(matches!(err, LoadError::Invalid { key: "api.site_url", .. }));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = raw_with_site("https://file.example");
    raw.logging.level = Some("info".to_string());
    raw.api.bearer_token = Some("file-token".to_string());

    let overrides = GlobalOverrides {
        site_url: Some("https://cli.example".to_string()),
        token_env: Some("env-token".to_string()),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };
    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("settings");

    assert_eq!(settings.api.base_url.as_str(), "https://cli.example/api");
    assert_eq!(settings.api.bearer_token.as_deref(), Some("env-token"));
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn invalid_log_level_names_the_key() {
    let mut raw = raw_with_site("https://example.com");
    raw.logging.level = Some("loud".to_string());
    let err = Settings::from_raw(raw).expect_err("invalid level");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn zero_timeout_is_rejected() {
    let mut raw = raw_with_site("https://example.com");
    raw.api.timeout_seconds = Some(0);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = raw_with_site("https://example.com");
    let overrides = GlobalOverrides {
        log_json: Some(true),
        ..Default::default()
    };
    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("settings");
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn blank_token_is_dropped() {
    let mut raw = raw_with_site("https://example.com");
    raw.api.bearer_token = Some("   ".to_string());
    let settings = Settings::from_raw(raw).expect("settings");
    assert_eq!(settings.api.bearer_token, None);
}

#[test]
fn token_file_is_trimmed() {
    let mut file = NamedTempFile::new().expect("tmp file");
    file.write_all(b"file-token\n").expect("write token");
    let token = read_token_file(file.path()).expect("token");
    assert_eq!(token, "file-token");
}

#[test]
fn load_reads_explicit_config_file() {
    let mut file = NamedTempFile::with_suffix(".toml").expect("tmp file");
    file.write_all(b"[api]\nsite_url = \"https://conf.example\"\n\n[toasts]\nttl_ms = 900\n")
        .expect("write config");

    let cli = CliArgs::parse_from([
        "admin-console",
        "--config-file",
        file.path().to_str().expect("utf8 path"),
        "stats",
    ]);
    let settings = load(&cli).expect("settings");
    assert_eq!(settings.api.base_url.as_str(), "https://conf.example/api");
    assert_eq!(settings.toasts.ttl, Duration::from_millis(900));
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".toml").expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

#[test]
fn env_overrides_file_and_cli_overrides_env() {
    let file = config_file(
        "[api]\nsite_url = \"https://file.example\"\nbase_path = \"/file-api\"\n\n[logging]\nlevel = \"info\"\n",
    );
    let path = file.path().to_str().expect("utf8 path");
    let vars = env(&[
        ("ADMIN_CONSOLE__API__SITE_URL", "https://env.example"),
        ("ADMIN_CONSOLE__LOGGING__LEVEL", "warn"),
    ]);

    let cli = CliArgs::parse_from(["admin-console", "--config-file", path, "stats"]);
    let settings = load_with_env(&cli, Some(vars.clone())).expect("settings");
    assert_eq!(settings.api.base_url.as_str(), "https://env.example/file-api");
    assert_eq!(settings.logging.level, LevelFilter::WARN);

    let cli = CliArgs::parse_from([
        "admin-console",
        "--config-file",
        path,
        "--site",
        "https://cli.example",
        "stats",
    ]);
    let settings = load_with_env(&cli, Some(vars)).expect("settings");
    assert_eq!(settings.api.base_url.as_str(), "https://cli.example/file-api");
    assert_eq!(settings.logging.level, LevelFilter::WARN);
}

#[test]
fn env_values_are_validated_with_key() {
    let file = config_file("[api]\nsite_url = \"https://file.example\"\n");
    let cli = CliArgs::parse_from([
        "admin-console",
        "--config-file",
        file.path().to_str().expect("utf8 path"),
        "me",
    ]);
    let vars = env(&[("ADMIN_CONSOLE__LOGGING__LEVEL", "loud")]);

    let err = load_with_env(&cli, Some(vars)).expect_err("invalid level");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn parse_update_arguments() {
    let args = CliArgs::parse_from([
        "admin-console",
        "update",
        "blog",
        "42",
        "--field",
        "title=New title",
        "-f",
        "readMinutes=",
    ]);

    match args.command {
        Command::Update {
            content_type,
            id,
            fields,
        } => {
            assert_eq!(content_type, ContentTypeArg::Blog);
            assert_eq!(id, "42");
            assert_eq!(
                fields,
                vec![
                    ("title".to_string(), "New title".to_string()),
                    ("readMinutes".to_string(), String::new()),
                ]
            );
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn field_without_equals_is_rejected() {
    let result = CliArgs::try_parse_from(["admin-console", "create", "news", "--field", "title"]);
    assert!(result.is_err());
}
