//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{fs, path::Path, str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

pub use cli::{CliArgs, Command, ContentTypeArg, DashboardArgs, GlobalOverrides};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "admin-console";
const ENV_PREFIX: &str = "ADMIN_CONSOLE";
const DEFAULT_BASE_PATH: &str = "/api";
const DEFAULT_TOAST_TTL_MS: u64 = 2600;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub toasts: ToastSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Site URL joined with the API base path, without a trailing slash.
    pub base_url: Url,
    pub bearer_token: Option<String>,
    pub cookie: Option<String>,
    /// `None` leaves requests without a deadline.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct ToastSettings {
    pub ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("failed to read token file {path}: {source}")]
    TokenFile {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Parse the command line and load settings from it.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let cli = CliArgs::parse();
    let settings = load(&cli)?;
    Ok((cli, settings))
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    load_with_env(cli, None)
}

/// As [`load`], reading `ADMIN_CONSOLE__*` variables from `env` instead of the
/// process environment when given.
pub fn load_with_env(
    cli: &CliArgs,
    env: Option<config::Map<String, String>>,
) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .source(env),
    );

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);
    if let Some(path) = cli.overrides.token_file.as_ref() {
        raw.api.bearer_token = Some(read_token_file(path)?);
    }

    Settings::from_raw(raw)
}

fn read_token_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path)
        .map(|token| token.trim().to_string())
        .map_err(|source| LoadError::TokenFile {
            path: path.display().to_string(),
            source,
        })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    toasts: RawToastSettings,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    site_url: Option<String>,
    base_path: Option<String>,
    bearer_token: Option<String>,
    cookie: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawToastSettings {
    ttl_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(site) = overrides.site_url.as_ref() {
            self.api.site_url = Some(site.clone());
        }
        if let Some(path) = overrides.base_path.as_ref() {
            self.api.base_path = Some(path.clone());
        }
        if let Some(token) = overrides.token_env.as_ref() {
            self.api.bearer_token = Some(token.clone());
        }
        if let Some(cookie) = overrides.cookie.as_ref() {
            self.api.cookie = Some(cookie.clone());
        }
        if let Some(seconds) = overrides.timeout_seconds {
            self.api.timeout_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            toasts,
            logging,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            toasts: build_toast_settings(toasts)?,
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let site = non_blank(api.site_url).ok_or_else(|| {
        LoadError::invalid(
            "api.site_url",
            "site URL is required (use --site or ADMIN_CONSOLE_SITE_URL)",
        )
    })?;

    let base_path = normalize_base_path(api.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH));
    let joined = format!("{}{base_path}", site.trim_end_matches('/'));
    let base_url = Url::parse(&joined)
        .map_err(|err| LoadError::invalid("api.site_url", format!("failed to parse: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "api.site_url",
            format!("unsupported scheme `{}`", base_url.scheme()),
        ));
    }

    let timeout = match api.timeout_seconds {
        Some(0) => {
            return Err(LoadError::invalid(
                "api.timeout_seconds",
                "must be greater than zero",
            ));
        }
        Some(seconds) => Some(Duration::from_secs(seconds)),
        None => None,
    };

    Ok(ApiSettings {
        base_url,
        bearer_token: non_blank(api.bearer_token),
        cookie: non_blank(api.cookie),
        timeout,
    })
}

fn build_toast_settings(toasts: RawToastSettings) -> Result<ToastSettings, LoadError> {
    let ttl_ms = toasts.ttl_ms.unwrap_or(DEFAULT_TOAST_TTL_MS);
    if ttl_ms == 0 {
        return Err(LoadError::invalid(
            "toasts.ttl_ms",
            "must be greater than zero",
        ));
    }
    Ok(ToastSettings {
        ttl: Duration::from_millis(ttl_ms),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

/// `""`, `"/"` → `""`; `"api/"` → `"/api"`.
fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[cfg(test)]
mod tests;
