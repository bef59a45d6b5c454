use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, builder::BoolishValueParser};

use crate::domain::types::ContentType;

/// Command-line arguments for the `admin-console` binary.
#[derive(Debug, Parser)]
#[command(
    name = "admin-console",
    version,
    about = "Headless admin console for the content API"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "ADMIN_CONSOLE_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Site URL hosting the API, e.g. <https://example.com>
    #[arg(long = "site", env = "ADMIN_CONSOLE_SITE_URL", value_name = "URL", global = true)]
    pub site_url: Option<String>,

    /// Override the API base path (default `/api`).
    #[arg(long = "api-base-path", value_name = "PATH", global = true)]
    pub base_path: Option<String>,

    /// Path to a file containing the admin bearer token (takes precedence over env).
    #[arg(
        long = "token-file",
        env = "ADMIN_CONSOLE_TOKEN_FILE",
        value_name = "PATH",
        global = true
    )]
    pub token_file: Option<PathBuf>,

    /// Bearer token from env (no visible flag so it stays out of shell history).
    #[arg(long = "token", hide = true, env = "ADMIN_CONSOLE_TOKEN", global = true)]
    pub token_env: Option<String>,

    /// Session cookie sent with every request, e.g. `session=abc`.
    #[arg(long = "cookie", hide = true, env = "ADMIN_CONSOLE_COOKIE", global = true)]
    pub cookie: Option<String>,

    /// Abort requests that take longer than this many seconds.
    #[arg(long = "timeout-seconds", value_name = "SECONDS", global = true)]
    pub timeout_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Load session, stats, users and every content list, then print the console.
    Dashboard(DashboardArgs),
    /// Print the card list of one content type.
    List {
        #[arg(value_enum)]
        content_type: ContentTypeArg,
    },
    /// Print the user table.
    Users,
    /// Print aggregate counters.
    Stats,
    /// Print the current session.
    Me,
    /// Create a record from field assignments.
    Create {
        #[arg(value_enum)]
        content_type: ContentTypeArg,
        /// Field assignment, repeatable. Checkbox fields take `on`.
        #[arg(long = "field", short = 'f', value_name = "NAME=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Load a record into its form, apply field assignments and save it.
    Update {
        #[arg(value_enum)]
        content_type: ContentTypeArg,
        id: String,
        /// Field assignment, repeatable. Checkbox fields take `on` or `off`.
        #[arg(long = "field", short = 'f', value_name = "NAME=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Delete a record.
    Delete {
        #[arg(value_enum)]
        content_type: ContentTypeArg,
        id: String,
    },
    /// Delete a user account.
    DeleteUser { id: String },
}

#[derive(Debug, Args, Default, Clone)]
pub struct DashboardArgs {
    /// Render the console as an HTML page instead of text.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub html: bool,

    /// Write the rendered console to a file instead of stdout.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ContentTypeArg {
    Blog,
    News,
    Videos,
    Events,
    Support,
    Tests,
}

impl From<ContentTypeArg> for ContentType {
    fn from(arg: ContentTypeArg) -> Self {
        match arg {
            ContentTypeArg::Blog => ContentType::Blog,
            ContentTypeArg::News => ContentType::News,
            ContentTypeArg::Videos => ContentType::Videos,
            ContentTypeArg::Events => ContentType::Events,
            ContentTypeArg::Support => ContentType::Support,
            ContentTypeArg::Tests => ContentType::Tests,
        }
    }
}

impl fmt::Display for ContentTypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ContentType::from(*self).as_str())
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("field name missing in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}
