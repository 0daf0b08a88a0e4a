use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the REST service, e.g. `http://127.0.0.1:8000/api/`.
    pub base_url: String,
    /// Route opened at startup.
    pub start_route: String,
    pub request_timeout_secs: u64,
    /// Delay between a successful create and the redirect to the new record.
    pub redirect_delay_ms: u64,
    pub toast_ttl_ms: u64,
    pub log_level: String,
    pub log_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/".to_string(),
            start_route: "/".to_string(),
            request_timeout_secs: 10,
            redirect_delay_ms: 2000,
            toast_ttl_ms: 6000,
            log_level: "info".to_string(),
            log_file: "homeventory_tui.log".to_string(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }
}

#[derive(Debug, Parser)]
#[command(name = "homeventory_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000/api/).
    #[arg(long)]
    base_url: Option<String>,
    /// Route to open at startup (e.g. /rooms or /items/3).
    #[arg(long)]
    route: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("HOMEVENTORY_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(route) = args.route {
        settings.start_route = route;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }

    Ok(settings)
}
