mod app;
mod client;
mod config;
mod error;
mod ui;
mod view;

#[cfg(test)]
mod testing;

use std::{fs::File, sync::Mutex};

use crate::error::{AppError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    init_logging(&config)?;

    let mut app = app::App::new(config)?;
    app.run().await?;
    Ok(())
}

/// Logs go to a file: stdout is owned by the terminal UI.
fn init_logging(config: &config::AppConfig) -> Result<()> {
    let file = File::create(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "homeventory_tui={level},api_types={level}",
            level = config.log_level
        ))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
