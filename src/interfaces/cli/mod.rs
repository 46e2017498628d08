//! CLI interface module
//!
//! 非 serve 子命令的实现：迁移数据库、生成示例配置。

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::AppConfig;

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ConfigError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ConfigError(msg) => format!("Config error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ConfigError(msg) => {
                format!("{} {}", "Config error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::LinkmarkError> for CliError {
    fn from(err: crate::errors::LinkmarkError) -> Self {
        match err {
            crate::errors::LinkmarkError::Config(msg) => CliError::ConfigError(msg),
            other => CliError::StorageError(other.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
///
/// `Serve` 由 server 模式处理，不会走到这里。
pub async fn run_cli_command(cmd: &Commands, config: Option<&AppConfig>) -> Result<(), CliError> {
    match cmd {
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => commands::config_generate(output_path.clone(), *force).await,

        Commands::Migrate => {
            let config = config.ok_or_else(|| {
                CliError::ConfigError("configuration must be loaded before migrating".into())
            })?;
            commands::run_migrate(&config.database).await
        }

        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by server mode".into(),
        )),
    }
}
