//! CLI mode
//!
//! 委托给 `interfaces::cli` 的具体命令实现。

use crate::cli::Commands;
use crate::config::AppConfig;
use crate::interfaces::cli::{CliError, run_cli_command};

/// Run CLI mode
///
/// `config` 为 `None` 时只能执行不依赖配置的命令。
pub async fn run_cli(command: &Commands, config: Option<&AppConfig>) -> Result<(), CliError> {
    run_cli_command(command, config).await
}
