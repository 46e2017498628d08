//! Mode routing
//!
//! - Server mode (HTTP server)
//! - CLI mode (migrate, config generate)

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;

use crate::cli::{Commands, ConfigCommands};

/// Mode detection result
#[derive(Debug, PartialEq, Eq)]
pub enum Mode {
    Server,
    /// 需要加载配置的 CLI 命令
    Cli,
    /// 不依赖配置的 CLI 命令
    Standalone,
}

/// 根据子命令选择运行模式
pub fn detect_mode(command: &Commands) -> Mode {
    match command {
        Commands::Serve => Mode::Server,
        Commands::Migrate => Mode::Cli,
        Commands::Config {
            action: ConfigCommands::Generate { .. },
        } => Mode::Standalone,
    }
}
