use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use linkmark::cli::Cli;
use linkmark::config::AppConfig;
use linkmark::runtime::modes::{self, Mode};
use linkmark::system::init_logging;

#[actix_web::main]
async fn main() -> ExitCode {
    // .env 不存在时忽略
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command();
    let mode = modes::detect_mode(command);

    if mode == Mode::Standalone {
        return match modes::run_cli(command, None).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e.format_colored());
                ExitCode::FAILURE
            }
        };
    }

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    // guard 必须存活到进程结束
    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            return ExitCode::FAILURE;
        }
    };

    match mode {
        Mode::Server => match modes::run_server(config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("Server exited with error: {:#}", e);
                ExitCode::FAILURE
            }
        },
        _ => match modes::run_cli(command, Some(&config)).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{}", e.format_colored());
                ExitCode::FAILURE
            }
        },
    }
}
