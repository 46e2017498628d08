//! Migrate command

use colored::Colorize;

use crate::config::DatabaseConfig;
use crate::interfaces::cli::CliError;
use crate::storage::SeaOrmStorage;

/// 连接数据库并执行全部待执行的迁移
pub async fn run_migrate(config: &DatabaseConfig) -> Result<(), CliError> {
    println!("{}", "Running database migrations...".yellow());

    let storage = SeaOrmStorage::new(config)
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))?;

    println!(
        "  {} {}",
        "Migrations applied on".green(),
        storage.backend_name().blue()
    );
    Ok(())
}
