//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

fn db_error(e: sea_orm::DbErr) -> AppError {
    AppError::internal(e.to_string())
}

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Connect without auto-running migrations for manual control
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Running pending migrations...");
            db.run_migrations().await.map_err(db_error)?;
            tracing::info!("Migrations completed successfully");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration...");
            db.rollback_migration().await.map_err(db_error)?;
            tracing::info!("Rollback completed successfully");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await.map_err(db_error)? {
                println!("{:<48} {}", name, if applied { "applied" } else { "pending" });
            }
        }
        MigrateAction::Fresh { force } => {
            if config.is_production() && !force {
                return Err(AppError::validation(
                    "Refusing to reset a production database without --force",
                ));
            }
            tracing::warn!("Dropping all tables and re-running migrations...");
            db.fresh_migrations().await.map_err(db_error)?;
            tracing::info!("Fresh migrations completed successfully");
        }
    }

    Ok(())
}
