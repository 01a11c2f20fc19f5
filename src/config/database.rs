//! Database configuration module for `GameBot`.
//!
//! Handles `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs.

use crate::entities::{CommandUsage, command_usage};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, Schema,
    sea_query::{Index, IndexCreateStatement},
};
use tracing::{info, instrument};

/// Directory holding the default database file.
const DEFAULT_DATA_DIR: &str = "data";

/// Used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/game_bot.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Connects to the database named by `DATABASE_URL`, or the default local file.
///
/// The default file's directory is created when missing.
#[instrument]
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all(DEFAULT_DATA_DIR)?;
    }

    let db = Database::connect(&database_url).await?;
    info!("Connected to database");
    Ok(db)
}

fn usage_key_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_command_usage_user_command")
        .table(CommandUsage)
        .col(command_usage::Column::UserName)
        .col(command_usage::Column::Discriminator)
        .col(command_usage::Column::Command)
        .unique()
        .if_not_exists()
        .to_owned()
}

/// Creates all tables and indexes if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut usage_table = schema.create_table_from_entity(CommandUsage);
    usage_table.if_not_exists();

    db.execute(builder.build(&usage_table)).await?;
    db.execute(builder.build(&usage_key_index())).await?;

    Ok(())
}
