//! Per-user command usage counters.
//!
//! Every command that answers with [`Reply::Done`] bumps a row keyed by
//! `(user_name, discriminator, command)`. The first use inserts the row.
//! Usage lines and failed lookups are not counted.

use crate::{
    core::Reply,
    entities::{CommandUsage, command_usage},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};

/// Counts one use of `command` by the given user.
///
/// Returns the row as it stands after the update.
pub async fn record_usage(
    db: &DatabaseConnection,
    user_name: &str,
    discriminator: &str,
    command: &str,
) -> Result<command_usage::Model> {
    let txn = db.begin().await?;
    let now = chrono::Utc::now();

    let updated = CommandUsage::update_many()
        .col_expr(
            command_usage::Column::Count,
            Expr::col(command_usage::Column::Count).add(1),
        )
        .col_expr(command_usage::Column::LastUsedAt, Expr::value(now))
        .filter(command_usage::Column::UserName.eq(user_name))
        .filter(command_usage::Column::Discriminator.eq(discriminator))
        .filter(command_usage::Column::Command.eq(command))
        .exec(&txn)
        .await?;

    if updated.rows_affected == 0 {
        command_usage::ActiveModel {
            user_name: Set(user_name.to_string()),
            discriminator: Set(discriminator.to_string()),
            command: Set(command.to_string()),
            count: Set(1),
            last_used_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    let row = CommandUsage::find()
        .filter(command_usage::Column::UserName.eq(user_name))
        .filter(command_usage::Column::Discriminator.eq(discriminator))
        .filter(command_usage::Column::Command.eq(command))
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound(format!(
            "usage row for {user_name}#{discriminator} {command}"
        )))?;

    txn.commit().await?;
    Ok(row)
}

/// Counts `command` only when `reply` is a success.
///
/// Returns the updated row, or `None` when nothing was recorded.
pub async fn record_reply(
    db: &DatabaseConnection,
    user_name: &str,
    discriminator: &str,
    command: &str,
    reply: &Reply,
) -> Result<Option<command_usage::Model>> {
    if !reply.is_done() {
        return Ok(None);
    }
    record_usage(db, user_name, discriminator, command).await.map(Some)
}

/// All counters for one user, ordered by command name.
pub async fn get_usage_for_user(
    db: &DatabaseConnection,
    user_name: &str,
    discriminator: &str,
) -> Result<Vec<command_usage::Model>> {
    CommandUsage::find()
        .filter(command_usage::Column::UserName.eq(user_name))
        .filter(command_usage::Column::Discriminator.eq(discriminator))
        .order_by_asc(command_usage::Column::Command)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Renders a user's counters as a chat reply.
#[must_use]
pub fn format_usage(user_name: &str, rows: &[command_usage::Model]) -> String {
    if rows.is_empty() {
        return format!("**{user_name} has not used any commands yet.**");
    }
    let lines: Vec<String> = rows
        .iter()
        .map(|row| format!("**{}:** {}", row.command, row.count))
        .collect();
    format!("__**~ {user_name}'s command usage ~**__\n\n{}", lines.join("\n"))
}
