//! Command usage entity - one counter per (user, command) pair.
//!
//! Users are keyed by their Discord name plus discriminator so that a rename
//! starts a fresh tally.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Command usage database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "command_usage")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user name at the time of the command
    pub user_name: String,
    /// Discord discriminator, `"0"` for accounts on the new username system
    pub discriminator: String,
    /// Command name without the prefix
    pub command: String,
    /// Number of times the user has run the command
    pub count: i64,
    /// When the command was last run
    pub last_used_at: DateTimeUtc,
}

/// `CommandUsage` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
