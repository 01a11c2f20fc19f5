//! Entity module - `SeaORM` entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod command_usage;

pub use command_usage::{Entity as CommandUsage, Model as CommandUsageModel};
