//! Bot layer - Discord-specific interface and command handlers
//!
//! Commands live in [`commands`] and forward to [`crate::core`]; this module
//! holds the shared state, the reply path and the client startup.

/// Discord command implementations (fortnite, league, osu, general)
pub mod commands;

use crate::{
    config::AppConfig,
    core::{Reply, usage},
    errors::{Error, Result},
    stats::{FortniteClient, LeagueClient, OsuClient},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::{num::NonZeroU16, sync::Arc};
use tracing::{debug, error, info, instrument, warn};

/// Shared data available to all bot commands.
pub struct BotData {
    /// Database connection for the usage counters
    pub database: DatabaseConnection,
    /// Fortnite Tracker client
    pub fortnite: FortniteClient,
    /// osu! client, absent when no API key is configured
    pub osu: Option<OsuClient>,
    /// Riot API client, absent when no API key is configured
    pub league: Option<LeagueClient>,
    /// Settings loaded at startup
    pub config: Arc<AppConfig>,
}

impl BotData {
    /// Bundles the shared state handed to every command.
    #[must_use]
    pub const fn new(
        database: DatabaseConnection,
        fortnite: FortniteClient,
        osu: Option<OsuClient>,
        league: Option<LeagueClient>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            database,
            fortnite,
            osu,
            league,
            config,
        }
    }

    /// Text command prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.config.bot.prefix
    }
}

/// Poise context with this bot's data and error types.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Discriminator as stored in the usage table: four digits, or `"0"` for
/// accounts that have moved to unique usernames.
#[must_use]
pub fn discriminator_of(user: &serenity::User) -> String {
    format_discriminator(user.discriminator)
}

fn format_discriminator(discriminator: Option<NonZeroU16>) -> String {
    discriminator.map_or_else(|| "0".to_string(), |d| format!("{:04}", d.get()))
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(error.user_message()).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Sends the reply, then counts it against the author if the command did
/// what was asked. Recording failures are only logged.
pub async fn respond(ctx: Context<'_>, reply: Reply) -> Result<()> {
    ctx.say(reply.text()).await?;

    let author = ctx.author();
    let discriminator = discriminator_of(author);
    let command = &ctx.command().name;
    let database = &ctx.data().database;

    match usage::record_reply(database, &author.name, &discriminator, command, &reply).await {
        Ok(Some(row)) => debug!(
            user = %author.name,
            command = %command,
            count = row.count,
            "Recorded command usage"
        ),
        Ok(None) => debug!(command = %command, "Rejected reply, usage not recorded"),
        Err(e) => warn!(user = %author.name, command = %command, "Failed to record usage: {}", e),
    }
    Ok(())
}

/// Builds the framework and runs the client until it stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let prefix = data.prefix().to_string();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                case_insensitive_commands: true,
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminator_is_zero_padded() {
        assert_eq!(format_discriminator(NonZeroU16::new(42)), "0042");
        assert_eq!(format_discriminator(NonZeroU16::new(1337)), "1337");
    }

    #[test]
    fn test_missing_discriminator_is_zero() {
        assert_eq!(format_discriminator(None), "0");
    }
}
