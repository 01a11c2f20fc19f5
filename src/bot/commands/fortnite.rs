//! Fortnite Discord commands.
//!
//! Each command collects its arguments and hands them to
//! [`crate::core::fortnite::handle_stats_command`], which produces the reply.
//! Replies may take a few seconds while requests wait on the rate limiter,
//! so the typing indicator is shown first.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, respond},
        core::fortnite::{StatsCommand, handle_stats_command},
        errors::Result,
    };

    async fn run(ctx: Context<'_>, command: StatsCommand, args: Vec<String>) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let reply = handle_stats_command(&data.fortnite, data.prefix(), command, &args).await;
        respond(ctx, reply).await
    }

    /// Lifetime and overall solo/duo/squad stats. Append `:psn` or `:xbl` for consoles.
    #[poise::command(slash_command, prefix_command, rename = "fn")]
    pub async fn fortnite(
        ctx: Context<'_>,
        #[description = "Epic name, optionally name:platform"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        run(ctx, StatsCommand::Profile, name.into_iter().collect()).await
    }

    /// Current season stats.
    #[poise::command(slash_command, prefix_command)]
    pub async fn fnseason(
        ctx: Context<'_>,
        #[description = "Epic name, optionally name:platform"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        run(ctx, StatsCommand::Season, name.into_iter().collect()).await
    }

    /// Compares two players' lifetime stats. Quote names that contain spaces.
    #[poise::command(slash_command, prefix_command)]
    pub async fn fncompare(
        ctx: Context<'_>,
        #[description = "First player"] first: Option<String>,
        #[description = "Second player"] second: Option<String>,
    ) -> Result<()> {
        let args = first.into_iter().chain(second).collect();
        run(ctx, StatsCommand::Compare, args).await
    }

    /// Lifetime stats on the platform the player has played the most.
    #[poise::command(slash_command, prefix_command)]
    pub async fn fnfavorite(
        ctx: Context<'_>,
        #[description = "Epic name"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        run(ctx, StatsCommand::Favorite, name.into_iter().collect()).await
    }

    /// Lists the Fortnite commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn fnhelp(ctx: Context<'_>) -> Result<()> {
        run(ctx, StatsCommand::Help, Vec::new()).await
    }
}

pub use inner::*;
