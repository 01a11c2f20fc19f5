//! General Discord commands - help, ping and the small text toys.
//! None of these call an external API; `usage` reads the local database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, discriminator_of, respond},
        core::{Reply, general, usage as usage_store},
        errors::Result,
    };

    /// Lists the available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help = general::help_text(ctx.data().prefix());
        respond(ctx, Reply::Done(help)).await
    }

    /// Responds with "pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        respond(ctx, Reply::Done("pong!".to_string())).await
    }

    /// Responds with "guy!".
    #[poise::command(slash_command, prefix_command)]
    pub async fn buddy(ctx: Context<'_>) -> Result<()> {
        respond(ctx, Reply::Done("guy!".to_string())).await
    }

    /// Rolls a number between 1 and the given maximum (default 100).
    #[poise::command(slash_command, prefix_command)]
    pub async fn roll(
        ctx: Context<'_>,
        #[description = "Highest possible roll, up to 9 digits"] max: Option<String>,
    ) -> Result<()> {
        let max = general::roll_max(max.as_deref());
        let value = general::roll(&mut rand::thread_rng(), max);
        let text = format!("{} rolled **{value}** (1-{max})", ctx.author().name);
        respond(ctx, Reply::Done(text)).await
    }

    /// Puts a noun into a static sentence.
    #[poise::command(slash_command, prefix_command)]
    pub async fn gimme(
        ctx: Context<'_>,
        #[description = "What you want"]
        #[rest]
        noun: Option<String>,
    ) -> Result<()> {
        let reply = general::handle_gimme(ctx.data().prefix(), noun.as_deref());
        respond(ctx, reply).await
    }

    /// Repeats a sentence backwards.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reverse(
        ctx: Context<'_>,
        #[description = "Sentence to reverse"]
        #[rest]
        sentence: Option<String>,
    ) -> Result<()> {
        let reply = general::handle_reverse(ctx.data().prefix(), sentence.as_deref());
        respond(ctx, reply).await
    }

    /// Shows how many times you have used each command.
    #[poise::command(slash_command, prefix_command)]
    pub async fn usage(ctx: Context<'_>) -> Result<()> {
        let author = ctx.author();
        let rows = usage_store::get_usage_for_user(
            &ctx.data().database,
            &author.name,
            &discriminator_of(author),
        )
        .await?;
        let text = usage_store::format_usage(&author.name, &rows);
        respond(ctx, Reply::Done(text)).await
    }
}

// Re-export all commands
pub use inner::*;
