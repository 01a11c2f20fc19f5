//! osu! Discord commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, respond},
        core::osu,
        errors::Result,
    };

    /// Shows level, play count, rank, pp and accuracy for an osu! player.
    #[poise::command(slash_command, prefix_command)]
    pub async fn osuplayer(
        ctx: Context<'_>,
        #[description = "osu! username"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let name = name.as_deref().unwrap_or("");
        let reply = osu::handle_osu_command(data.osu.as_ref(), data.prefix(), name).await;
        respond(ctx, reply).await
    }
}

pub use inner::*;
