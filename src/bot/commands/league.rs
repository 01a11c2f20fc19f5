//! League of Legends Discord commands.
//!
//! The plain commands look on NA; the `...region` ones take a region first.
//! A live-game lookup makes one ranked request per player, so the typing
//! indicator is shown before any of them run.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, respond},
        core::league::{LeagueCommand, handle_league_command},
        errors::Result,
    };

    async fn run(ctx: Context<'_>, command: LeagueCommand, args: Vec<String>) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let reply =
            handle_league_command(data.league.as_ref(), data.prefix(), command, &args).await;
        respond(ctx, reply).await
    }

    fn region_args(region: Option<String>, name: Option<String>) -> Vec<String> {
        region.into_iter().chain(name).collect()
    }

    /// Level and top champions of a summoner on NA. Use Name#TAG for other tags.
    #[poise::command(slash_command, prefix_command)]
    pub async fn lol(
        ctx: Context<'_>,
        #[description = "Riot ID, Name or Name#TAG"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        run(ctx, LeagueCommand::Summoner, name.into_iter().collect()).await
    }

    /// Level and top champions of a summoner on the given region.
    #[poise::command(slash_command, prefix_command)]
    pub async fn lolregion(
        ctx: Context<'_>,
        #[description = "Region, e.g. EUW"] region: Option<String>,
        #[description = "Riot ID, Name or Name#TAG"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        run(ctx, LeagueCommand::SummonerRegion, region_args(region, name)).await
    }

    /// Ranked standings of a summoner on NA.
    #[poise::command(slash_command, prefix_command)]
    pub async fn lolranks(
        ctx: Context<'_>,
        #[description = "Riot ID, Name or Name#TAG"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        run(ctx, LeagueCommand::Ranks, name.into_iter().collect()).await
    }

    /// Ranked standings of a summoner on the given region.
    #[poise::command(slash_command, prefix_command)]
    pub async fn lolranksregion(
        ctx: Context<'_>,
        #[description = "Region, e.g. EUW"] region: Option<String>,
        #[description = "Riot ID, Name or Name#TAG"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        run(ctx, LeagueCommand::RanksRegion, region_args(region, name)).await
    }

    /// The live game of a summoner on NA.
    #[poise::command(slash_command, prefix_command)]
    pub async fn lollive(
        ctx: Context<'_>,
        #[description = "Riot ID, Name or Name#TAG"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        run(ctx, LeagueCommand::Live, name.into_iter().collect()).await
    }

    /// The live game of a summoner on the given region.
    #[poise::command(slash_command, prefix_command)]
    pub async fn lolliveregion(
        ctx: Context<'_>,
        #[description = "Region, e.g. EUW"] region: Option<String>,
        #[description = "Riot ID, Name or Name#TAG"]
        #[rest]
        name: Option<String>,
    ) -> Result<()> {
        run(ctx, LeagueCommand::LiveRegion, region_args(region, name)).await
    }

    /// Lists the League of Legends commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn lolhelp(ctx: Context<'_>) -> Result<()> {
        run(ctx, LeagueCommand::Help, Vec::new()).await
    }
}

pub use inner::*;
