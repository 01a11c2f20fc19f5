use dotenvy::dotenv;
use game_bot::{
    bot::{self, BotData},
    config::{self, database},
    errors::Result,
    stats::{FortniteClient, LeagueClient, OsuClient, RateLimiter, http::build_http_client},
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Settings and secrets
    let app_config = Arc::new(
        config::load_default_config()
            .inspect_err(|e| error!("Failed to load configuration: {}", e))?,
    );
    let secrets = config::load_secrets()?;

    // 4. Database
    let database = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&database)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Stats clients, one limiter per upstream API
    let fortnite_limiter = Arc::new(RateLimiter::new(app_config.fortnite.min_interval()));
    info!(
        interval_ms = fortnite_limiter.min_interval().as_millis(),
        "Fortnite requests rate limited"
    );
    let fortnite = FortniteClient::new(
        build_http_client(app_config.fortnite.timeout())?,
        &app_config.fortnite.base_url,
        secrets.fortnite_api_key.clone(),
        fortnite_limiter,
    )?;

    let osu = match secrets.osu_api_key.clone() {
        Some(key) => {
            let osu_limiter = Arc::new(RateLimiter::new(app_config.osu.min_interval()));
            info!(
                interval_ms = osu_limiter.min_interval().as_millis(),
                "osu! requests rate limited"
            );
            Some(OsuClient::new(
                build_http_client(app_config.osu.timeout())?,
                &app_config.osu.base_url,
                key,
                osu_limiter,
            )?)
        }
        None => {
            warn!("osu! lookups disabled");
            None
        }
    };

    let league = match secrets.riot_api_key.clone() {
        Some(key) => {
            let riot_limiter = Arc::new(RateLimiter::new(app_config.league.min_interval()));
            info!(
                interval_ms = riot_limiter.min_interval().as_millis(),
                "Riot requests rate limited"
            );
            Some(LeagueClient::new(
                build_http_client(app_config.league.timeout())?,
                &app_config.league.base_url,
                &app_config.league.data_dragon_url,
                key,
                riot_limiter,
            )?)
        }
        None => {
            warn!("League of Legends lookups disabled");
            None
        }
    };

    // 6. Run the bot
    let data = BotData::new(database, fortnite, osu, league, Arc::clone(&app_config));
    bot::run_bot(secrets.discord_token, data)
        .await
        .inspect_err(|e| error!("Bot stopped with error: {}", e))?;

    Ok(())
}
