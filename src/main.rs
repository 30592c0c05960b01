mod commands;
mod config;
mod hypotheses;
mod papers;
mod state;
mod supabase;

use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use poise::{Framework, FrameworkOptions};
use tracing::{error, info, Level};

use config::AppConfig;
use hypotheses::HypothesisCatalog;
use state::AppState;
use supabase::SupabaseClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let _ = dotenv::dotenv();
    let config = AppConfig::from_env().context("Invalid configuration")?;

    let supabase = Arc::new(SupabaseClient::new(&config)?);
    info!(url = %config.supabase_url, "Supabase client initialized");

    let hypotheses = Arc::new(HypothesisCatalog::bundled()?);
    info!(count = hypotheses.hypotheses().len(), "Hypothesis catalog loaded");

    let app_state = AppState {
        supabase,
        hypotheses,
        header_mode: config.header_mode,
    };

    let guild_id = config.guild_id.map(serenity::GuildId::new);
    let intents = serenity::GatewayIntents::GUILDS;

    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: vec![commands::hypo()],
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as: {} ({})", ready.user.name, ready.user.id);

                for cmd in &framework.options().commands {
                    for sub in &cmd.subcommands {
                        info!("  /{} {}", cmd.name, sub.name);
                    }
                }

                if let Some(gid) = guild_id {
                    info!("Registering to guild {} (instant)", gid);
                    poise::builtins::register_in_guild(ctx, &framework.options().commands, gid)
                        .await?;
                } else {
                    info!("Registering globally (up to 1 hour delay)");
                    poise::builtins::register_globally(ctx, &framework.options().commands)
                        .await?;
                }

                Ok(app_state)
            })
        })
        .build();

    info!("Starting research dashboard bot...");

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await
        .context("Failed to create client")?;

    if let Err(e) = client.start().await {
        error!("Client error: {}", e);
    }

    Ok(())
}
