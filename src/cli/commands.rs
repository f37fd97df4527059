use std::sync::Arc;

use anyhow::{Context, Result};

use crate::{
    cli::flags::{Cli, Command},
    config::{apply_provider_filter, load_config, AppConfig},
    core::engine::Engine,
    server,
};

pub fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let cfg = load_config(cli.config.as_deref()).context("loading config")?;
    let cfg = apply_provider_filter(cfg, cli.providers.as_deref());
    if cfg.registry().next().is_none() {
        tracing::warn!("no providers enabled; reports will list no platforms");
    }
    Ok(cfg)
}

pub async fn run(cli: Cli) -> Result<()> {
    let cfg = resolve_config(&cli)?;
    let engine = Arc::new(Engine::new(cfg)?);

    match cli.command {
        Command::Serve { bind } => {
            server::serve(engine, &bind).await?;
        }
        Command::Lookup { email, compact } => {
            let report = engine.lookup(&email).await?;
            let json = if compact {
                serde_json::to_string(&report)?
            } else {
                serde_json::to_string_pretty(&report)?
            };
            println!("{json}");
        }
    }
    Ok(())
}
