//! `scout serve` — Seed the catalog and start the HTTP gateway.

use scout_agent::AgentLoop;
use scout_config::AppConfig;
use scout_storage::SqliteCatalog;
use std::path::Path;
use std::sync::Arc;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    // Check for API key early and give a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    OPENROUTER_API_KEY   (recommended)");
        eprintln!("    OPENAI_API_KEY       (for OpenAI direct)");
        eprintln!("    SCOUT_API_KEY        (generic)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        eprintln!("  Get an OpenRouter key at: https://openrouter.ai/keys");
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let catalog = Arc::new(SqliteCatalog::new(&config.storage.database_path).await?);
    catalog
        .ensure_seeded(Path::new(&config.storage.dataset_path))
        .await?;
    let companies = catalog.count().await?;

    let provider = scout_providers::build_from_config(&config)?;
    let tools = Arc::new(scout_tools::default_registry(catalog));

    let mut agent = AgentLoop::new(provider, &config.model, tools);
    if let Some(temperature) = config.temperature {
        agent = agent.with_temperature(temperature);
    }
    if let Some(max_tokens) = config.max_tokens {
        agent = agent.with_max_tokens(max_tokens);
    }

    println!("🔭 Scout Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Model:     {}", config.model);
    println!("   Companies: {companies}");

    scout_gateway::start(&config, Arc::new(agent)).await?;

    Ok(())
}
