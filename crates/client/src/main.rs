//! Spell duel terminal client.
//!
//! Composition root: loads configuration from the environment (and `.env`),
//! sets up file logging, builds the runtime with a [`TextPresenter`], and
//! hands stdin/stdout to the [`Client`] loop.
//!
//! ```bash
//! DUEL_ANIMATION_MS=300 DUEL_OPPONENT_DELAY_MS=500 cargo run -p duel-client
//! DUEL_EVENT_FORMAT=json DUEL_SEED=42 cargo run -p duel-client
//! ```

use anyhow::Result;
use duel_client::{Client, ClientConfig, Renderer, TextPresenter, logging};
use duel_runtime::{DuelRuntime, RuntimeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let runtime_config = RuntimeConfig::from_env();
    let client_config = ClientConfig::from_env();

    // 2. Setup logging
    let session_id = client_config.session_id();
    let _log_guard = logging::setup_logging(&session_id, client_config.log_dir.as_deref())?;

    tracing::info!("Starting spell duel client");
    tracing::info!(
        animation_ms = client_config.animation.as_millis() as u64,
        opponent_delay_ms = runtime_config.opponent_delay.as_millis() as u64,
        seed = ?runtime_config.seed,
        format = ?client_config.format,
        "Configuration loaded"
    );

    // 3. Build runtime
    let presenter = TextPresenter::new(client_config.animation);
    let renderer = Renderer::new(
        client_config.format,
        runtime_config.duel.player_name.clone(),
        runtime_config.duel.opponent_name.clone(),
    );
    let runtime = DuelRuntime::builder()
        .config(runtime_config)
        .presenter(presenter)
        .build();

    // 4. Hand control to the terminal loop
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    Client::new(runtime, renderer)
        .run(stdin, tokio::io::stdout())
        .await
}
