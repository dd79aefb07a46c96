//! Sidewalk Engine - Main entry point.
//!
//! Reads mission events as JSON lines on stdin and drives the mission
//! progress coordinator until EOF.

use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sidewalk_engine::api::EventFeed;
use sidewalk_engine::infrastructure::settings::Settings;
use sidewalk_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root so the binary works from `crates/engine` too.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sidewalk_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Sidewalk Engine");

    let settings = Settings::from_env();
    tracing::info!(
        base_url = %settings.base_url,
        timeout_secs = settings.http_timeout.as_secs(),
        onboarding = settings.onboarding,
        "Configuration loaded"
    );

    let app = App::new(&settings);

    let stats = EventFeed::new(&app)
        .run(BufReader::new(tokio::io::stdin()))
        .await?;

    app.shutdown().await;
    tracing::info!(
        handled = stats.handled,
        skipped = stats.skipped,
        "Sidewalk Engine stopped"
    );
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    // Then whatever the working directory provides.
    let _ = dotenvy::dotenv();
}
