//! Dungeon client binary.
//!
//! # Examples
//!
//! ```bash
//! # Default cellar walk
//! cargo run -p dungeon-client
//!
//! # Different script, verbose engine logs
//! DUNGEON_SCRIPT="get:pebble,throw:east" RUST_LOG=game_core=debug cargo run -p dungeon-client
//! ```

use anyhow::Result;
use dungeon_client::{ClientConfig, Session};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = setup_logging(&config)?;

    tracing::info!(
        map = %config.map,
        ticks = config.ticks,
        "starting dungeon client"
    );

    let mut session = Session::load(&config)?;
    let transcript = session.run(config.ticks)?;

    for line in &transcript {
        println!("{line}");
    }

    let snapshot = session.runtime.snapshot();
    tracing::info!(
        clock = %snapshot.clock,
        pending = snapshot.pending_actions(),
        hero_busy = session.runtime.total_busy(session.player).unwrap_or(0),
        "session finished"
    );
    Ok(())
}

/// Logs go to stderr, and to `client.log` as well when a log directory is set.
fn setup_logging(config: &ClientConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, "client.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
