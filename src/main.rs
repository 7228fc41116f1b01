//! Jujurly session host
//!
//! Runs one dashboard session on a single-threaded event loop, reading JSON
//! commands from stdin and writing one JSON reply per line to stdout.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;
use tokio::task::LocalSet;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jujurly::{spawn_sweep_task, Config, Session};

/// Main entry point for the session host.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load and validate configuration from environment variables
/// 3. Create the session state owner
/// 4. Start the background TTL sweep task
/// 5. Process commands until EOF or Ctrl+C
/// 6. Stop the sweep on teardown
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jujurly=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Jujurly session host");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache={}x{}ms, analysis_cache={}x{}ms, sweep_interval={}s, page_size={}",
        config.cache.max_size,
        config.cache.ttl.as_millis(),
        config.analysis_cache.max_size,
        config.analysis_cache.ttl.as_millis(),
        config.sweep_interval,
        config.page_size
    );

    let session = Session::from_config(&config).context("invalid configuration")?;
    let session = Rc::new(RefCell::new(session));

    let local = LocalSet::new();
    local
        .run_until(async move {
            let sweep = spawn_sweep_task(session.clone(), config.sweep_interval());
            info!("Background sweep task started");

            let result = tokio::select! {
                result = command_loop(session) => result,
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C, shutting down...");
                    Ok(())
                }
            };

            sweep.stop();
            info!("Sweep task stopped");
            result
        })
        .await?;

    info!("Session host shutdown complete");
    Ok(())
}

/// Reads commands line by line and answers each one.
///
/// Undecodable lines, malformed lines and failed commands produce an error
/// reply; the loop ends only at EOF or on an I/O failure.
async fn command_loop(session: Rc<RefCell<Session>>) -> anyhow::Result<()> {
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = stdin
            .read_until(b'\n', &mut line)
            .await
            .context("failed to read stdin")?;
        if read == 0 {
            break;
        }

        let Some(reply) = session.borrow_mut().handle_line(&line) else {
            continue;
        };

        let mut out = serde_json::to_vec(&reply).context("failed to encode reply")?;
        out.push(b'\n');
        stdout.write_all(&out).await.context("failed to write stdout")?;
        stdout.flush().await.context("failed to flush stdout")?;
    }

    info!("stdin closed");
    Ok(())
}
