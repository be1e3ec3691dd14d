//! jsbridge CLI - evaluate scripts against configured read-only globals and proxies

use std::io::stderr;
use std::time::Duration;

use anyhow::Result;
use clap::Parser as _;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use cli::Cli;

mod cli;
mod handlers;

/// Grace period for a timed-out evaluation thread before the process exits
const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jsbridge_core=info,jsbridge_cli=info".into()),
        )
        .with(fmt::layer().with_writer(stderr))
        .init();

    let cli = Cli::parse();

    let runtime = Builder::new_multi_thread().enable_all().build()?;
    let result = runtime.block_on(handlers::handle(cli));
    // A timed-out script keeps its blocking thread busy; don't wait on it
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    result
}
