//! Command handlers for CLI operations

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use jsbridge_core::{BridgeConfig, ScriptRuntime};
use serde_json::{Value, to_string_pretty};
use tokio::fs as async_fs;

use crate::cli::{Cli, Commands};

/// Dispatch a parsed command line
///
/// # Errors
/// Returns an error if configuration loading, evaluation or output fails
pub async fn handle(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let mut runtime = ScriptRuntime::from_config(config);
    if let Some(timeout_ms) = cli.timeout_ms {
        runtime = runtime.with_timeout(Duration::from_millis(timeout_ms));
    }

    match cli.command {
        Commands::Run { file } => handle_run(&runtime, file).await,
        Commands::Eval { code } => handle_eval(&runtime, &code).await,
        Commands::Inspect { code } => handle_inspect(&runtime, &code).await,
        Commands::Config => handle_config(&runtime),
    }
}

fn load_config(path: Option<&Path>) -> Result<BridgeConfig> {
    let Some(path) = path else {
        tracing::debug!("No config given, using defaults");
        return Ok(BridgeConfig::default());
    };
    BridgeConfig::load_from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}

async fn handle_run(runtime: &ScriptRuntime, file: PathBuf) -> Result<()> {
    let code = async_fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read script {}", file.display()))?;
    tracing::info!(script = %file.display(), "running script");
    handle_eval(runtime, &code).await
}

async fn handle_eval(runtime: &ScriptRuntime, code: &str) -> Result<()> {
    let result = runtime.execute(code).await?;
    print_json(&result)
}

async fn handle_inspect(runtime: &ScriptRuntime, code: &str) -> Result<()> {
    let inspection = runtime.inspect(code).await?;
    print_json(&serde_json::to_value(inspection)?)
}

fn handle_config(runtime: &ScriptRuntime) -> Result<()> {
    let rendered = runtime.config().to_toml_string()?;
    #[allow(clippy::print_stdout, reason = "Command output")]
    {
        print!("{rendered}");
    }
    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    let rendered = to_string_pretty(value)?;
    #[allow(clippy::print_stdout, reason = "Command output")]
    {
        println!("{rendered}");
    }
    Ok(())
}
