//! Configured script runtime built on the Boa engine.

use std::time::{Duration, Instant};

use boa_engine::{Context, JsValue, Source};
use serde::Serialize;
use serde_json::Value;
use tokio::task::spawn_blocking;
use tokio::time;

use crate::config::ProxyConfig;
use crate::conversion::js_to_json;
use crate::{BridgeConfig, BridgeError, BridgeResult, JsValueExt as _, ProxyTemplate};

/// What native code learns about a script completion value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inspection {
    /// Whether the value is callable
    pub is_function: bool,
    /// Result of `typeof`
    pub type_of: String,
    /// JSON form of the value (functions map to `null`)
    pub value: Value,
}

/// Script runtime that evaluates code in freshly prepared contexts.
///
/// Every evaluation gets its own [`Context`] with the configured read-only
/// globals and proxies installed. The engine context is `!Send`, so evaluation
/// runs on the blocking pool under a wall-clock timeout.
#[derive(Debug, Clone, Default)]
pub struct ScriptRuntime {
    config: BridgeConfig,
}

impl ScriptRuntime {
    /// Create a runtime with default limits and no globals
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runtime from configuration
    pub fn from_config(config: BridgeConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Set the execution timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.execution.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Define a read-only global in every context
    #[must_use]
    pub fn with_global(mut self, name: impl Into<String>, value: Value) -> Self {
        self.config.globals.insert(name.into(), value);
        self
    }

    /// Install a proxy under a global name in every context
    #[must_use]
    pub fn with_proxy(mut self, global: impl Into<String>, template: ProxyTemplate) -> Self {
        self.config.proxies.push(ProxyConfig {
            global: global.into(),
            template,
        });
        self
    }

    /// Build a context with limits, globals and proxies applied.
    ///
    /// # Errors
    /// Returns an error if a global or proxy cannot be defined
    pub fn prepare_context(&self) -> BridgeResult<Context> {
        prepare_context(&self.config)
    }

    /// Evaluate code and return its completion value as JSON.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The context cannot be prepared
    /// - The code throws or hits a runtime limit
    /// - Execution times out
    pub async fn execute(&self, code: &str) -> BridgeResult<Value> {
        self.run(code, |value, context| js_to_json(&value, context))
            .await
    }

    /// Evaluate code and describe its completion value.
    ///
    /// # Errors
    /// Same as [`ScriptRuntime::execute`]
    pub async fn inspect(&self, code: &str) -> BridgeResult<Inspection> {
        self.run(code, |value, context| {
            Ok(Inspection {
                is_function: value.is_function(),
                type_of: value.type_of().to_owned(),
                value: js_to_json(&value, context)?,
            })
        })
        .await
    }

    async fn run<T, F>(&self, code: &str, finish: F) -> BridgeResult<T>
    where
        T: Send + 'static,
        F: FnOnce(JsValue, &mut Context) -> BridgeResult<T> + Send + 'static,
    {
        let exec_start = Instant::now();
        let config = self.config.clone();
        let code = code.to_owned();
        let timeout = config.execution.timeout();
        let timeout_ms = config.execution.timeout_ms;

        let result = time::timeout(timeout, async move {
            // Boa context is !Send
            spawn_blocking(move || execute_sync(&code, &config, finish))
                .await
                .map_err(|err| BridgeError::Join(err.to_string()))?
        })
        .await
        .map_err(|_| BridgeError::Timeout(timeout_ms))?;

        tracing::debug!(
            total_time_secs = exec_start.elapsed().as_secs_f64(),
            ok = result.is_ok(),
            "evaluation finished"
        );

        result
    }
}

fn execute_sync<T, F>(code: &str, config: &BridgeConfig, finish: F) -> BridgeResult<T>
where
    F: FnOnce(JsValue, &mut Context) -> BridgeResult<T>,
{
    let ctx_start = Instant::now();
    let mut context = prepare_context(config)?;
    let ctx_time = ctx_start.elapsed();

    let eval_start = Instant::now();
    let value = context
        .eval(Source::from_bytes(code))
        .map_err(|err| BridgeError::Script(err.to_string()))?;
    let eval_time = eval_start.elapsed();

    tracing::debug!(
        ctx_time_secs = ctx_time.as_secs_f64(),
        eval_time_secs = eval_time.as_secs_f64(),
        "[EVAL] timing breakdown"
    );

    finish(value, &mut context)
}

fn prepare_context(config: &BridgeConfig) -> BridgeResult<Context> {
    let mut context = Context::default();

    let limits = context.runtime_limits_mut();
    limits.set_loop_iteration_limit(config.execution.loop_iteration_limit);
    if let Some(limit) = config.execution.recursion_limit {
        limits.set_recursion_limit(limit);
    }

    let global = context.global_object();
    for (name, value) in &config.globals {
        global.define_read_only_property(name, value.clone(), &mut context)?;
    }

    for proxy in &config.proxies {
        proxy.template.install(&proxy.global, &mut context)?;
    }

    Ok(context)
}
