//! Native-side conveniences for values living in an embedded JavaScript engine.
//!
//! This crate provides:
//! - [`JsValueExt`]: callability checks and read-only property definition on
//!   engine value handles
//! - [`NativeValue`] and JSON conversion for handing host values to script
//! - [`ProxyTemplate`] for host API objects with read-only accessors
//! - [`ScriptRuntime`], a configured runtime that evaluates code off the async
//!   executor
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::print_stdout,
        clippy::print_stderr,
        reason = "Allow for tests"
    )
)]

/// TOML configuration.
mod config;
/// JSON and script value conversion.
pub mod conversion;
/// Error types.
mod error;
/// Host values crossing into script.
mod native;
/// Host API objects.
mod proxy;
/// Configured runtime.
mod runtime;
/// Extension trait on engine values.
mod value_ext;

pub use config::{
    BridgeConfig, DEFAULT_LOOP_ITERATION_LIMIT, DEFAULT_TIMEOUT_MS, ExecutionConfig, ProxyConfig,
};
pub use error::{BridgeError, BridgeResult};
pub use native::NativeValue;
pub use proxy::{API_NAME_PROPERTY, ProxyTemplate};
pub use runtime::{Inspection, ScriptRuntime};
pub use value_ext::JsValueExt;

/// Re-export of the embedded engine so callers use the same version.
pub use boa_engine;
