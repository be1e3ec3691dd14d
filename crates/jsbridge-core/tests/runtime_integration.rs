//! End-to-end tests for the configured script runtime
#![cfg_attr(
    test,
    allow(
        dead_code,
        missing_docs,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

use std::time::Duration;

use jsbridge_core::boa_engine::{Context, JsResult, JsValue, NativeFunction, Source};
use jsbridge_core::{
    BridgeConfig, BridgeError, DEFAULT_LOOP_ITERATION_LIMIT, JsValueExt as _, ProxyTemplate,
    ScriptRuntime,
};
use serde_json::json;

const CONFIG: &str = r#"
[execution]
timeout_ms = 5000
loop_iteration_limit = 100000

[globals]
SDK_VERSION = "12.0.0"
PLATFORM = { name = "linux", arch = "x86_64" }

[[proxies]]
global = "label"
api_name = "Ti.UI.Label"

[proxies.defaults]
text = ""
ellipsize = true

[proxies.read_only]
lineCount = 0
"#;

fn configured_runtime() -> ScriptRuntime {
    ScriptRuntime::from_config(BridgeConfig::from_toml_str(CONFIG).unwrap())
}

fn double(_this: &JsValue, args: &[JsValue], ctx: &mut Context) -> JsResult<JsValue> {
    let input = args.first().cloned().unwrap_or_else(JsValue::undefined).to_number(ctx)?;
    Ok(JsValue::from(input * 2.0))
}

#[tokio::test]
async fn test_configured_globals_are_read_only() {
    let result = configured_runtime()
        .execute("SDK_VERSION = '0.0.1'; [SDK_VERSION, PLATFORM.name]")
        .await
        .unwrap();
    assert_eq!(result, json!(["12.0.0", "linux"]));
}

#[tokio::test]
async fn test_strict_write_to_global_throws() {
    let result = configured_runtime()
        .execute("'use strict'; SDK_VERSION = '0.0.1';")
        .await;
    assert!(matches!(result, Err(BridgeError::Script(_))));
}

#[tokio::test]
async fn test_configured_proxy_is_installed() {
    let result = configured_runtime()
        .execute(
            "label.text = 'Hi'; label.lineCount = 4; \
             ({ api: label.apiName, text: label.text, lines: label.lineCount, ellipsize: label.ellipsize })",
        )
        .await
        .unwrap();
    assert_eq!(
        result,
        json!({"api": "Ti.UI.Label", "text": "Hi", "lines": 0, "ellipsize": true})
    );
}

#[tokio::test]
async fn test_each_evaluation_gets_fresh_context() {
    let runtime = configured_runtime();
    runtime.execute("globalThis.leaked = 1; label.text = 'changed'").await.unwrap();
    let result = runtime.execute("[typeof leaked, label.text]").await.unwrap();
    assert_eq!(result, json!(["undefined", ""]));
}

#[tokio::test]
async fn test_builder_proxy_and_global() {
    let runtime = ScriptRuntime::new()
        .with_global("MAX_ITEMS", json!(50))
        .with_proxy(
            "view",
            ProxyTemplate::new("Ti.UI.View").with_read_only("children", json!([])),
        );
    let result = runtime
        .execute("view.children = [1]; MAX_ITEMS = 1; [view.apiName, view.children.length, MAX_ITEMS]")
        .await
        .unwrap();
    assert_eq!(result, json!(["Ti.UI.View", 0, 50]));
}

#[tokio::test]
async fn test_inspect_distinguishes_callables() {
    let runtime = ScriptRuntime::new();

    let function = runtime.inspect("(function tap() {})").await.unwrap();
    assert!(function.is_function);
    assert_eq!(function.type_of, "function");

    let class = runtime.inspect("(class Button {})").await.unwrap();
    assert!(class.is_function);

    let object = runtime.inspect("({ onClick: null })").await.unwrap();
    assert!(!object.is_function);
    assert_eq!(object.type_of, "object");
    assert_eq!(object.value, json!({"onClick": null}));

    let number = runtime.inspect("3").await.unwrap();
    assert!(!number.is_function);
    assert_eq!(number.type_of, "number");
}

#[tokio::test]
async fn test_script_error_is_reported() {
    let result = ScriptRuntime::new()
        .execute("throw new Error('boom')")
        .await;
    match result {
        Err(BridgeError::Script(message)) => assert!(message.contains("boom"), "{message}"),
        other => panic!("expected script error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_syntax_error_is_reported() {
    let result = ScriptRuntime::new().execute("let = ;").await;
    assert!(matches!(result, Err(BridgeError::Script(_))));
}

#[tokio::test]
async fn test_loop_iteration_limit_stops_runaway_loop() {
    let result = configured_runtime().execute("while (true) {}").await;
    assert!(matches!(result, Err(BridgeError::Script(_))));
}

#[tokio::test]
async fn test_recursion_limit_stops_deep_recursion() {
    let mut config = BridgeConfig::default();
    config.execution.recursion_limit = Some(32);
    let result = ScriptRuntime::from_config(config)
        .execute("function dive(depth) { return dive(depth + 1); } dive(0)")
        .await;
    assert!(matches!(result, Err(BridgeError::Script(_))));
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let result = ScriptRuntime::new()
        .with_timeout(Duration::from_millis(10))
        .execute("while (true) {}")
        .await;
    assert!(matches!(result, Err(BridgeError::Timeout(10))));
}

#[tokio::test]
async fn test_default_loop_limit_ends_runaway_loop() {
    let runtime = ScriptRuntime::new();
    assert_eq!(
        runtime.config().execution.loop_iteration_limit,
        DEFAULT_LOOP_ITERATION_LIMIT
    );
    let result = runtime.execute("while (true) {}").await;
    assert!(matches!(result, Err(BridgeError::Script(_))));
}

#[tokio::test]
async fn test_cyclic_result_is_a_conversion_error() {
    let runtime = ScriptRuntime::new();
    let executed = runtime.execute("const node = {}; node.self = node; node").await;
    assert!(matches!(executed, Err(BridgeError::Conversion(_))));

    let inspected = runtime.inspect("const node = {}; node.self = node; node").await;
    assert!(matches!(inspected, Err(BridgeError::Conversion(_))));
}

#[tokio::test]
async fn test_huge_sparse_array_is_a_conversion_error() {
    let result = ScriptRuntime::new()
        .execute("const items = []; items.length = 4294967295; items")
        .await;
    assert!(matches!(result, Err(BridgeError::Conversion(_))));
}

#[test]
fn test_conflicting_global_and_proxy_fail_preparation() {
    let runtime = ScriptRuntime::new()
        .with_global("label", json!("taken"))
        .with_proxy("label", ProxyTemplate::new("Ti.UI.Label"));
    assert!(matches!(
        runtime.prepare_context(),
        Err(BridgeError::PropertyRejected { .. })
    ));
}

#[test]
fn test_native_host_function_on_prepared_context() {
    let runtime = configured_runtime();
    let mut context = runtime.prepare_context().unwrap();

    let global = context.global_object();
    global
        .define_read_only_property("double", NativeFunction::from_fn_ptr(double), &mut context)
        .unwrap();

    let value = context
        .eval(Source::from_bytes("double = null; double(21)"))
        .unwrap();
    assert_eq!(value.as_number(), Some(42.0));

    let handle = context.eval(Source::from_bytes("double")).unwrap();
    assert!(handle.is_function());
}
