//! Host values that can be handed to the script engine.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use boa_engine::object::{FunctionObjectBuilder, JsObject};
use boa_engine::{Context, JsValue, NativeFunction, js_string};
use serde_json::Value;

use crate::BridgeResult;
use crate::conversion::json_to_js;

/// A native value on its way into a script context.
///
/// Anything implementing `Into<NativeValue>` can be passed wherever the bridge
/// accepts a host value, e.g. [`crate::JsValueExt::define_read_only_property`].
pub enum NativeValue {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// A boolean
    Bool(bool),
    /// A number; all script numbers are doubles
    Number(f64),
    /// A string
    String(String),
    /// A JSON document, materialized as plain objects and arrays
    Json(Value),
    /// A host function exposed as a callable script function
    Function(NativeFunction),
    /// A value that already lives in the engine
    Js(JsValue),
}

impl NativeValue {
    /// Convert into an engine value owned by `context`.
    ///
    /// # Errors
    /// Returns an error if a JSON document cannot be materialized
    pub fn into_js(self, context: &mut Context) -> BridgeResult<JsValue> {
        match self {
            Self::Undefined => Ok(JsValue::undefined()),
            Self::Null => Ok(JsValue::null()),
            Self::Bool(boolean) => Ok(JsValue::from(boolean)),
            Self::Number(number) => Ok(JsValue::from(number)),
            Self::String(string) => Ok(JsValue::from(js_string!(string.as_str()))),
            Self::Json(json) => json_to_js(&json, context),
            Self::Function(native) => {
                let function = FunctionObjectBuilder::new(context.realm(), native).build();
                Ok(JsValue::from(function))
            }
            Self::Js(value) => Ok(value),
        }
    }
}

impl Debug for NativeValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Undefined => formatter.write_str("Undefined"),
            Self::Null => formatter.write_str("Null"),
            Self::Bool(boolean) => formatter.debug_tuple("Bool").field(boolean).finish(),
            Self::Number(number) => formatter.debug_tuple("Number").field(number).finish(),
            Self::String(string) => formatter.debug_tuple("String").field(string).finish(),
            Self::Json(json) => formatter.debug_tuple("Json").field(json).finish(),
            Self::Function(_) => formatter.write_str("Function(<native>)"),
            Self::Js(value) => formatter
                .debug_tuple("Js")
                .field(&value.type_of())
                .finish(),
        }
    }
}

impl From<bool> for NativeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for NativeValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for NativeValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<f64> for NativeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for NativeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for NativeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Value> for NativeValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<NativeFunction> for NativeValue {
    fn from(value: NativeFunction) -> Self {
        Self::Function(value)
    }
}

impl From<JsValue> for NativeValue {
    fn from(value: JsValue) -> Self {
        Self::Js(value)
    }
}

impl From<JsObject> for NativeValue {
    fn from(value: JsObject) -> Self {
        Self::Js(JsValue::from(value))
    }
}
