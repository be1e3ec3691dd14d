//! JavaScript/JSON value conversion utilities.

use boa_engine::object::JsObject;
use boa_engine::object::builtins::JsArray;
use boa_engine::property::PropertyKey;
use boa_engine::{Context, JsNativeError, JsResult, JsValue, js_string};
use serde_json::{Map, Number, Value};

use crate::{BridgeError, BridgeResult, JsValueExt as _};

/// Largest integer a double represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Deepest object/array nesting converted to JSON.
pub const MAX_DEPTH: usize = 128;

/// Longest array converted to JSON. Sparse arrays count their holes.
pub const MAX_ARRAY_LENGTH: u32 = 1 << 20;

/// Convert JS value to JSON
///
/// # Errors
/// Returns error if conversion fails
pub fn js_to_json(value: &JsValue, context: &mut Context) -> BridgeResult<Value> {
    use tracing::{Level, span};

    let span = span!(Level::DEBUG, "js_to_json");
    let enter_guard = span.enter();
    let result = js_to_json_static(value, context)
        .map_err(|err| BridgeError::Conversion(format!("Failed to convert JS value: {err}")));
    drop(enter_guard);
    result
}

/// Convert JSON to JS value
///
/// # Errors
/// Returns error if conversion fails
pub fn json_to_js(value: &Value, context: &mut Context) -> BridgeResult<JsValue> {
    json_to_js_static(value, context)
        .map_err(|err| BridgeError::Conversion(format!("Failed to convert JSON value: {err}")))
}

/// Convert JS value to JSON (static version for native functions)
///
/// # Errors
/// Returns error if a property getter throws, the value is cyclic, nests deeper
/// than [`MAX_DEPTH`] or contains an array longer than [`MAX_ARRAY_LENGTH`]
pub fn js_to_json_static(value: &JsValue, context: &mut Context) -> JsResult<Value> {
    let mut ancestors = Vec::new();
    value_to_json(value, &mut ancestors, context)
}

fn value_to_json(
    value: &JsValue,
    ancestors: &mut Vec<JsObject>,
    context: &mut Context,
) -> JsResult<Value> {
    if value.is_null() || value.is_undefined() || value.is_function() {
        Ok(Value::Null)
    } else if let Some(boolean) = value.as_boolean() {
        Ok(Value::Bool(boolean))
    } else if let Some(number) = value.as_number() {
        Ok(number_to_json(number))
    } else if let Some(string) = value.as_string() {
        Ok(Value::String(string.to_std_string_escaped()))
    } else if let Some(obj) = value.as_object() {
        if ancestors
            .iter()
            .any(|ancestor| JsObject::equals(ancestor, &obj))
        {
            return Err(JsNativeError::typ()
                .with_message("cyclic value")
                .into());
        }
        if ancestors.len() >= MAX_DEPTH {
            let message = format!("value nested deeper than {MAX_DEPTH} levels");
            return Err(JsNativeError::range()
                .with_message(message)
                .into());
        }

        let depth = ancestors.len();
        ancestors.push(obj.clone());
        let result = if obj.is_array() {
            array_to_json(&obj, ancestors, context)
        } else {
            object_to_json(&obj, ancestors, context)
        };
        ancestors.truncate(depth);
        result
    } else {
        Ok(Value::String(value.display().to_string()))
    }
}

fn number_to_json(number: f64) -> Value {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < MAX_SAFE_INTEGER {
        Value::Number(Number::from(number as i64))
    } else {
        Number::from_f64(number).map_or(Value::Null, Value::Number)
    }
}

fn array_to_json(
    obj: &JsObject,
    ancestors: &mut Vec<JsObject>,
    context: &mut Context,
) -> JsResult<Value> {
    let length = obj.get(js_string!("length"), context)?.to_u32(context)?;
    if length > MAX_ARRAY_LENGTH {
        let message = format!("array length {length} exceeds {MAX_ARRAY_LENGTH} elements");
        return Err(JsNativeError::range()
            .with_message(message)
            .into());
    }

    let mut array = Vec::new();
    for index in 0..length {
        let element = obj.get(index, context)?;
        array.push(value_to_json(&element, ancestors, context)?);
    }
    Ok(Value::Array(array))
}

fn object_to_json(
    obj: &JsObject,
    ancestors: &mut Vec<JsObject>,
    context: &mut Context,
) -> JsResult<Value> {
    let mut map = Map::new();
    for key in obj.own_property_keys(context)? {
        if matches!(key, PropertyKey::Symbol(_)) {
            continue;
        }
        let key_string = JsValue::from(key.clone()).to_string(context)?;
        let prop_value = obj.get(key, context)?;
        map.insert(
            key_string.to_std_string_escaped(),
            value_to_json(&prop_value, ancestors, context)?,
        );
    }
    Ok(Value::Object(map))
}

/// Convert JSON to JS value (static version for native functions)
///
/// # Errors
/// Returns error if an array element or property cannot be set
pub fn json_to_js_static(value: &Value, context: &mut Context) -> JsResult<JsValue> {
    match value {
        Value::Null => Ok(JsValue::null()),
        Value::Bool(boolean) => Ok(JsValue::from(*boolean)),
        Value::Number(number) => Ok(number.as_i64().map_or_else(
            || number.as_f64().map_or_else(JsValue::nan, JsValue::from),
            JsValue::from,
        )),
        Value::String(string) => Ok(JsValue::from(js_string!(string.as_str()))),
        Value::Array(array) => {
            let js_array = JsArray::new(context);
            for (index, val) in array.iter().enumerate() {
                let js_val = json_to_js_static(val, context)?;
                js_array.set(index, js_val, true, context)?;
            }
            Ok(js_array.into())
        }
        Value::Object(obj) => {
            let js_obj = JsObject::with_object_proto(context.intrinsics());
            for (key, val) in obj {
                let js_val = json_to_js_static(val, context)?;
                js_obj.set(js_string!(key.as_str()), js_val, true, context)?;
            }
            Ok(js_obj.into())
        }
    }
}
