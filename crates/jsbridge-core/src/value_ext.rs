//! Convenience accessors on engine value handles.
//!
//! Native code mostly needs two things from a bridged value: whether it can be
//! called, and a way to pin a constant onto a script object so scripts cannot
//! overwrite it. [`JsValueExt`] adds both to [`JsValue`] and [`JsObject`].

use boa_engine::object::JsObject;
use boa_engine::property::PropertyDescriptor;
use boa_engine::{Context, JsValue, js_string};

use crate::{BridgeError, BridgeResult, NativeValue};

/// Extension methods for bridged script values.
pub trait JsValueExt {
    /// Whether the value can be invoked as a function.
    ///
    /// True for plain and arrow functions, classes, bound functions, native
    /// functions and callable proxies. Never fails.
    fn is_function(&self) -> bool;

    /// Define a non-writable, non-configurable, enumerable data property.
    ///
    /// After this call, sloppy-mode assignments from script are ignored and
    /// strict-mode assignments throw a `TypeError`. Redefining the same name
    /// with the same value is a no-op.
    ///
    /// # Errors
    /// - [`BridgeError::NotAnObject`] if the receiver is a primitive
    /// - [`BridgeError::Conversion`] if the value cannot be materialized
    /// - [`BridgeError::PropertyRejected`] if the engine refuses the definition,
    ///   e.g. the object is frozen or the name is already pinned to another value
    fn define_read_only_property<V>(
        &self,
        name: &str,
        value: V,
        context: &mut Context,
    ) -> BridgeResult<()>
    where
        V: Into<NativeValue>;
}

impl JsValueExt for JsValue {
    fn is_function(&self) -> bool {
        self.is_callable()
    }

    fn define_read_only_property<V>(
        &self,
        name: &str,
        value: V,
        context: &mut Context,
    ) -> BridgeResult<()>
    where
        V: Into<NativeValue>,
    {
        let object = self.as_object().ok_or_else(|| BridgeError::NotAnObject {
            operation: "define_read_only_property",
            found: self.type_of(),
        })?;
        define_read_only(&object, name, value.into(), context)
    }
}

impl JsValueExt for JsObject {
    fn is_function(&self) -> bool {
        self.is_callable()
    }

    fn define_read_only_property<V>(
        &self,
        name: &str,
        value: V,
        context: &mut Context,
    ) -> BridgeResult<()>
    where
        V: Into<NativeValue>,
    {
        define_read_only(self, name, value.into(), context)
    }
}

fn define_read_only(
    object: &JsObject,
    name: &str,
    value: NativeValue,
    context: &mut Context,
) -> BridgeResult<()> {
    let js_value = value.into_js(context)?;
    let descriptor = PropertyDescriptor::builder()
        .value(js_value)
        .writable(false)
        .enumerable(true)
        .configurable(false)
        .build();

    object
        .define_property_or_throw(js_string!(name), descriptor, context)
        .map_err(|err| {
            tracing::warn!(property = name, "read-only definition rejected: {err}");
            BridgeError::PropertyRejected {
                name: name.to_owned(),
                reason: err.to_string(),
            }
        })?;

    tracing::trace!(property = name, "defined read-only property");
    Ok(())
}
