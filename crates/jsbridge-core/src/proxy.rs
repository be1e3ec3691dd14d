//! Host API objects exposed to script.
//!
//! A proxy is a plain script object described by the host: an API name
//! (`Ti.UI.Label`), a set of writable defaults, and a set of read-only
//! accessors that script can observe but not change.

use std::collections::BTreeMap;

use boa_engine::object::JsObject;
use boa_engine::{Context, js_string};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::conversion::json_to_js;
use crate::{BridgeError, BridgeResult, JsValueExt as _};

/// Property holding the proxy's API name.
pub const API_NAME_PROPERTY: &str = "apiName";

/// Description of a host API object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyTemplate {
    /// Fully qualified API name, exposed read-only as `apiName`
    pub api_name: String,
    /// Writable properties and their initial values
    #[serde(default)]
    pub defaults: BTreeMap<String, Value>,
    /// Read-only properties
    #[serde(default)]
    pub read_only: BTreeMap<String, Value>,
}

impl ProxyTemplate {
    /// Create an empty template for the given API name
    pub fn new(api_name: impl Into<String>) -> Self {
        Self {
            api_name: api_name.into(),
            defaults: BTreeMap::new(),
            read_only: BTreeMap::new(),
        }
    }

    /// Add a writable property with an initial value
    #[must_use]
    pub fn with_default(mut self, name: impl Into<String>, value: Value) -> Self {
        self.defaults.insert(name.into(), value);
        self
    }

    /// Add a read-only property
    #[must_use]
    pub fn with_read_only(mut self, name: impl Into<String>, value: Value) -> Self {
        self.read_only.insert(name.into(), value);
        self
    }

    /// Create a script object from this template.
    ///
    /// Defaults are set first, then read-only properties, then `apiName`, so a
    /// name listed in both maps ends up read-only.
    ///
    /// # Errors
    /// Returns an error if a value cannot be converted or a definition is rejected
    pub fn instantiate(&self, context: &mut Context) -> BridgeResult<JsObject> {
        let object = JsObject::with_object_proto(context.intrinsics());

        for (name, value) in &self.defaults {
            let js_value = json_to_js(value, context)?;
            object
                .set(js_string!(name.as_str()), js_value, true, context)
                .map_err(|err| BridgeError::PropertyRejected {
                    name: name.clone(),
                    reason: err.to_string(),
                })?;
        }

        for (name, value) in &self.read_only {
            object.define_read_only_property(name, value.clone(), context)?;
        }

        object.define_read_only_property(API_NAME_PROPERTY, self.api_name.as_str(), context)?;

        tracing::debug!(
            api_name = %self.api_name,
            defaults = self.defaults.len(),
            read_only = self.read_only.len(),
            "instantiated proxy"
        );
        Ok(object)
    }

    /// Instantiate the template and bind it as a read-only global.
    ///
    /// # Errors
    /// Returns an error if instantiation fails or the global name is already taken
    /// by a non-configurable property
    pub fn install(&self, global_name: &str, context: &mut Context) -> BridgeResult<JsObject> {
        let object = self.instantiate(context)?;
        context
            .global_object()
            .define_read_only_property(global_name, object.clone(), context)?;
        Ok(object)
    }
}
