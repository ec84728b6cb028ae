use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::{Map, Value};

use crate::mode::Mode;
use crate::paths::ProjectPaths;
use crate::pipeline::rules::TransformRule;

pub const NODE_ENV_CONSTANT: &str = "process.env.NODE_ENV";
pub const SERVICE_WORKER_CONSTANT: &str = "process.env.SERVICE_WORKER";
pub const PRODUCT_MEDIA_PATH_CONSTANT: &str = "process.env.BACKEND_PRODUCT_MEDIA_PATH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginKind {
    RootComponents,
    DefineConstants,
    CriticalCss,
    ServiceWorker,
    HotModuleReplacement,
    DevServerReady,
    Upward,
}

#[derive(Debug)]
struct PluginInstance {
    kind: PluginKind,
    options: Value,
}

/// Opaque handle to a plugin constructed with its configuration object.
///
/// Clones share one instance. That is how a module rule and a plugin hook can be
/// backed by the same plugin.
#[derive(Debug, Clone)]
pub struct PluginDescriptor(Arc<PluginInstance>);

impl PluginDescriptor {
    pub fn new(kind: PluginKind, options: Value) -> Self {
        Self(Arc::new(PluginInstance { kind, options }))
    }

    pub fn kind(&self) -> PluginKind {
        self.0.kind
    }

    pub fn options(&self) -> &Value {
        &self.0.options
    }

    pub fn same_instance(&self, other: &PluginDescriptor) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The literal injected for `key`, if this is the constant-injection plugin.
    pub fn defined(&self, key: &str) -> Option<Value> {
        if self.kind() != PluginKind::DefineConstants {
            return None;
        }
        let code = self.options().get(key)?.as_str()?;
        serde_json::from_str(code).ok()
    }
}

impl Serialize for PluginDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PluginDescriptor", 2)?;
        state.serialize_field("plugin", &self.kind())?;
        state.serialize_field("options", self.options())?;
        state.end()
    }
}

/// The critical-CSS collaborator's rule and plugin, sharing one instance.
#[derive(Debug, Clone)]
pub struct CriticalCss {
    pub rule: TransformRule,
    pub plugin: PluginDescriptor,
}

/// What the bundled bootstrap module sees for its service-worker registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceWorkerFlag {
    /// Injected as `false`; the bootstrap module skips registration
    Disabled,
    Register(String),
}

impl ServiceWorkerFlag {
    /// Registration happens in production, or in any mode while debugging the worker.
    pub fn resolve(mode: Mode, debugging: bool, file_name: &str) -> Self {
        if mode.is_production() || debugging {
            Self::Register(file_name.to_string())
        } else {
            Self::Disabled
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Register(_))
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Disabled => Value::Bool(false),
            Self::Register(name) => Value::String(name.clone()),
        }
    }
}

/// Compile-time constants, keyed by the expression they replace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinedConstants(IndexMap<String, Value>);

impl DefinedConstants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Constants as JSON source literals, the form the injection plugin substitutes.
    pub fn to_code(&self) -> Value {
        let code: Map<String, Value> = self
            .0
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.to_string())))
            .collect();
        Value::Object(code)
    }
}

/// Options handed to the service-worker generation plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceWorkerOptions {
    pub mode: Mode,
    pub enable_service_worker_debugging: bool,
    pub service_worker_file_name: String,
    pub paths: ProjectPaths,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clones_share_an_instance() {
        let plugin = PluginDescriptor::new(PluginKind::CriticalCss, json!({ "mode": "production" }));
        let other = PluginDescriptor::new(PluginKind::CriticalCss, json!({ "mode": "production" }));
        assert!(plugin.same_instance(&plugin.clone()));
        assert!(!plugin.same_instance(&other));
    }

    #[test]
    fn constants_render_as_literals() {
        let mut constants = DefinedConstants::new();
        constants.insert(NODE_ENV_CONSTANT, json!("production"));
        constants.insert(SERVICE_WORKER_CONSTANT, json!(false));

        let code = constants.to_code();
        assert_eq!(code[NODE_ENV_CONSTANT], "\"production\"");
        assert_eq!(code[SERVICE_WORKER_CONSTANT], "false");

        let plugin = PluginDescriptor::new(PluginKind::DefineConstants, code);
        assert_eq!(plugin.defined(NODE_ENV_CONSTANT), Some(json!("production")));
        assert_eq!(plugin.defined(SERVICE_WORKER_CONSTANT), Some(json!(false)));
        assert_eq!(plugin.defined("process.env.MISSING"), None);
    }

    #[test]
    fn defined_ignores_other_plugins() {
        let plugin = PluginDescriptor::new(PluginKind::RootComponents, json!({ "mode": "\"x\"" }));
        assert_eq!(plugin.defined("mode"), None);
    }

    #[test]
    fn serializes_kind_and_options() {
        let plugin = PluginDescriptor::new(PluginKind::HotModuleReplacement, json!({}));
        assert_eq!(
            serde_json::to_value(&plugin).unwrap(),
            json!({ "plugin": "hot-module-replacement", "options": {} })
        );
    }
}
