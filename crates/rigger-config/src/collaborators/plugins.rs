use std::fmt;
use std::path::Path;

use serde_json::{Value, json};

use crate::error::Result;
use crate::mode::Mode;
use crate::pipeline::{
    CriticalCss, DefinedConstants, DevServerDescriptor, LoaderDescriptor, PluginDescriptor,
    PluginKind, RuleKind, ServiceWorkerOptions, TransformRule,
};

pub const CRITICAL_CSS_PATTERN: &str = r"\.css$";

/// Builds plugin descriptors for the assembler.
///
/// Factories that depend on the dev server take its descriptor by reference, so they
/// cannot be called before the server has been provisioned.
pub trait PluginFactory: Send + Sync + fmt::Debug {
    fn root_components(&self, mode: Mode) -> PluginDescriptor;

    fn define_constants(&self, constants: &DefinedConstants) -> PluginDescriptor;

    /// The critical-CSS rule and plugin. The rule's owner must be the returned plugin.
    fn critical_css(&self, mode: Mode) -> Result<CriticalCss>;

    fn service_worker(&self, options: &ServiceWorkerOptions) -> PluginDescriptor;

    fn hot_module_replacement(&self) -> PluginDescriptor;

    fn dev_server_ready(&self, server: &DevServerDescriptor) -> PluginDescriptor;

    fn upward(&self, server: &DevServerDescriptor, definition: &Path) -> PluginDescriptor;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPlugins;

impl PluginFactory for StandardPlugins {
    fn root_components(&self, mode: Mode) -> PluginDescriptor {
        PluginDescriptor::new(PluginKind::RootComponents, json!({ "mode": mode.as_str() }))
    }

    fn define_constants(&self, constants: &DefinedConstants) -> PluginDescriptor {
        PluginDescriptor::new(PluginKind::DefineConstants, constants.to_code())
    }

    fn critical_css(&self, mode: Mode) -> Result<CriticalCss> {
        let plugin = PluginDescriptor::new(PluginKind::CriticalCss, json!({ "mode": mode.as_str() }));
        let rule = TransformRule::new(RuleKind::CriticalCss, CRITICAL_CSS_PATTERN)?
            .stage(LoaderDescriptor::new(
                "critical-css-loader",
                json!({ "mode": mode.as_str() }),
            ))
            .stage(LoaderDescriptor::new(
                "css-loader",
                json!({
                    "importLoaders": 1,
                    "modules": true,
                    "localIdentName": "[name]-[local]-[hash:base64:3]",
                }),
            ))
            .owned_by(plugin.clone());
        Ok(CriticalCss { rule, plugin })
    }

    fn service_worker(&self, options: &ServiceWorkerOptions) -> PluginDescriptor {
        PluginDescriptor::new(
            PluginKind::ServiceWorker,
            json!({
                "mode": options.mode.as_str(),
                "enableServiceWorkerDebugging": options.enable_service_worker_debugging,
                "serviceWorkerFileName": options.service_worker_file_name,
                "paths": {
                    "root": options.paths.root.to_string_lossy(),
                    "src": options.paths.src.to_string_lossy(),
                    "output": options.paths.output.to_string_lossy(),
                },
            }),
        )
    }

    fn hot_module_replacement(&self) -> PluginDescriptor {
        PluginDescriptor::new(PluginKind::HotModuleReplacement, json!({}))
    }

    fn dev_server_ready(&self, server: &DevServerDescriptor) -> PluginDescriptor {
        PluginDescriptor::new(
            PluginKind::DevServerReady,
            json!({
                "origin": server.origin(),
                "publicPath": server.public_path,
            }),
        )
    }

    fn upward(&self, server: &DevServerDescriptor, definition: &Path) -> PluginDescriptor {
        let backend = server
            .backend_domain
            .as_ref()
            .map_or(Value::Null, |domain| Value::String(domain.clone()));
        PluginDescriptor::new(
            PluginKind::Upward,
            json!({
                "definition": definition.to_string_lossy(),
                "origin": server.origin(),
                "backendDomain": backend,
            }),
        )
    }
}
