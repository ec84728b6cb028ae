//! The assembled pipeline configuration and its parts.
//!
//! A [`PipelineConfig`] is only produced by [`Assembler`](crate::Assembler). It has no
//! public constructor and no mutators, so a config handed to the bundling engine always
//! carries exactly one mode's extension: dev-server settings and a source-map strategy in
//! development, a minimizer and performance hints in production.

pub mod dev_server;
pub mod optimization;
pub mod plugin;
pub mod rules;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::assembler::{BaseStages, ModeStages};
use crate::collaborators::ResolverConfig;
use crate::error::Result;
use crate::mode::Mode;

pub use dev_server::{DevServerDescriptor, SourceMapStrategy, StatsPolicy, TlsConfig};
pub use optimization::{
    CacheGroup, ChunkScope, MinimizerDescriptor, OptimizationPolicy, PerformanceHints,
    PerformancePolicy, RuntimeChunk, SplitChunksPolicy,
};
pub use plugin::{
    CriticalCss, DefinedConstants, PluginDescriptor, PluginKind, ServiceWorkerFlag,
    ServiceWorkerOptions,
};
pub use rules::{LoaderDescriptor, RuleKind, RulePattern, SourceTransformOptions, TransformRule};

/// Where bundles are written and the URL prefix they are served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpec {
    pub path: PathBuf,
    pub public_path: String,
    pub filename: String,
    pub chunk_filename: String,
    pub strict_module_exception_handling: bool,
}

impl OutputSpec {
    pub fn new(path: impl Into<PathBuf>, public_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            public_path: public_path.into(),
            filename: "js/[name].js".to_string(),
            chunk_filename: "js/[name]-[chunkhash].js".to_string(),
            strict_module_exception_handling: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleRules {
    pub rules: Vec<TransformRule>,
}

/// Complete bundler configuration for one mode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    mode: Mode,
    context: PathBuf,
    entry: IndexMap<String, PathBuf>,
    output: OutputSpec,
    module: ModuleRules,
    optimization: OptimizationPolicy,
    resolve: ResolverConfig,
    plugins: Vec<PluginDescriptor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    devtool: Option<SourceMapStrategy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    dev_server: Option<DevServerDescriptor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    performance: Option<PerformancePolicy>,
}

impl PipelineConfig {
    /// Apply one mode's extension to the base skeleton.
    pub(crate) fn finalize(base: BaseStages, stages: ModeStages) -> Self {
        let BaseStages {
            mode,
            context,
            entry,
            mut output,
            rules,
            mut optimization,
            resolve,
            mut plugins,
        } = base;

        let (devtool, dev_server, performance) = match stages {
            ModeStages::Development(dev) => {
                // Bundles must be requested from the server that serves them
                debug!(
                    "Public path {} replaced by dev server path {}",
                    output.public_path, dev.server.public_path
                );
                output.public_path = dev.server.public_path.clone();
                plugins.extend(dev.plugins);
                (Some(dev.devtool), Some(dev.server), None)
            }
            ModeStages::Production(prod) => {
                optimization.minimizer = Some(prod.minimizer);
                (None, None, Some(prod.performance))
            }
        };

        Self {
            mode,
            context,
            entry,
            output,
            module: ModuleRules { rules },
            optimization,
            resolve,
            plugins,
            devtool,
            dev_server,
            performance,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn context(&self) -> &Path {
        &self.context
    }

    pub fn entry(&self) -> &IndexMap<String, PathBuf> {
        &self.entry
    }

    pub fn output(&self) -> &OutputSpec {
        &self.output
    }

    pub fn rules(&self) -> &[TransformRule] {
        &self.module.rules
    }

    pub fn rule(&self, kind: RuleKind) -> Option<&TransformRule> {
        self.module.rules.iter().find(|rule| rule.kind() == kind)
    }

    pub fn optimization(&self) -> &OptimizationPolicy {
        &self.optimization
    }

    pub fn minimizer(&self) -> Option<&MinimizerDescriptor> {
        self.optimization.minimizer.as_ref()
    }

    pub fn resolver(&self) -> &ResolverConfig {
        &self.resolve
    }

    pub fn plugins(&self) -> &[PluginDescriptor] {
        &self.plugins
    }

    pub fn plugin(&self, kind: PluginKind) -> Option<&PluginDescriptor> {
        self.plugins.iter().find(|plugin| plugin.kind() == kind)
    }

    /// Literal value injected for a compile-time constant such as `process.env.NODE_ENV`.
    pub fn defined(&self, key: &str) -> Option<Value> {
        self.plugin(PluginKind::DefineConstants)?.defined(key)
    }

    pub fn devtool(&self) -> Option<SourceMapStrategy> {
        self.devtool
    }

    pub fn dev_server(&self) -> Option<&DevServerDescriptor> {
        self.dev_server.as_ref()
    }

    pub fn performance(&self) -> Option<&PerformancePolicy> {
        self.performance.as_ref()
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
