use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{AssembleError, Result};
use crate::mode::Mode;
use crate::pipeline::plugin::PluginDescriptor;

/// File pattern a rule matches. Serialized as its regex source.
#[derive(Debug, Clone)]
pub struct RulePattern(Regex);

impl RulePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| AssembleError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.0.is_match(path)
    }
}

impl Serialize for RulePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Which part of the pipeline contributed a rule. Not seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    SourceTransform,
    CriticalCss,
    AssetEmission,
}

/// One entry of `module.rules`.
///
/// Stage order is significant; how the engine applies it is not this crate's concern.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRule {
    #[serde(skip)]
    kind: RuleKind,

    test: RulePattern,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    include: Vec<PathBuf>,

    #[serde(rename = "use")]
    stages: Vec<LoaderDescriptor>,

    #[serde(skip)]
    owner: Option<PluginDescriptor>,
}

impl TransformRule {
    pub fn new(kind: RuleKind, pattern: &str) -> Result<Self> {
        Ok(Self {
            kind,
            test: RulePattern::new(pattern)?,
            include: Vec::new(),
            stages: Vec::new(),
            owner: None,
        })
    }

    /// Restrict the rule to files under `scope`.
    pub fn include(mut self, scope: impl Into<PathBuf>) -> Self {
        self.include.push(scope.into());
        self
    }

    pub fn stage(mut self, loader: LoaderDescriptor) -> Self {
        self.stages.push(loader);
        self
    }

    /// Bind the rule to the plugin instance that also observes the module graph.
    pub fn owned_by(mut self, plugin: PluginDescriptor) -> Self {
        self.owner = Some(plugin);
        self
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn pattern(&self) -> &RulePattern {
        &self.test
    }

    pub fn scopes(&self) -> &[PathBuf] {
        &self.include
    }

    pub fn stages(&self) -> &[LoaderDescriptor] {
        &self.stages
    }

    pub fn owner(&self) -> Option<&PluginDescriptor> {
        self.owner.as_ref()
    }

    pub fn applies_to(&self, path: &Path) -> bool {
        let in_scope =
            self.include.is_empty() || self.include.iter().any(|scope| path.starts_with(scope));
        in_scope && self.test.is_match(&path.to_string_lossy())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoaderDescriptor {
    pub loader: String,
    pub options: Value,
}

impl LoaderDescriptor {
    pub fn new(loader: impl Into<String>, options: Value) -> Self {
        Self {
            loader: loader.into(),
            options,
        }
    }

    /// A loader stage with default options.
    pub fn pass_through(loader: impl Into<String>) -> Self {
        Self::new(loader, Value::Object(Map::new()))
    }
}

/// Syntax level the transpiler lowers source to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EsTarget {
    ES2017,
    ESNext,
}

/// Mode-specific options for the source transpiler stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTransformOptions {
    pub env_name: Mode,
    pub cache_directory: bool,
    pub jsx_development: bool,
    pub compact: bool,
    pub targets: EsTarget,
}

impl SourceTransformOptions {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Development => Self {
                env_name: mode,
                cache_directory: true,
                jsx_development: true,
                compact: false,
                targets: EsTarget::ESNext,
            },
            Mode::Production => Self {
                env_name: mode,
                cache_directory: true,
                jsx_development: false,
                compact: true,
                // Matches the minifier's parse level
                targets: EsTarget::ES2017,
            },
        }
    }

    pub fn to_options(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
