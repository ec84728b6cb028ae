use indexmap::IndexMap;
use serde::Serialize;

use crate::defaults::{MinifyLevels, SplittingThresholds};

pub const DEFAULT_CACHE_GROUP: &str = "default";
pub const MINIMIZER_PLUGIN: &str = "uglifyjs-webpack-plugin";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationPolicy {
    pub no_emit_on_errors: bool,
    pub runtime_chunk: RuntimeChunk,
    pub split_chunks: SplitChunksPolicy,

    // Set only on the production branch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimizer: Option<MinimizerDescriptor>,
}

impl OptimizationPolicy {
    /// Mode-independent policy. Failed builds emit nothing.
    pub fn from_thresholds(thresholds: &SplittingThresholds) -> Self {
        Self {
            no_emit_on_errors: true,
            runtime_chunk: RuntimeChunk {
                name: thresholds.runtime_chunk_name.clone(),
            },
            split_chunks: SplitChunksPolicy::from_thresholds(thresholds),
            minimizer: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeChunk {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkScope {
    Async,
    Initial,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunksPolicy {
    pub chunks: ChunkScope,
    pub min_size: u64,
    pub max_size: u64,
    pub min_chunks: u32,
    pub max_async_requests: u32,
    pub max_initial_requests: u32,
    pub automatic_name_delimiter: String,
    /// Derive chunk names from module paths and cache-group keys
    pub name: bool,
    pub cache_groups: IndexMap<String, CacheGroup>,
}

impl SplitChunksPolicy {
    pub fn from_thresholds(thresholds: &SplittingThresholds) -> Self {
        let mut cache_groups = IndexMap::new();
        cache_groups.insert(
            DEFAULT_CACHE_GROUP.to_string(),
            CacheGroup {
                min_chunks: thresholds.reuse_min_chunks,
                priority: thresholds.reuse_priority,
                reuse_existing_chunk: true,
            },
        );

        Self {
            chunks: ChunkScope::Async,
            min_size: thresholds.min_size,
            max_size: thresholds.max_size,
            min_chunks: thresholds.min_chunks,
            max_async_requests: thresholds.max_async_requests,
            max_initial_requests: thresholds.max_initial_requests,
            automatic_name_delimiter: thresholds.name_delimiter.clone(),
            name: true,
            cache_groups,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroup {
    pub min_chunks: u32,
    pub priority: i32,
    pub reuse_existing_chunk: bool,
}

/// Parallel minifier for production output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimizerDescriptor {
    pub plugin: String,
    pub parallel: bool,
    pub uglify_options: MinifyOptions,
}

impl MinimizerDescriptor {
    pub fn from_levels(levels: MinifyLevels) -> Self {
        Self {
            plugin: MINIMIZER_PLUGIN.to_string(),
            parallel: true,
            uglify_options: MinifyOptions {
                parse: EcmaLevel { ecma: levels.parse },
                compress: EcmaLevel {
                    ecma: levels.compress,
                },
                output: OutputOptions {
                    ecma: levels.output,
                    semicolons: false,
                },
                keep_fnames: true,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinifyOptions {
    pub parse: EcmaLevel,
    pub compress: EcmaLevel,
    pub output: OutputOptions,
    /// Function names survive minification
    pub keep_fnames: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EcmaLevel {
    pub ecma: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutputOptions {
    pub ecma: u8,
    pub semicolons: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceHints {
    Warning,
    Error,
}

/// Size-budget reporting for emitted assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerformancePolicy {
    pub hints: PerformanceHints,
}

impl PerformancePolicy {
    pub fn warn() -> Self {
        Self {
            hints: PerformanceHints::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_policy_uses_thresholds() {
        let policy = OptimizationPolicy::from_thresholds(&SplittingThresholds::default());
        assert!(policy.no_emit_on_errors);
        assert_eq!(policy.runtime_chunk.name, "shared");
        assert_eq!(policy.split_chunks.chunks, ChunkScope::Async);
        assert!(policy.split_chunks.min_size < policy.split_chunks.max_size);

        let default = &policy.split_chunks.cache_groups[DEFAULT_CACHE_GROUP];
        assert_eq!(default.min_chunks, 2);
        assert_eq!(default.priority, -20);
        assert!(default.reuse_existing_chunk);
        assert!(policy.minimizer.is_none());
    }

    #[test]
    fn minimizer_serializes_engine_option_names() {
        let minimizer = MinimizerDescriptor::from_levels(MinifyLevels::default());
        assert_eq!(
            serde_json::to_value(&minimizer).unwrap(),
            json!({
                "plugin": "uglifyjs-webpack-plugin",
                "parallel": true,
                "uglifyOptions": {
                    "parse": { "ecma": 8 },
                    "compress": { "ecma": 6 },
                    "output": { "ecma": 7, "semicolons": false },
                    "keep_fnames": true
                }
            })
        );
    }

    #[test]
    fn performance_hints_warn() {
        assert_eq!(
            serde_json::to_value(PerformancePolicy::warn()).unwrap(),
            json!({ "hints": "warning" })
        );
    }
}
