//! Process-wide assembly constants.
//!
//! Source and output roots, code-splitting thresholds and minifier language levels are
//! fixed for the life of a process. They are not ambient module state. They are held
//! by [`AssemblyDefaults`] and passed into the [`Assembler`](crate::Assembler), so that
//! tests can assemble against arbitrary roots and thresholds.
//!
//! Layering, lowest to highest precedence:
//! 1. Built-in values ([`AssemblyDefaults::default`])
//! 2. `rigger.toml` in the project root
//! 3. `RIGGER_*` environment variables, with `__` separating nested keys
//!    (e.g. `RIGGER_SPLITTING__MIN_SIZE=20000`). Text-valued keys keep the
//!    variable's literal value, so `RIGGER_SERVER_ID=4242` is the id `"4242"`.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

pub const DEFAULTS_FILE: &str = "rigger.toml";

const ENV_PREFIX: &str = "RIGGER_";

/// Keys whose environment values are taken as text rather than parsed.
const TEXT_KEYS: [&str; 10] = [
    "public_path",
    "server_id",
    "service_worker_file_name",
    "layout.source_dir",
    "layout.output_dir",
    "layout.entry_name",
    "layout.bootstrap_module",
    "layout.upward_definition",
    "splitting.runtime_chunk_name",
    "splitting.name_delimiter",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyDefaults {
    pub layout: PathLayout,

    /// Public path used before any dev server overrides it
    pub public_path: String,

    /// Identity string handed to the dev-server collaborator
    pub server_id: String,

    /// Service-worker file name used when the environment does not name one
    pub service_worker_file_name: String,

    pub splitting: SplittingThresholds,

    pub minify: MinifyLevels,
}

impl Default for AssemblyDefaults {
    fn default() -> Self {
        Self {
            layout: PathLayout::default(),
            public_path: "/".to_string(),
            server_id: "rigger-app".to_string(),
            service_worker_file_name: "sw.js".to_string(),
            splitting: SplittingThresholds::default(),
            minify: MinifyLevels::default(),
        }
    }
}

impl AssemblyDefaults {
    /// Layer `rigger.toml` and `RIGGER_*` variables over the built-in values.
    pub fn load(root: &Path) -> Result<Self> {
        let file = root.join(DEFAULTS_FILE);
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if file.exists() {
            debug!("Loading assembly defaults from {}", file.display());
            figment = figment.merge(Toml::file(file));
        }

        let env = Env::prefixed(ENV_PREFIX).split("__");
        figment = figment.merge(env.clone().ignore(&TEXT_KEYS));
        for (key, value) in env.iter() {
            if TEXT_KEYS.contains(&key.as_str()) {
                figment = figment.merge(Serialized::default(key.as_str(), value));
            }
        }

        Ok(figment.extract()?)
    }
}

/// Directory and file names resolved against the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathLayout {
    pub source_dir: String,
    pub output_dir: String,
    pub entry_name: String,
    pub bootstrap_module: String,
    pub upward_definition: String,
}

impl Default for PathLayout {
    fn default() -> Self {
        Self {
            source_dir: "src".to_string(),
            output_dir: "web".to_string(),
            entry_name: "client".to_string(),
            bootstrap_module: "index.js".to_string(),
            upward_definition: "upward.yml".to_string(),
        }
    }
}

/// Code-splitting bounds shared by both modes.
///
/// The bounds trade HTTP request count against cache granularity. A chunk falling
/// outside them is left unsplit by the engine; nothing here rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplittingThresholds {
    /// Smallest extractable chunk, in bytes
    pub min_size: u64,
    /// Largest chunk before the splitter tries to break it up, in bytes
    pub max_size: u64,
    pub min_chunks: u32,
    pub max_async_requests: u32,
    pub max_initial_requests: u32,
    /// Name of the always-extracted loader bootstrap chunk
    pub runtime_chunk_name: String,
    pub name_delimiter: String,
    /// References required before the default group reuses a chunk
    pub reuse_min_chunks: u32,
    pub reuse_priority: i32,
}

impl Default for SplittingThresholds {
    fn default() -> Self {
        Self {
            min_size: 30_000,
            max_size: 100_000,
            min_chunks: 1,
            max_async_requests: 5,
            max_initial_requests: 2,
            runtime_chunk_name: "shared".to_string(),
            name_delimiter: "~".to_string(),
            reuse_min_chunks: 2,
            reuse_priority: -20,
        }
    }
}

/// ECMAScript levels for the production minifier.
///
/// Newer syntax may be parsed than is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyLevels {
    pub parse: u8,
    pub compress: u8,
    pub output: u8,
}

impl Default for MinifyLevels {
    fn default() -> Self {
        Self {
            parse: 8,
            compress: 6,
            output: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn builtin_defaults() {
        let defaults = AssemblyDefaults::default();
        assert_eq!(defaults.layout.source_dir, "src");
        assert_eq!(defaults.layout.output_dir, "web");
        assert_eq!(defaults.public_path, "/");
        assert_eq!(defaults.splitting.min_size, 30_000);
        assert_eq!(defaults.splitting.max_size, 100_000);
        assert_eq!(defaults.splitting.max_async_requests, 5);
        assert_eq!(defaults.splitting.max_initial_requests, 2);
        assert_eq!(defaults.minify, MinifyLevels { parse: 8, compress: 6, output: 7 });
    }

    #[test]
    fn load_without_file_matches_builtin() {
        Jail::expect_with(|jail| {
            let loaded = AssemblyDefaults::load(jail.directory()).map_err(|e| e.to_string())?;
            assert_eq!(loaded, AssemblyDefaults::default());
            Ok(())
        });
    }

    #[test]
    fn toml_file_and_env_are_layered() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULTS_FILE,
                r#"
server_id = "storefront"

[layout]
output_dir = "dist"

[splitting]
min_size = 20000
"#,
            )?;
            jail.set_env("RIGGER_SPLITTING__MIN_SIZE", "25000");
            jail.set_env("RIGGER_MINIFY__OUTPUT", "6");

            let loaded = AssemblyDefaults::load(jail.directory()).map_err(|e| e.to_string())?;
            assert_eq!(loaded.server_id, "storefront");
            assert_eq!(loaded.layout.output_dir, "dist");
            assert_eq!(loaded.layout.source_dir, "src");
            assert_eq!(loaded.splitting.min_size, 25_000);
            assert_eq!(loaded.splitting.max_size, 100_000);
            assert_eq!(loaded.minify.output, 6);
            assert_eq!(loaded.minify.parse, 8);
            Ok(())
        });
    }

    #[test]
    fn numeric_looking_text_values_are_kept() {
        Jail::expect_with(|jail| {
            jail.set_env("RIGGER_SERVER_ID", "4242");
            jail.set_env("RIGGER_LAYOUT__OUTPUT_DIR", "007");
            jail.set_env("RIGGER_SPLITTING__MIN_SIZE", "20000");

            let loaded = AssemblyDefaults::load(jail.directory()).map_err(|e| e.to_string())?;
            assert_eq!(loaded.server_id, "4242");
            assert_eq!(loaded.layout.output_dir, "007");
            assert_eq!(loaded.splitting.min_size, 20_000);
            Ok(())
        });
    }
}
