//! The build environment: a mode plus environment-derived settings.
//!
//! A [`BuildEnvironment`] is immutable once built. It is either constructed in code,
//! parsed from a JSON value, or layered from the project's `.env` file and the process
//! environment by [`EnvironmentLoader`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::Env;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AssembleError, Result};
use crate::mode::Mode;

pub const SERVICE_WORKER_DEBUGGING_VAR: &str = "ENABLE_SERVICE_WORKER_DEBUGGING";
pub const SERVICE_WORKER_FILE_NAME_VAR: &str = "SERVICE_WORKER_FILE_NAME";
pub const BACKEND_DOMAIN_VAR: &str = "BACKEND_DOMAIN";
pub const PRODUCT_MEDIA_PATH_VAR: &str = "BACKEND_PRODUCT_MEDIA_PATH";

const SETTING_VARS: [&str; 4] = [
    SERVICE_WORKER_DEBUGGING_VAR,
    SERVICE_WORKER_FILE_NAME_VAR,
    BACKEND_DOMAIN_VAR,
    PRODUCT_MEDIA_PATH_VAR,
];

pub const DOTENV_FILE: &str = ".env";

/// Settings derived from the environment. All are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvSettings {
    /// Register the service worker outside production, for debugging it
    pub service_worker_debugging: bool,

    pub service_worker_file_name: Option<String>,

    /// Backend that dev-server API calls are proxied to
    pub backend_domain: Option<String>,

    /// Overrides the hardcoded product media path seen by the bundled code
    pub product_media_path: Option<String>,

    /// Free-form settings carried through for collaborators
    pub extra: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildEnvironment {
    mode: Mode,
    settings: EnvSettings,
}

impl BuildEnvironment {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            settings: EnvSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: EnvSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_service_worker_debugging(mut self, enabled: bool) -> Self {
        self.settings.service_worker_debugging = enabled;
        self
    }

    pub fn with_service_worker_file_name(mut self, name: impl Into<String>) -> Self {
        self.settings.service_worker_file_name = Some(name.into());
        self
    }

    pub fn with_backend_domain(mut self, domain: impl Into<String>) -> Self {
        self.settings.backend_domain = Some(domain.into());
        self
    }

    pub fn with_product_media_path(mut self, path: impl Into<String>) -> Self {
        self.settings.product_media_path = Some(path.into());
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.extra.insert(key.into(), value.into());
        self
    }

    /// Parse an environment from a JSON object with a `mode` key and settings fields.
    ///
    /// # Example
    ///
    /// ```
    /// use rigger_config::{BuildEnvironment, Mode};
    /// use serde_json::json;
    ///
    /// let env = BuildEnvironment::from_value(json!({
    ///     "mode": "production",
    ///     "service_worker_file_name": "sw.js"
    /// }))
    /// .unwrap();
    /// assert_eq!(env.mode(), Mode::Production);
    ///
    /// assert!(BuildEnvironment::from_value(json!({ "mode": "staging" })).is_err());
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        #[derive(Deserialize)]
        struct RawEnvironment {
            mode: String,
            #[serde(flatten)]
            settings: EnvSettings,
        }

        let raw: RawEnvironment =
            serde_json::from_value(value).map_err(|e| AssembleError::InvalidSetting {
                key: "environment".to_string(),
                message: e.to_string(),
            })?;
        let mode = raw.mode.parse()?;
        Ok(Self {
            mode,
            settings: raw.settings,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn settings(&self) -> &EnvSettings {
        &self.settings
    }

    pub fn service_worker_debugging(&self) -> bool {
        self.settings.service_worker_debugging
    }

    pub fn service_worker_file_name(&self) -> Option<&str> {
        self.settings.service_worker_file_name.as_deref()
    }

    pub fn backend_domain(&self) -> Option<&str> {
        self.settings.backend_domain.as_deref()
    }

    pub fn product_media_path(&self) -> Option<&str> {
        self.settings.product_media_path.as_deref()
    }
}

/// Loads [`EnvSettings`] from a project's `.env` file and the process environment.
///
/// Process variables take precedence over the `.env` file. Keys in `.env` that are
/// not recognized settings are kept in [`EnvSettings::extra`].
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    root: PathBuf,
    read_dotenv: bool,
}

impl EnvironmentLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            read_dotenv: true,
        }
    }

    pub fn without_dotenv(mut self) -> Self {
        self.read_dotenv = false;
        self
    }

    /// Load the environment for `mode`.
    ///
    /// The mode is validated first, so an unsupported mode fails before any file is
    /// read.
    pub fn load(&self, mode: &str) -> Result<BuildEnvironment> {
        let mode: Mode = mode.parse()?;
        let settings = self.load_settings()?;
        Ok(BuildEnvironment { mode, settings })
    }

    pub fn load_settings(&self) -> Result<EnvSettings> {
        // Keyed by lowercased variable name; values stay exactly as written
        let mut values = BTreeMap::new();
        let mut extra = BTreeMap::new();

        let dotenv = self.root.join(DOTENV_FILE);
        if self.read_dotenv && dotenv.exists() {
            for (key, value) in read_dotenv(&dotenv)? {
                if SETTING_VARS.contains(&key.as_str()) {
                    values.insert(key.to_ascii_lowercase(), value);
                } else {
                    extra.insert(key, value);
                }
            }
        }

        for (key, value) in Env::raw().only(&SETTING_VARS).iter() {
            values.insert(key.as_str().to_string(), value);
        }

        let mut take = |var: &str| values.remove(&var.to_ascii_lowercase());

        Ok(EnvSettings {
            service_worker_debugging: parse_flag(
                SERVICE_WORKER_DEBUGGING_VAR,
                take(SERVICE_WORKER_DEBUGGING_VAR).as_deref(),
            ),
            service_worker_file_name: non_empty(take(SERVICE_WORKER_FILE_NAME_VAR)),
            backend_domain: non_empty(take(BACKEND_DOMAIN_VAR)),
            product_media_path: non_empty(take(PRODUCT_MEDIA_PATH_VAR)),
            extra,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Any set value other than an explicit "off" spelling enables the flag.
fn parse_flag(key: &str, value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => false,
        "1" | "true" | "yes" | "on" => true,
        other => {
            warn!("{key}={other:?} is not a recognized flag value, treating it as enabled");
            true
        }
    }
}

/// Read `KEY=VALUE` pairs from a dotenv file, in file order.
fn read_dotenv(path: &Path) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(path)?;
    debug!("Loading env file: {}", path.display());

    let mut pairs = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_dotenv_line(line) {
            Some(pair) => pairs.push(pair),
            None => warn!(
                "Invalid env line in {} at line {}: {}",
                path.display(),
                line_num + 1,
                line
            ),
        }
    }
    Ok(pairs)
}

fn parse_dotenv_line(line: &str) -> Option<(String, String)> {
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    let first = key.chars().next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }

    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    let value = if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    };

    Some((key.to_string(), value.to_string()))
}
