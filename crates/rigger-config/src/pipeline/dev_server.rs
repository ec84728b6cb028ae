use std::path::PathBuf;

use serde::Serialize;

/// Source-map style for development builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceMapStrategy {
    /// Fast rebuilds, original source lines, no column mappings
    #[serde(rename = "cheap-module-eval-source-map")]
    CheapModuleEval,
}

impl SourceMapStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceMapStrategy::CheapModuleEval => "cheap-module-eval-source-map",
        }
    }
}

/// Live-reload server settings returned by the dev-server collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerDescriptor {
    pub id: String,
    pub host: String,
    pub port: u16,

    /// Absolute URL the server serves bundles from
    pub public_path: String,

    pub content_base: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub https: Option<TlsConfig>,

    pub service_worker_file_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_domain: Option<String>,

    pub hot: bool,

    pub stats: StatsPolicy,
}

impl DevServerDescriptor {
    pub fn origin(&self) -> String {
        let scheme = if self.https.is_some() { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TlsConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Which sections of build statistics the dev server prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsPolicy {
    pub assets: bool,
    pub children: bool,
    pub chunks: bool,
    pub chunk_groups: bool,
    pub chunk_modules: bool,
    pub chunk_origins: bool,
    pub errors: bool,
    pub error_details: bool,
    pub modules: bool,
    pub warnings: bool,
}

impl Default for StatsPolicy {
    fn default() -> Self {
        Self {
            assets: true,
            children: true,
            chunks: true,
            chunk_groups: true,
            chunk_modules: true,
            chunk_origins: true,
            errors: true,
            error_details: true,
            modules: true,
            warnings: true,
        }
    }
}

impl StatsPolicy {
    /// Chunk summaries and diagnostics only.
    pub fn interactive() -> Self {
        Self {
            assets: false,
            children: false,
            chunks: true,
            chunk_groups: false,
            chunk_modules: false,
            chunk_origins: false,
            errors: true,
            error_details: true,
            modules: false,
            warnings: true,
        }
    }
}
