//! External collaborators consulted during assembly.
//!
//! The assembler does not know how modules are resolved or how a dev server is
//! provisioned. It awaits these traits and uses whatever they return. Failures
//! propagate to the caller unchanged: no retries, no fallbacks.
//!
//! Default implementations are provided for local use:
//! - [`ProjectResolver`] resolves from the project root and `node_modules`
//! - [`LocalDevServer`] derives a stable hostname, reserves a free port and prepares
//!   a certificate directory
//! - [`StandardPlugins`] builds the plugin descriptors the engine expects

mod dev_server;
mod plugins;
mod resolver;

use std::fmt;
use std::path::Path;

use async_trait::async_trait;

use crate::error::CollaboratorResult;
use crate::paths::ProjectPaths;
use crate::pipeline::DevServerDescriptor;

pub use dev_server::{CERT_DIR, LocalDevServer};
pub use plugins::{PluginFactory, StandardPlugins};
pub use resolver::{ProjectResolver, ResolverConfig};

/// Produces module-resolution settings for a project root.
#[async_trait]
pub trait ModuleResolver: Send + Sync + fmt::Debug {
    async fn configure(&self, root: &Path) -> CollaboratorResult<ResolverConfig>;
}

/// Provisions the live-reload dev server used by development builds.
#[async_trait]
pub trait DevServerProvisioner: Send + Sync + fmt::Debug {
    async fn configure(&self, request: DevServerRequest) -> CollaboratorResult<DevServerDescriptor>;
}

/// Everything a dev-server provisioner is told about the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevServerRequest {
    /// Base public path, before the server replaces it
    pub public_path: String,
    pub service_worker_file_name: String,
    pub backend_domain: Option<String>,
    pub paths: ProjectPaths,
    /// Identity string, also used to derive the hostname
    pub id: String,
    pub provide_tls_cert: bool,
}
