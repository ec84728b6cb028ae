//! Stub collaborators shared by the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rigger_config::{
    AssemblyDefaults, Assembler, CollaboratorError, CollaboratorResult, DevServerDescriptor,
    DevServerProvisioner, DevServerRequest, ModuleResolver, ResolverConfig, StatsPolicy,
    TlsConfig,
};
use tempfile::TempDir;

pub const FIXED_PUBLIC_PATH: &str = "https://fixed.local.test:9443/";

/// Dev server that always answers with the same public path and records requests.
///
/// Clones share the request log.
#[derive(Debug, Clone, Default)]
pub struct FixedDevServer {
    pub requests: Arc<Mutex<Vec<DevServerRequest>>>,
}

impl FixedDevServer {
    pub fn last_request(&self) -> DevServerRequest {
        self.requests
            .lock()
            .expect("lock")
            .last()
            .cloned()
            .expect("dev server was consulted")
    }
}

#[async_trait]
impl DevServerProvisioner for FixedDevServer {
    async fn configure(&self, request: DevServerRequest) -> CollaboratorResult<DevServerDescriptor> {
        self.requests.lock().expect("lock").push(request.clone());
        Ok(DevServerDescriptor {
            id: request.id,
            host: "fixed.local.test".to_string(),
            port: 9443,
            public_path: FIXED_PUBLIC_PATH.to_string(),
            content_base: request.paths.output,
            https: request.provide_tls_cert.then(|| TlsConfig {
                cert: PathBuf::from("fixed.crt"),
                key: PathBuf::from("fixed.key"),
            }),
            service_worker_file_name: request.service_worker_file_name,
            backend_domain: request.backend_domain,
            hot: true,
            stats: StatsPolicy::default(),
        })
    }
}

#[derive(Debug)]
pub struct FailingDevServer;

#[async_trait]
impl DevServerProvisioner for FailingDevServer {
    async fn configure(&self, _request: DevServerRequest) -> CollaboratorResult<DevServerDescriptor> {
        Err(CollaboratorError::NoFreePort {
            host: "127.0.0.1".to_string(),
        })
    }
}

#[derive(Debug)]
pub struct FailingResolver;

#[async_trait]
impl ModuleResolver for FailingResolver {
    async fn configure(&self, _root: &Path) -> CollaboratorResult<ResolverConfig> {
        Err(CollaboratorError::Other("resolver offline".to_string()))
    }
}

/// A temporary project with `src/index.js`, assembled with the built-in defaults.
pub fn project() -> (TempDir, Assembler) {
    let dir = TempDir::new().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("src")).expect("create src");
    std::fs::write(dir.path().join("src/index.js"), "export default null;\n").expect("write entry");
    let assembler = Assembler::new(dir.path(), AssemblyDefaults::default());
    (dir, assembler)
}
