use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::net::TcpListener;
use tracing::{debug, info};

use super::{DevServerProvisioner, DevServerRequest};
use crate::error::{CollaboratorError, CollaboratorResult};
use crate::pipeline::{DevServerDescriptor, StatsPolicy, TlsConfig};

/// Certificate directory, relative to the project root.
pub const CERT_DIR: &str = ".rigger/certs";

const BIND_HOST: &str = "127.0.0.1";
const DOMAIN_SUFFIX: &str = ".local.dev";

/// Dev server on the local machine.
///
/// The hostname is stable per project root. The port is whatever the OS hands out
/// when binding to port 0, so two projects never collide.
#[derive(Debug, Clone)]
pub struct LocalDevServer {
    cert_dir: PathBuf,
    domain_suffix: String,
}

impl LocalDevServer {
    pub fn new(cert_dir: impl Into<PathBuf>) -> Self {
        Self {
            cert_dir: cert_dir.into(),
            domain_suffix: DOMAIN_SUFFIX.to_string(),
        }
    }

    pub fn with_domain_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.domain_suffix = suffix.into();
        self
    }

    pub fn hostname(&self, id: &str, root: &Path) -> String {
        let digest = seahash::hash(root.to_string_lossy().as_bytes()) & 0x00ff_ffff;
        format!("{id}-{digest:06x}{}", self.domain_suffix)
    }

    async fn reserve_port(&self) -> CollaboratorResult<u16> {
        let listener = TcpListener::bind((BIND_HOST, 0))
            .await
            .map_err(|_| CollaboratorError::NoFreePort {
                host: BIND_HOST.to_string(),
            })?;
        Ok(listener.local_addr()?.port())
    }

    async fn prepare_certificate(&self, host: &str) -> CollaboratorResult<TlsConfig> {
        tokio::fs::create_dir_all(&self.cert_dir)
            .await
            .map_err(|e| CollaboratorError::Certificate {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        Ok(TlsConfig {
            cert: self.cert_dir.join(format!("{host}.crt")),
            key: self.cert_dir.join(format!("{host}.key")),
        })
    }
}

#[async_trait]
impl DevServerProvisioner for LocalDevServer {
    async fn configure(&self, request: DevServerRequest) -> CollaboratorResult<DevServerDescriptor> {
        let host = self.hostname(&request.id, &request.paths.root);
        let port = self.reserve_port().await?;
        debug!("Reserved {}:{} for {}", host, port, request.id);

        let https = if request.provide_tls_cert {
            Some(self.prepare_certificate(&host).await?)
        } else {
            None
        };

        let scheme = if https.is_some() { "https" } else { "http" };
        let base = request.public_path.trim_start_matches('/');
        let public_path = format!("{scheme}://{host}:{port}/{base}");
        info!("Dev server will serve bundles from {}", public_path);

        Ok(DevServerDescriptor {
            id: request.id,
            host,
            port,
            public_path,
            content_base: request.paths.output,
            https,
            service_worker_file_name: request.service_worker_file_name,
            backend_domain: request.backend_domain,
            hot: true,
            stats: StatsPolicy::default(),
        })
    }
}
