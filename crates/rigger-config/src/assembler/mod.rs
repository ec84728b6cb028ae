//! Pipeline assembly.
//!
//! Assembly runs in three stages:
//! 1. Build the mode-independent skeleton. This awaits the module resolver.
//! 2. Build exactly one mode's extension. Development awaits the dev-server
//!    provisioner; production is synchronous.
//! 3. Merge the extension into the skeleton ([`PipelineConfig::finalize`]).
//!
//! Collaborators are consulted in that order and never concurrently.

mod base;
mod development;
mod production;

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::collaborators::{
    CERT_DIR, DevServerProvisioner, LocalDevServer, ModuleResolver, PluginFactory,
    ProjectResolver, StandardPlugins,
};
use crate::defaults::AssemblyDefaults;
use crate::environment::{BuildEnvironment, EnvSettings};
use crate::error::Result;
use crate::mode::Mode;
use crate::paths::ProjectPaths;
use crate::pipeline::PipelineConfig;

pub(crate) use base::BaseStages;
pub(crate) use development::DevelopmentStages;
pub(crate) use production::ProductionStages;

/// One mode's extension of the base skeleton.
///
/// The two variants carry disjoint settings, so a config can never hold both a dev
/// server and a minimizer.
#[derive(Debug, Clone)]
pub(crate) enum ModeStages {
    Development(DevelopmentStages),
    Production(ProductionStages),
}

/// Produces [`PipelineConfig`]s for a project.
///
/// # Example
///
/// ```no_run
/// use rigger_config::{Assembler, BuildEnvironment, Mode};
///
/// # async fn run() -> rigger_config::Result<()> {
/// let assembler = Assembler::load("/srv/storefront")?;
/// let config = assembler.assemble(&BuildEnvironment::new(Mode::Production)).await?;
/// assert!(config.minimizer().is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Assembler {
    defaults: AssemblyDefaults,
    paths: ProjectPaths,
    resolver: Arc<dyn ModuleResolver>,
    dev_server: Arc<dyn DevServerProvisioner>,
    plugins: Arc<dyn PluginFactory>,
}

impl Assembler {
    /// Assembler for `root` using the built-in collaborators.
    pub fn new(root: impl AsRef<Path>, defaults: AssemblyDefaults) -> Self {
        let paths = ProjectPaths::new(root, &defaults.layout);
        let cert_dir = paths.project_file(CERT_DIR);
        Self {
            defaults,
            paths,
            resolver: Arc::new(ProjectResolver::default()),
            dev_server: Arc::new(LocalDevServer::new(cert_dir)),
            plugins: Arc::new(StandardPlugins),
        }
    }

    /// Assembler for `root` with defaults layered from `rigger.toml` and `RIGGER_*`.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let defaults = AssemblyDefaults::load(root.as_ref())?;
        Ok(Self::new(root, defaults))
    }

    pub fn with_resolver(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn with_dev_server(mut self, dev_server: impl DevServerProvisioner + 'static) -> Self {
        self.dev_server = Arc::new(dev_server);
        self
    }

    pub fn with_plugins(mut self, plugins: impl PluginFactory + 'static) -> Self {
        self.plugins = Arc::new(plugins);
        self
    }

    pub fn defaults(&self) -> &AssemblyDefaults {
        &self.defaults
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub(crate) fn module_resolver(&self) -> &dyn ModuleResolver {
        self.resolver.as_ref()
    }

    pub(crate) fn dev_server_provisioner(&self) -> &dyn DevServerProvisioner {
        self.dev_server.as_ref()
    }

    pub(crate) fn plugin_factory(&self) -> &dyn PluginFactory {
        self.plugins.as_ref()
    }

    /// Assemble the configuration for `env`.
    ///
    /// Collaborator failures are returned unchanged and nothing is retried.
    pub async fn assemble(&self, env: &BuildEnvironment) -> Result<PipelineConfig> {
        let mode = env.mode();
        info!("Assembling {} pipeline for {}", mode, self.paths.root.display());

        let base = base::build(self, env).await?;
        let stages = match mode {
            Mode::Development => {
                ModeStages::Development(development::extend(self, env, &base).await?)
            }
            Mode::Production => ModeStages::Production(production::extend(&self.defaults)),
        };

        let config = PipelineConfig::finalize(base, stages);
        info!(
            "Assembled {} pipeline with {} plugins",
            mode,
            config.plugins().len()
        );
        Ok(config)
    }

    /// Parse `mode` and assemble. Unknown modes fail before any collaborator runs.
    pub async fn assemble_str(&self, mode: &str, settings: EnvSettings) -> Result<PipelineConfig> {
        let mode: Mode = mode.parse()?;
        self.assemble(&BuildEnvironment::new(mode).with_settings(settings))
            .await
    }
}
