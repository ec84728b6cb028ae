//! Environment-conditional build pipeline assembly.
//!
//! Given a deployment [`Mode`] and a handful of environment settings, an [`Assembler`]
//! produces the complete configuration a JavaScript bundling engine consumes: entry,
//! output, module rules, code-splitting policy, resolver settings, plugins, and either
//! a dev server or a minimizer depending on the mode.
//!
//! ```no_run
//! use rigger_config::{Assembler, EnvironmentLoader};
//!
//! # async fn run() -> rigger_config::Result<()> {
//! let root = std::path::Path::new("/srv/storefront");
//! let env = EnvironmentLoader::new(root).load("development")?;
//! let config = Assembler::load(root)?.assemble(&env).await?;
//! println!("{}", config.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod collaborators;
pub mod defaults;
pub mod environment;
pub mod error;
pub mod mode;
pub mod paths;
pub mod pipeline;

pub use assembler::Assembler;
pub use collaborators::{
    DevServerProvisioner, DevServerRequest, LocalDevServer, ModuleResolver, PluginFactory,
    ProjectResolver, ResolverConfig, StandardPlugins,
};
pub use defaults::{AssemblyDefaults, MinifyLevels, PathLayout, SplittingThresholds};
pub use environment::{BuildEnvironment, EnvSettings, EnvironmentLoader};
pub use error::{AssembleError, CollaboratorError, CollaboratorResult, Result};
pub use mode::Mode;
pub use paths::ProjectPaths;
pub use pipeline::{
    DevServerDescriptor, OptimizationPolicy, OutputSpec, PipelineConfig, PluginDescriptor,
    PluginKind, RuleKind, ServiceWorkerFlag, StatsPolicy, TlsConfig, TransformRule,
};
