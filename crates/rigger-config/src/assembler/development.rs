use tracing::debug;

use super::Assembler;
use super::base::{BaseStages, service_worker_file_name};
use crate::collaborators::DevServerRequest;
use crate::environment::BuildEnvironment;
use crate::error::{AssembleError, Result};
use crate::pipeline::{DevServerDescriptor, PluginDescriptor, SourceMapStrategy, StatsPolicy};

/// What the development branch adds to the base skeleton.
#[derive(Debug, Clone)]
pub(crate) struct DevelopmentStages {
    pub(crate) devtool: SourceMapStrategy,
    pub(crate) server: DevServerDescriptor,
    pub(crate) plugins: Vec<PluginDescriptor>,
}

pub(crate) async fn extend(
    assembler: &Assembler,
    env: &BuildEnvironment,
    base: &BaseStages,
) -> Result<DevelopmentStages> {
    let defaults = assembler.defaults();
    let paths = assembler.paths();

    let request = DevServerRequest {
        public_path: base.output.public_path.clone(),
        service_worker_file_name: service_worker_file_name(assembler, env),
        backend_domain: env.backend_domain().map(str::to_string),
        paths: paths.clone(),
        id: defaults.server_id.clone(),
        provide_tls_cert: true,
    };

    let mut server = assembler
        .dev_server_provisioner()
        .configure(request)
        .await
        .map_err(AssembleError::DevServer)?;
    server.stats = StatsPolicy::interactive();
    debug!("Dev server provisioned at {}", server.origin());

    // Both plugins read the provisioned server, so they are built after it
    let factory = assembler.plugin_factory();
    let upward = paths.project_file(&defaults.layout.upward_definition);
    let plugins = vec![
        factory.hot_module_replacement(),
        factory.dev_server_ready(&server),
        factory.upward(&server, &upward),
    ];

    Ok(DevelopmentStages {
        devtool: SourceMapStrategy::CheapModuleEval,
        server,
        plugins,
    })
}
