use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use super::Assembler;
use crate::collaborators::ResolverConfig;
use crate::environment::{BuildEnvironment, SERVICE_WORKER_FILE_NAME_VAR};
use crate::error::{AssembleError, Result};
use crate::mode::Mode;
use crate::paths::ProjectPaths;
use crate::pipeline::plugin::{
    NODE_ENV_CONSTANT, PRODUCT_MEDIA_PATH_CONSTANT, SERVICE_WORKER_CONSTANT,
};
use crate::pipeline::{
    CriticalCss, DefinedConstants, LoaderDescriptor, OptimizationPolicy, OutputSpec,
    PluginDescriptor, RuleKind, ServiceWorkerFlag, ServiceWorkerOptions, SourceTransformOptions,
    TransformRule,
};

pub(crate) const SOURCE_PATTERN: &str = r"\.js$";
pub(crate) const ASSET_PATTERN: &str = r"\.(jpg|svg)$";

/// The mode-independent skeleton every pipeline config starts from.
#[derive(Debug, Clone)]
pub(crate) struct BaseStages {
    pub(crate) mode: Mode,
    pub(crate) context: PathBuf,
    pub(crate) entry: IndexMap<String, PathBuf>,
    pub(crate) output: OutputSpec,
    pub(crate) rules: Vec<TransformRule>,
    pub(crate) optimization: OptimizationPolicy,
    pub(crate) resolve: ResolverConfig,
    pub(crate) plugins: Vec<PluginDescriptor>,
}

pub(crate) async fn build(assembler: &Assembler, env: &BuildEnvironment) -> Result<BaseStages> {
    let mode = env.mode();
    let defaults = assembler.defaults();
    let paths = assembler.paths();

    let mut entry = IndexMap::new();
    entry.insert(
        defaults.layout.entry_name.clone(),
        paths.source_module(&defaults.layout.bootstrap_module),
    );

    let CriticalCss {
        rule: critical_rule,
        plugin: critical_plugin,
    } = assembler.plugin_factory().critical_css(mode)?;
    let rules = module_rules(paths, mode, critical_rule)?;

    let resolve = assembler
        .module_resolver()
        .configure(&paths.root)
        .await
        .map_err(AssembleError::Resolver)?;

    let plugins = static_plugins(assembler, env, critical_plugin);
    debug!(
        "Base skeleton for {} has {} rules and {} plugins",
        mode,
        rules.len(),
        plugins.len()
    );

    Ok(BaseStages {
        mode,
        context: paths.root.clone(),
        entry,
        output: OutputSpec::new(paths.output.clone(), defaults.public_path.clone()),
        rules,
        optimization: OptimizationPolicy::from_thresholds(&defaults.splitting),
        resolve,
        plugins,
    })
}

/// Source transform, critical CSS, then asset emission.
fn module_rules(
    paths: &ProjectPaths,
    mode: Mode,
    critical_css: TransformRule,
) -> Result<Vec<TransformRule>> {
    let source = TransformRule::new(RuleKind::SourceTransform, SOURCE_PATTERN)?
        .include(paths.src.clone())
        .stage(LoaderDescriptor::new(
            "babel-loader",
            SourceTransformOptions::for_mode(mode).to_options()?,
        ));

    let assets = TransformRule::new(RuleKind::AssetEmission, ASSET_PATTERN)?
        .stage(LoaderDescriptor::pass_through("file-loader"));

    Ok(vec![source, critical_css, assets])
}

fn static_plugins(
    assembler: &Assembler,
    env: &BuildEnvironment,
    critical_css: PluginDescriptor,
) -> Vec<PluginDescriptor> {
    let factory = assembler.plugin_factory();
    let mode = env.mode();
    let file_name = service_worker_file_name(assembler, env);
    let flag = ServiceWorkerFlag::resolve(mode, env.service_worker_debugging(), &file_name);

    if flag.is_enabled() && env.service_worker_file_name().is_none() {
        warn!(
            "{} is not set, registering service worker as {}",
            SERVICE_WORKER_FILE_NAME_VAR, file_name
        );
    }

    let options = ServiceWorkerOptions {
        mode,
        enable_service_worker_debugging: env.service_worker_debugging(),
        service_worker_file_name: file_name,
        paths: assembler.paths().clone(),
    };

    vec![
        factory.root_components(mode),
        factory.define_constants(&defined_constants(env, &flag)),
        critical_css,
        factory.service_worker(&options),
    ]
}

pub(crate) fn defined_constants(env: &BuildEnvironment, flag: &ServiceWorkerFlag) -> DefinedConstants {
    let mut constants = DefinedConstants::new();
    constants.insert(NODE_ENV_CONSTANT, Value::String(env.mode().as_str().to_string()));
    constants.insert(SERVICE_WORKER_CONSTANT, flag.to_value());
    if let Some(media) = env.product_media_path() {
        constants.insert(PRODUCT_MEDIA_PATH_CONSTANT, Value::String(media.to_string()));
    }
    constants
}

/// The configured file name, or the built-in default when the environment leaves it unset.
pub(crate) fn service_worker_file_name(assembler: &Assembler, env: &BuildEnvironment) -> String {
    env.service_worker_file_name()
        .unwrap_or(assembler.defaults().service_worker_file_name.as_str())
        .to_string()
}
