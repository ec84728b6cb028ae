//! End-to-end assembly for each mode.

mod common;

use common::{FIXED_PUBLIC_PATH, FixedDevServer, project};
use rigger_config::pipeline::SourceMapStrategy;
use rigger_config::pipeline::optimization::PerformanceHints;
use rigger_config::pipeline::plugin::{NODE_ENV_CONSTANT, SERVICE_WORKER_CONSTANT};
use rigger_config::{
    AssembleError, BuildEnvironment, EnvSettings, Mode, PluginKind, RuleKind,
};
use serde_json::{Value, json};

#[tokio::test]
async fn development_without_worker_debugging() {
    let (dir, assembler) = project();
    let env = BuildEnvironment::new(Mode::Development).with_service_worker_debugging(false);

    let config = assembler.assemble(&env).await.expect("assemble");

    let kinds: Vec<RuleKind> = config.rules().iter().map(|rule| rule.kind()).collect();
    assert_eq!(
        kinds,
        vec![RuleKind::SourceTransform, RuleKind::CriticalCss, RuleKind::AssetEmission]
    );

    let server = config.dev_server().expect("dev server present");
    assert!(server.https.is_some(), "TLS was requested");
    assert!(server.public_path.starts_with("https://"));
    assert!(dir.path().join(".rigger/certs").is_dir());

    assert_eq!(config.defined(SERVICE_WORKER_CONSTANT), Some(Value::Bool(false)));
    assert_eq!(config.defined(NODE_ENV_CONSTANT), Some(json!("development")));
    assert_eq!(config.devtool(), Some(SourceMapStrategy::CheapModuleEval));
    assert!(config.minimizer().is_none());
    assert!(config.performance().is_none());
}

#[tokio::test]
async fn production_registers_configured_worker() {
    let (_dir, assembler) = project();
    let env = BuildEnvironment::new(Mode::Production)
        .with_service_worker_debugging(false)
        .with_service_worker_file_name("service-worker.js");

    let config = assembler.assemble(&env).await.expect("assemble");

    let minimizer = config.minimizer().expect("minimizer present");
    assert!(minimizer.uglify_options.keep_fnames);
    assert!(minimizer.parallel);
    assert_eq!(
        config.defined(SERVICE_WORKER_CONSTANT),
        Some(json!("service-worker.js"))
    );
    assert!(config.dev_server().is_none());
    assert!(config.devtool().is_none());
    assert!(config.plugin(PluginKind::HotModuleReplacement).is_none());
    assert_eq!(
        config.performance().map(|policy| policy.hints),
        Some(PerformanceHints::Warning)
    );
}

#[tokio::test]
async fn unsupported_mode_is_fatal() {
    let (_dir, assembler) = project();
    let dev_server = FixedDevServer::default();
    let result = assembler
        .with_dev_server(dev_server)
        .assemble_str("staging", EnvSettings::default())
        .await;

    match result {
        Err(AssembleError::UnsupportedMode(mode)) => assert_eq!(mode, "staging"),
        other => panic!("expected UnsupportedMode, got {other:?}"),
    }
}

#[tokio::test]
async fn assemble_str_accepts_supported_modes() {
    let (_dir, assembler) = project();
    let assembler = assembler.with_dev_server(FixedDevServer::default());

    let dev = assembler
        .assemble_str("development", EnvSettings::default())
        .await
        .expect("development");
    assert_eq!(dev.mode(), Mode::Development);
    assert_eq!(dev.output().public_path, FIXED_PUBLIC_PATH);

    let prod = assembler
        .assemble_str("production", EnvSettings::default())
        .await
        .expect("production");
    assert_eq!(prod.mode(), Mode::Production);
    assert_eq!(prod.output().public_path, "/");
}

#[tokio::test]
async fn serialized_config_has_engine_sections() {
    let (dir, assembler) = project();
    let config = assembler
        .assemble(&BuildEnvironment::new(Mode::Production))
        .await
        .expect("assemble");

    let value = config.to_value().expect("serialize");
    assert_eq!(value["mode"], "production");
    assert_eq!(
        value["entry"]["client"],
        json!(dir.path().join("src/index.js"))
    );
    assert_eq!(value["output"]["filename"], "js/[name].js");
    assert_eq!(value["output"]["chunkFilename"], "js/[name]-[chunkhash].js");
    assert_eq!(value["module"]["rules"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["optimization"]["runtimeChunk"]["name"], "shared");
    assert_eq!(value["optimization"]["minimizer"]["uglifyOptions"]["keep_fnames"], true);
    assert_eq!(value["resolve"]["mainFiles"], json!(["index"]));
    assert!(value.get("devServer").is_none());
    assert!(value.get("devtool").is_none());

    let pretty = config.to_json_pretty().expect("pretty");
    assert!(pretty.contains("\"performance\""));
}
