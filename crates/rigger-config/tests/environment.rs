//! Loading a project's environment and defaults from disk, then assembling.

use figment::Jail;
use rigger_config::pipeline::plugin::{PRODUCT_MEDIA_PATH_CONSTANT, SERVICE_WORKER_CONSTANT};
use rigger_config::{AssembleError, Assembler, EnvironmentLoader, Mode};
use serde_json::json;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Runtime::new()
        .expect("runtime")
        .block_on(future)
}

#[test]
fn project_files_drive_assembly() {
    Jail::expect_with(|jail| {
        jail.create_dir("src")?;
        jail.create_file(
            ".env",
            r#"
# storefront settings
SERVICE_WORKER_FILE_NAME="storefront-sw.js"
BACKEND_PRODUCT_MEDIA_PATH=/media/catalog/product
MAGENTO_BACKEND_URL=https://backend.example.test
"#,
        )?;
        jail.create_file(
            "rigger.toml",
            r#"
[splitting]
max_initial_requests = 3
"#,
        )?;

        let root = jail.directory().to_path_buf();
        let env = EnvironmentLoader::new(&root)
            .load("production")
            .map_err(|e| e.to_string())?;
        assert_eq!(env.mode(), Mode::Production);
        assert_eq!(
            env.settings().extra.get("MAGENTO_BACKEND_URL").map(String::as_str),
            Some("https://backend.example.test")
        );

        let assembler = Assembler::load(&root).map_err(|e| e.to_string())?;
        let config = block_on(assembler.assemble(&env)).map_err(|e| e.to_string())?;

        assert_eq!(config.defined(SERVICE_WORKER_CONSTANT), Some(json!("storefront-sw.js")));
        assert_eq!(
            config.defined(PRODUCT_MEDIA_PATH_CONSTANT),
            Some(json!("/media/catalog/product"))
        );
        assert_eq!(config.optimization().split_chunks.max_initial_requests, 3);
        Ok(())
    });
}

#[test]
fn process_variables_override_env_file() {
    Jail::expect_with(|jail| {
        jail.create_dir("src")?;
        jail.create_file(".env", "ENABLE_SERVICE_WORKER_DEBUGGING=false\n")?;
        jail.set_env("ENABLE_SERVICE_WORKER_DEBUGGING", "true");

        let root = jail.directory().to_path_buf();
        let env = EnvironmentLoader::new(&root)
            .load("development")
            .map_err(|e| e.to_string())?;
        assert!(env.service_worker_debugging());
        Ok(())
    });
}

#[test]
fn unknown_mode_is_rejected_before_reading_files() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "ENABLE_SERVICE_WORKER_DEBUGGING=maybe\n")?;

        let err = EnvironmentLoader::new(jail.directory())
            .load("staging")
            .expect_err("unsupported mode");
        assert!(matches!(err, AssembleError::UnsupportedMode(_)));

        // Unrecognized spellings enable the flag rather than failing
        let env = EnvironmentLoader::new(jail.directory())
            .load("development")
            .map_err(|e| e.to_string())?;
        assert!(env.service_worker_debugging());
        Ok(())
    });
}
