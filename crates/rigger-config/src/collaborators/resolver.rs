use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ModuleResolver;
use crate::error::{CollaboratorError, CollaboratorResult};

/// Module-resolution settings passed through to the engine's `resolve` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    pub alias: IndexMap<String, String>,
    pub modules: Vec<PathBuf>,
    pub main_files: Vec<String>,
    pub main_fields: Vec<String>,
    pub extensions: Vec<String>,
}

/// Resolves bare imports from the project root first, then `node_modules`.
#[derive(Debug, Clone)]
pub struct ProjectResolver {
    main_fields: Vec<String>,
    extensions: Vec<String>,
}

impl Default for ProjectResolver {
    fn default() -> Self {
        Self {
            main_fields: ["browser", "module", "jsnext:main", "main"]
                .map(String::from)
                .to_vec(),
            extensions: [".wasm", ".mjs", ".js", ".json", ".graphql"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl ProjectResolver {
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extensions.push(extension.into());
        self
    }
}

#[async_trait]
impl ModuleResolver for ProjectResolver {
    async fn configure(&self, root: &Path) -> CollaboratorResult<ResolverConfig> {
        let metadata = tokio::fs::metadata(root).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => CollaboratorError::RootNotFound(root.to_path_buf()),
            _ => CollaboratorError::Io(e),
        })?;
        if !metadata.is_dir() {
            return Err(CollaboratorError::RootNotFound(root.to_path_buf()));
        }

        debug!("Resolving modules from {}", root.display());
        Ok(ResolverConfig {
            alias: IndexMap::new(),
            modules: vec![root.to_path_buf(), PathBuf::from("node_modules")],
            main_files: vec!["index".to_string()],
            main_fields: self.main_fields.clone(),
            extensions: self.extensions.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_from_existing_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectResolver::default()
            .configure(dir.path())
            .await
            .unwrap();

        assert_eq!(config.modules[0], dir.path());
        assert_eq!(config.modules[1], PathBuf::from("node_modules"));
        assert_eq!(config.main_files, vec!["index"]);
        assert_eq!(config.main_fields[0], "browser");
        assert!(config.extensions.contains(&".graphql".to_string()));
    }

    #[tokio::test]
    async fn missing_root_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = ProjectResolver::default()
            .configure(&missing)
            .await
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::RootNotFound(path) if path == missing));
    }

    #[tokio::test]
    async fn file_root_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = ProjectResolver::default()
            .configure(file.path())
            .await
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::RootNotFound(_)));
    }

    #[tokio::test]
    async fn extra_extensions_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectResolver::default()
            .with_extension(".ts")
            .configure(dir.path())
            .await
            .unwrap();
        assert_eq!(config.extensions.last().map(String::as_str), Some(".ts"));
    }
}
