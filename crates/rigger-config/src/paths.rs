//! Filesystem roots resolved against the project root.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::defaults::PathLayout;

/// Source and output roots of a project.
///
/// Resolved once when an [`Assembler`](crate::Assembler) is built and shared with every
/// collaborator that needs them (service worker, dev server).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub src: PathBuf,
    pub output: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl AsRef<Path>, layout: &PathLayout) -> Self {
        let root = root.as_ref().to_path_buf().clean();
        Self {
            src: root.join(&layout.source_dir).clean(),
            output: root.join(&layout.output_dir).clean(),
            root,
        }
    }

    pub fn source_module(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.src.join(relative)
    }

    pub fn project_file(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}
