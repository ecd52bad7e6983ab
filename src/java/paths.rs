#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

#[derive(Debug)]
/// A throwaway workspace for compiling and running one submission. The whole
/// tree is removed when the value is dropped.
pub struct ScratchSpace {
    /// owning handle; deletes the directory on drop
    root:       TempDir,
    /// `src/` directory the submission's files are copied into
    source_dir: PathBuf,
    /// `build/` directory javac writes class files to
    build_dir:  PathBuf,
}

impl ScratchSpace {
    /// Creates a fresh scratch directory with empty `src/` and `build/`.
    pub fn new() -> Result<Self> {
        let root = tempfile::Builder::new()
            .prefix("oop-grader-")
            .tempdir()
            .context("Could not create scratch directory")?;
        let source_dir = root.path().join("src");
        let build_dir = root.path().join("build");

        std::fs::create_dir_all(&source_dir)
            .with_context(|| format!("Could not create {}", source_dir.display()))?;
        std::fs::create_dir_all(&build_dir)
            .with_context(|| format!("Could not create {}", build_dir.display()))?;

        Ok(Self {
            root,
            source_dir,
            build_dir,
        })
    }

    /// Root directory of the scratch space.
    pub fn root_dir(&self) -> &Path {
        self.root.path()
    }

    /// Source directory.
    pub fn source_dir(&self) -> &Path {
        self.source_dir.as_path()
    }

    /// Build directory.
    pub fn build_dir(&self) -> &Path {
        self.build_dir.as_path()
    }

    /// Removes every mention of the scratch root from `text`, so compiler and
    /// runtime messages read `src/Main.java` instead of an absolute temp path.
    pub fn relativize(&self, text: &str) -> String {
        let mut roots = vec![self.root_dir().to_path_buf()];
        if let Ok(canonical) = self.root_dir().canonicalize()
            && canonical != roots[0]
        {
            roots.push(canonical);
        }

        roots.iter().fold(text.to_string(), |acc, root| {
            let shown = root.display().to_string();
            acc.replace(&format!("{shown}{}", std::path::MAIN_SEPARATOR), "")
                .replace(&shown, ".")
        })
    }
}
