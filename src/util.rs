#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::{Pattern, glob};
use which::which;

/// Locates a JDK tool such as `javac` on `PATH`.
pub fn jdk_tool(name: &str) -> Result<OsString> {
    which(name)
        .map(PathBuf::into_os_string)
        .with_context(|| format!("Cannot find {name} on PATH; is a JDK installed?"))
}

/// `.java` files directly in `dir`, or anywhere below it when `nested`,
/// sorted by path.
pub fn java_files(dir: &Path, nested: bool) -> Result<Vec<PathBuf>> {
    let root = dir
        .to_str()
        .with_context(|| format!("{} is not valid UTF-8", dir.display()))?;
    let suffix = if nested { "**/*.java" } else { "*.java" };
    let pattern = Path::new(&Pattern::escape(root)).join(suffix);
    let pattern = pattern.to_string_lossy();

    let mut found: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("Invalid search pattern {pattern}"))?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    found.sort();
    Ok(found)
}
