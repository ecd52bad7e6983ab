#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Finding student submissions on disk.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

use crate::{java::Submission, util::java_files};

/// Student and submission ids recovered from a Canvas download name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanvasName {
    /// student name as Canvas wrote it, e.g. `smithjane`
    pub student_name:  String,
    /// Canvas user id, empty when the name is not in Canvas form
    pub canvas_id:     String,
    /// Canvas submission id, empty when the name is not in Canvas form
    pub submission_id: String,
    /// whatever followed the ids, usually the project name
    pub project_name:  String,
}

/// Whether `part` is a non-empty run of ASCII digits.
fn all_digits(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

/// Splits `name_canvasId_submissionId_project` at the first pair of adjacent
/// all-digit segments. Anything else becomes the student name with empty ids.
pub fn parse_canvas_name(stem: &str) -> CanvasName {
    let parts: Vec<&str> = stem.split('_').collect();
    let ids = parts
        .windows(2)
        .position(|pair| all_digits(pair[0]) && all_digits(pair[1]));

    match ids {
        Some(i) => CanvasName {
            student_name:  parts[..i].join("_"),
            canvas_id:     parts[i].to_string(),
            submission_id: parts[i + 1].to_string(),
            project_name:  parts[i + 2..].join("_"),
        },
        None => CanvasName {
            student_name: stem.to_string(),
            ..CanvasName::default()
        },
    }
}

/// Note for a student folder that holds no Java source.
pub const NO_JAVA_FILES: &str = "No Java files found in submission";

/// One student found on disk: either ready to grade, or known only by name
/// because their files could not be used.
#[derive(Debug, Clone)]
pub enum Discovered {
    /// files were read
    Ready(Submission),
    /// nothing gradable; the student still gets a zero-score result
    Ungradable {
        /// display name from the folder or file name
        student_name: String,
        /// Canvas id, if the name carried one
        student_id:   String,
        /// why nothing could be graded
        reason:       String,
    },
}

impl Discovered {
    /// Student display name
    pub fn student_name(&self) -> &str {
        match self {
            Discovered::Ready(submission) => submission.student_name(),
            Discovered::Ungradable { student_name, .. } => student_name,
        }
    }

    /// Student identifier
    pub fn student_id(&self) -> &str {
        match self {
            Discovered::Ready(submission) => submission.student_id(),
            Discovered::Ungradable { student_id, .. } => student_id,
        }
    }

    /// The submission, when its files were read
    pub fn submission(&self) -> Option<&Submission> {
        match self {
            Discovered::Ready(submission) => Some(submission),
            Discovered::Ungradable { .. } => None,
        }
    }

    /// Why the student cannot be graded, if so
    pub fn ungradable_reason(&self) -> Option<&str> {
        match self {
            Discovered::Ready(_) => None,
            Discovered::Ungradable { reason, .. } => Some(reason),
        }
    }
}

/// Archive droppings that are never student code.
fn is_junk(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == "__MACOSX"))
        || path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("._"))
}

/// Dot-directories such as `.git` or `.idea`.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// Every Java file below `dir`. When some live under a `src` directory, as in
/// an IDE project, only those are kept.
fn java_files_under(dir: &Path) -> Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = java_files(dir, true)?
        .into_iter()
        .filter(|p| !is_junk(p))
        .collect();

    let in_src: Vec<PathBuf> = files
        .iter()
        .filter(|p| {
            p.strip_prefix(dir).is_ok_and(|rel| {
                rel.components()
                    .any(|c| matches!(c, Component::Normal(name) if name == "src"))
            })
        })
        .cloned()
        .collect();

    Ok(if in_src.is_empty() { files } else { in_src })
}

/// A directory's name, or a file's name without its extension.
fn display_name(path: &Path) -> String {
    let name = if path.is_dir() {
        path.file_name()
    } else {
        path.file_stem()
    };
    name.map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Builds one entry from `files`, naming it after `named_by`. Files that
/// cannot be read make the entry ungradable.
fn submission_from(named_by: &Path, files: Result<Vec<PathBuf>>) -> Discovered {
    let name = parse_canvas_name(&display_name(named_by));
    let ungradable = |reason: String| {
        warn!("{}: {reason}", named_by.display());
        Discovered::Ungradable {
            student_name: name.student_name.clone(),
            student_id:   name.canvas_id.clone(),
            reason,
        }
    };

    let files = match files {
        Ok(files) if files.is_empty() => return ungradable(NO_JAVA_FILES.to_string()),
        Ok(files) => files,
        Err(e) => return ungradable(format!("{e:#}")),
    };

    match Submission::from_paths(name.student_name.clone(), name.canvas_id.clone(), &files)
        .with_context(|| format!("Could not read submission {}", named_by.display()))
    {
        Ok(submission) => Discovered::Ready(submission),
        Err(e) => ungradable(format!("{e:#}")),
    }
}

/// Discovers submissions under `path`.
///
/// `path` may be a single `.java` file, a directory directly holding `.java`
/// files (one submission), or a directory whose subdirectories each hold one
/// student's files. Every student folder yields an entry; folders without
/// readable Java files come back as [`Discovered::Ungradable`].
pub fn discover(path: &Path) -> Result<Vec<Discovered>> {
    if path.is_file() {
        if path.extension().is_none_or(|ext| ext != "java") {
            bail!("{} is not a .java file", path.display());
        }
        return Ok(vec![submission_from(path, Ok(vec![path.to_path_buf()]))]);
    }

    if !path.is_dir() {
        bail!("{} does not exist", path.display());
    }

    let direct: Vec<PathBuf> = java_files(path, false)?
        .into_iter()
        .filter(|p| !is_junk(p))
        .collect();
    if !direct.is_empty() {
        debug!("{} holds {} Java file(s) directly", path.display(), direct.len());
        return Ok(vec![submission_from(path, Ok(direct))]);
    }

    let mut dirs: Vec<PathBuf> = std::fs::read_dir(path)
        .with_context(|| format!("Could not read directory {}", path.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_dir() && !is_junk(p) && !is_hidden(p))
        .collect();
    dirs.sort();

    Ok(dirs
        .iter()
        .map(|dir| submission_from(dir, java_files_under(dir)))
        .collect())
}
