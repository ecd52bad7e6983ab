#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{ffi::OsString, time::Duration};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, warn};

use super::{
    diagnostics::JavacDiagnostic, file::SourceFile, parsers::javac_diagnostics,
    paths::ScratchSpace,
};
use crate::{
    config,
    constants::DEFAULT_JAVAC_TIMEOUT,
    process::{self, Invocation},
    util::jdk_tool,
};

/// What javac had to say about a submission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompileReport {
    /// javac exited with status zero
    pub success:     bool,
    /// compiler output, with scratch paths removed
    pub errors:      String,
    /// diagnostics parsed out of `errors`
    pub diagnostics: Vec<JavacDiagnostic>,
}

impl CompileReport {
    /// A failed compilation that never produced diagnostics.
    pub fn failed(errors: impl Into<String>) -> Self {
        Self {
            success:     false,
            errors:      errors.into(),
            diagnostics: vec![],
        }
    }

    /// Number of diagnostics with error severity
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity().is_error())
            .count()
    }
}

/// How running the compiled program went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exited with status zero
    Completed {
        /// captured standard output
        stdout: String,
    },
    /// Exited with a non-zero status
    Crashed {
        /// whatever was printed before the crash
        stdout: String,
        /// captured standard error
        stderr: String,
    },
    /// Killed after running past the limit
    TimedOut {
        /// the wall-clock limit that was exceeded
        limit: Duration,
    },
    /// No file declares `public static void main`
    NoEntryPoint,
    /// The runtime could not be started at all
    Unavailable {
        /// why not
        reason: String,
    },
}

impl RunOutcome {
    /// Only [`RunOutcome::Completed`] counts as success.
    pub fn success(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }

    /// Standard output captured before the program stopped.
    pub fn stdout(&self) -> &str {
        match self {
            RunOutcome::Completed { stdout } | RunOutcome::Crashed { stdout, .. } => stdout,
            _ => "",
        }
    }

    /// Text describing the failure, or empty for a completed run.
    pub fn error_text(&self) -> String {
        match self {
            RunOutcome::Completed { .. } => String::new(),
            RunOutcome::Crashed { stderr, .. } => format!("Runtime error:\n{stderr}"),
            RunOutcome::TimedOut { limit } => format!(
                "Execution timed out after {}s (possible infinite loop)",
                limit.as_secs()
            ),
            RunOutcome::NoEntryPoint => {
                "No entry point: no file declares public static void main".to_string()
            }
            RunOutcome::Unavailable { reason } => reason.clone(),
        }
    }

    /// Short label used in notes, e.g. `timed out`.
    pub fn label(&self) -> &'static str {
        match self {
            RunOutcome::Completed { .. } => "completed",
            RunOutcome::Crashed { .. } => "crashed",
            RunOutcome::TimedOut { .. } => "timed out",
            RunOutcome::NoEntryPoint => "no entry point",
            RunOutcome::Unavailable { .. } => "runtime unavailable",
        }
    }
}

/// Compiles and runs a submission. The grader only talks to this trait, so
/// tests can substitute an in-memory runner for the JDK.
#[allow(async_fn_in_trait)]
pub trait BuildRunner {
    /// Compiles `files` into `scratch`.
    async fn compile(&self, scratch: &ScratchSpace, files: &[SourceFile]) -> CompileReport;

    /// Runs the entry point among `files`, previously compiled into
    /// `scratch`, for at most `timeout`.
    async fn run(
        &self,
        scratch: &ScratchSpace,
        files: &[SourceFile],
        timeout: Duration,
    ) -> RunOutcome;
}

/// Picks the file to launch. When several files declare `main`, one whose name
/// mentions `main`, `test`, `driver`, or `demo` wins; otherwise the first.
pub fn entry_point(files: &[SourceFile]) -> Option<&SourceFile> {
    let candidates: Vec<&SourceFile> = files.iter().filter(|f| f.has_main()).collect();

    candidates
        .iter()
        .find(|f| {
            let stem = f.stem().to_lowercase();
            ["main", "test", "driver", "demo"]
                .iter()
                .any(|hint| stem.contains(hint))
        })
        .or_else(|| candidates.first())
        .copied()
}

/// Normalizes captured process output: lossy UTF-8, `\n` line endings, and
/// no scratch paths.
fn clean_output(scratch: &ScratchSpace, bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes).replace("\r\n", "\n");
    scratch.relativize(&text)
}

/// Writes every file under `src/`, in a directory matching its package.
fn stage_sources(scratch: &ScratchSpace, files: &[SourceFile]) -> Result<Vec<OsString>> {
    let mut staged = Vec::with_capacity(files.len());
    for file in files {
        let target = scratch.source_dir().join(file.package_relative_path());
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }
        std::fs::write(&target, file.code())
            .with_context(|| format!("Could not write {}", target.display()))?;
        staged.push(target.into_os_string());
    }
    Ok(staged)
}

/// The real JDK: `javac` and `java` found on `PATH`.
#[derive(Debug, Clone)]
pub struct JavaToolchain {
    /// limit for one javac invocation
    compile_timeout: Duration,
}

impl Default for JavaToolchain {
    fn default() -> Self {
        Self::new(DEFAULT_JAVAC_TIMEOUT)
    }
}

impl JavaToolchain {
    /// Creates a toolchain with the given compile limit.
    pub fn new(compile_timeout: Duration) -> Self {
        Self { compile_timeout }
    }

    /// Creates a toolchain using the configured compile limit.
    pub fn from_config() -> Self {
        Self::new(config::get().javac_timeout())
    }

    /// Limit for one javac invocation
    pub fn compile_timeout(&self) -> Duration {
        self.compile_timeout
    }
}

impl BuildRunner for JavaToolchain {
    async fn compile(&self, scratch: &ScratchSpace, files: &[SourceFile]) -> CompileReport {
        let javac = match jdk_tool("javac") {
            Ok(path) => path,
            Err(e) => {
                warn!("{e:#}");
                return CompileReport::failed(
                    "javac not found. Ensure a JDK is installed and on PATH.",
                );
            }
        };

        let staged = match stage_sources(scratch, files) {
            Ok(staged) => staged,
            Err(e) => return CompileReport::failed(format!("{e:#}")),
        };

        let mut args: Vec<OsString> = vec![
            "-d".into(),
            scratch.build_dir().as_os_str().to_os_string(),
            "-sourcepath".into(),
            scratch.source_dir().as_os_str().to_os_string(),
            "-encoding".into(),
            "UTF-8".into(),
        ];
        args.extend(staged);

        debug!("javac with {} source file(s)", files.len());
        let collected = Invocation::builder()
            .program(javac)
            .args(args)
            .cwd(scratch.root_dir().to_path_buf())
            .deadline(self.compile_timeout)
            .build()
            .collect()
            .await;

        match collected {
            Ok(out) => {
                let mut errors = clean_output(scratch, &out.stderr);
                let stdout = clean_output(scratch, &out.stdout);
                if !stdout.trim().is_empty() {
                    errors.push_str(&stdout);
                }
                let diagnostics = javac_diagnostics(&errors);
                CompileReport {
                    success: out.status.success(),
                    errors,
                    diagnostics,
                }
            }
            Err(e) if process::is_timeout(&e) => CompileReport::failed("Compilation timed out"),
            Err(e) => CompileReport::failed(format!("{e:#}")),
        }
    }

    async fn run(
        &self,
        scratch: &ScratchSpace,
        files: &[SourceFile],
        timeout: Duration,
    ) -> RunOutcome {
        let Some(entry) = entry_point(files) else {
            return RunOutcome::NoEntryPoint;
        };

        let java = match jdk_tool("java") {
            Ok(path) => path,
            Err(e) => {
                warn!("{e:#}");
                return RunOutcome::Unavailable {
                    reason: "java not found. Ensure a JDK is installed and on PATH.".to_string(),
                };
            }
        };

        let args: Vec<OsString> = vec![
            "-cp".into(),
            scratch.build_dir().as_os_str().to_os_string(),
            entry.proper_name().into(),
        ];

        debug!("java {}", entry.proper_name());
        let collected = Invocation::builder()
            .program(java)
            .args(args)
            .cwd(scratch.root_dir().to_path_buf())
            .deadline(timeout)
            .build()
            .collect()
            .await;

        match collected {
            Ok(out) if out.status.success() => RunOutcome::Completed {
                stdout: clean_output(scratch, &out.stdout),
            },
            Ok(out) => RunOutcome::Crashed {
                stdout: clean_output(scratch, &out.stdout),
                stderr: clean_output(scratch, &out.stderr),
            },
            Err(e) if process::is_timeout(&e) => RunOutcome::TimedOut { limit: timeout },
            Err(e) => RunOutcome::Unavailable {
                reason: format!("{e:#}"),
            },
        }
    }
}
