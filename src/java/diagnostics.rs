#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};
use tabled::Tabled;
use typed_builder::TypedBuilder;

#[derive(Tabled, Serialize, Deserialize, TypedBuilder, Clone, Debug, PartialEq, Eq)]
#[builder(field_defaults(setter(into)))]
/// One `file:line: kind: message` header from javac's output.
pub struct JavacDiagnostic {
    /// file the diagnostic points at, as javac printed it
    #[tabled(rename = "File")]
    path:        String,
    /// 1-based line number
    #[tabled(rename = "Line")]
    line_number: u32,
    /// error or warning
    #[tabled(rename = "Kind")]
    severity:    DiagnosticSeverity,
    /// text after the `error:` or `warning:` marker
    #[tabled(rename = "Message")]
    message:     String,
}

impl JavacDiagnostic {
    /// Last component of the path, e.g. `Main.java`. Both separators are
    /// honored so Windows paths split too.
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.path.as_str())
    }

    /// Path as printed
    pub fn path(&self) -> &Path {
        Path::new(&self.path)
    }

    /// Error or warning
    pub fn severity(&self) -> DiagnosticSeverity {
        self.severity
    }

    /// Line the diagnostic points at
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Message text after the `error:`/`warning:` marker
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Kind of javac diagnostic. Serialized upper-case, e.g. `"ERROR"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiagnosticSeverity {
    /// compilation cannot succeed
    Error,
    /// reported but not fatal
    Warning,
}

impl DiagnosticSeverity {
    /// Whether this is an error
    pub fn is_error(self) -> bool {
        self == DiagnosticSeverity::Error
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiagnosticSeverity::Error => "ERROR",
            DiagnosticSeverity::Warning => "WARNING",
        })
    }
}
