#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::java::diagnostics::{DiagnosticSeverity, JavacDiagnostic};

peg::parser! {
    /// Grammar for the header line of a javac diagnostic, e.g.
    /// `src/Main.java:12: error: ';' expected`.
    pub grammar parser() for str {
        /// optional spaces or tabs
        rule _() = quiet!{[' ' | '\t']*}

        /// one or more digits
        rule number() -> u32
            = n:$(['0'..='9']+) {? n.parse().or(Err("u32")) }

        /// everything before the `:<line>:` separator, so drive letters and
        /// spaces in paths survive
        rule path() -> &'input str
            = $((!(":" number() ":") [_])+)

        /// `error` or `warning`
        rule severity() -> DiagnosticSeverity
            = "error" { DiagnosticSeverity::Error }
            / "warning" { DiagnosticSeverity::Warning }

        /// parses one header line into a `JavacDiagnostic`
        pub rule parse_diag() -> JavacDiagnostic
            = _ p:path() ":" l:number() ":" _ s:severity() ":" _ m:$([_]*)
            {
                JavacDiagnostic::builder()
                    .path(p.trim())
                    .line_number(l)
                    .severity(s)
                    .message(m.trim_end())
                    .build()
            }
    }
}

/// Parses every diagnostic header line in javac's output. Continuation lines
/// (source excerpts, carets, symbol details) are skipped.
pub fn javac_diagnostics(output: &str) -> Vec<JavacDiagnostic> {
    output
        .lines()
        .filter_map(|line| parser::parse_diag(line).ok())
        .collect()
}
