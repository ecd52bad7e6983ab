#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// javac diagnostic types.
pub mod diagnostics;
/// Structural facts extracted from Java source.
pub mod extract;
/// Class, field, method, and constructor fact types.
pub mod facts;
/// A single Java source file and what was detected in it.
pub mod file;
/// Tree-sitter parser wrapper.
pub mod parser;
/// Parsers for javac output.
pub mod parsers;
/// Scratch directories for compiling submissions.
pub mod paths;
/// A student's submission as a set of source files.
pub mod project;
/// Tree-sitter query strings used by Java analysis.
pub mod queries;
/// Compiling and running submissions.
pub mod toolchain;

pub use diagnostics::{DiagnosticSeverity, JavacDiagnostic};
pub use extract::{Extraction, SearchScope, SourceFacts};
pub use facts::{ClassFacts, ConstructorFact, FieldFact, MethodFact};
pub use file::SourceFile;
pub use parser::Parser;
pub use paths::ScratchSpace;
pub use project::{ClassView, Submission};
pub use toolchain::{BuildRunner, CompileReport, JavaToolchain, RunOutcome};
