#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Tree-sitter query strings used by the Java fact extractor and toolchain.

/// Tree-sitter query that returns name of the package
/// * `name`: name of the package
pub const PACKAGE_QUERY: &str = include_str!("package.scm");

/// Tree-sitter query that returns classes declared with modifiers
/// * `modifiers`: the modifier list, e.g. `public final`
/// * `name`: name of the class
pub const MODIFIED_CLASS_QUERY: &str = include_str!("public_class.scm");

/// Tree-sitter query to check the existence of a main method.
/// * `modifiers`: modifiers of the method, expected to hold `public static`
/// * `name`: always `main`
pub const MAIN_METHOD_QUERY: &str = include_str!("main_method.scm");
