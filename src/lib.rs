//! # oop-grader
//!
//! An autograder for introductory object-oriented Java assignments. Each
//! submission is analyzed structurally, compiled, run, and its output compared
//! against values computed from the assignment handout.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The gradable assignments
pub mod assignments;
/// Environment-driven configuration
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// For all things related to grading
pub mod grade;
/// For analyzing, compiling, and running Java sources
pub mod java;
/// Spawning external tools with deadlines
pub mod process;
/// Finding student submissions on disk
pub mod submissions;
/// Utility functions for convenience
pub mod util;

/// Defined for convenience
type Dict = std::collections::HashMap<String, String>;
