#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::time::Duration;

/// Category of rubric items that can only be verified from program output
pub const MAIN_METHOD: &str = "Main Method";

/// Default output categories for assignments that do not override them
pub const DEFAULT_OUTPUT_CATEGORIES: &[&str] = &[MAIN_METHOD];

/// Note attached to output items when the submission did not compile
pub const NOTE_COMPILATION_FAILED: &str = "Could not verify: compilation failed";

/// Note attached to output items when the program did not run to completion
pub const NOTE_RUNTIME_ERROR: &str = "Could not verify: runtime error";

/// Default limit for one javac invocation
pub const DEFAULT_JAVAC_TIMEOUT: Duration = Duration::from_secs(30);

/// Default limit for one run of a student's program
pub const DEFAULT_JAVA_TIMEOUT: Duration = Duration::from_secs(10);
