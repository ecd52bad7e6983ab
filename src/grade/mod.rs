#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Flags fields that should have been private.
pub mod lint;
/// Lenient name, type, and number comparisons.
pub mod matching;
/// The grading pipeline and the traits assignments implement.
pub mod pipeline;
/// Terminal rendering of results.
pub mod report;
/// Graded submission results.
pub mod results;
/// Rubric items and their verdicts.
pub mod rubric;
/// Score and letter grade computation.
pub mod score;

pub use pipeline::{Assignment, Grader, OutputChecker, RubricProvider, Stage, StructuralChecker};
pub use results::{Deduction, GradingResult};
pub use rubric::{Rubric, RubricError, RubricItem};
pub use score::{ScorePolicy, letter_grade};
