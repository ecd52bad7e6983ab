#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{fmt, time::Duration};

use anyhow::{Result, ensure};

use super::{
    lint::check_oop_practices,
    results::GradingResult,
    rubric::{Rubric, RubricError},
    score::ScorePolicy,
};
use crate::{
    config,
    constants::{
        DEFAULT_JAVA_TIMEOUT, DEFAULT_OUTPUT_CATEGORIES, NOTE_COMPILATION_FAILED,
        NOTE_RUNTIME_ERROR,
    },
    java::{BuildRunner, RunOutcome, ScratchSpace, Submission},
    submissions::Discovered,
};

/// Supplies a fresh rubric for every submission.
pub trait RubricProvider {
    /// Items in their default passing state
    fn rubric(&self) -> Rubric;

    /// Expected program output, shown next to the actual output in reports
    fn expected_output(&self) -> String {
        String::new()
    }
}

/// Grades what can be seen in the source without running it.
pub trait StructuralChecker {
    /// Updates `rubric` from the submission's extracted facts.
    fn check_structure(&self, submission: &Submission, rubric: &mut Rubric)
    -> Result<(), RubricError>;
}

/// Grades what the program printed. Only called after a successful run.
pub trait OutputChecker {
    /// Updates `rubric` from captured standard output.
    fn check_output(&self, output: &str, rubric: &mut Rubric) -> Result<(), RubricError>;
}

/// One gradable assignment: its rubric, both kinds of checks, and a few
/// grading knobs.
pub trait Assignment: RubricProvider + StructuralChecker + OutputChecker + Send + Sync {
    /// Short id used on the command line, e.g. `pa1`
    fn id(&self) -> &'static str;

    /// Human readable title
    fn title(&self) -> &'static str;

    /// Categories whose items lose all points when there is no output to check
    fn output_categories(&self) -> &'static [&'static str] {
        DEFAULT_OUTPUT_CATEGORIES
    }

    /// Field names the lint leaves alone because the rubric grades them
    fn lint_allow_list(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Where a grading run currently is. Runs only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing done yet
    Start,
    /// Every file has been parsed or pattern-scanned
    FactsExtracted,
    /// Structural checks have updated the rubric
    StructurallyChecked,
    /// javac has finished, successfully or not
    Compiled,
    /// The program was launched
    Executed,
    /// Compilation failed, so nothing was launched
    ExecutionSkipped,
    /// Output checks have updated the rubric
    OutputChecked,
    /// Output items took their maximum deduction
    DeductionsAppliedForNoOutput,
    /// Lint notes collected
    LintChecked,
    /// Total score computed
    ScoreComputed,
    /// Result returned
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Fails every item in `categories` with its maximum deduction.
pub fn apply_no_output_deductions(rubric: &mut Rubric, categories: &[&str], note: &str) {
    for item in rubric.iter_mut() {
        if categories.contains(&item.category()) {
            item.fail_max(note);
        }
    }
}

/// Note for output items that could not be verified.
fn no_output_note(compiled: bool, outcome: Option<&RunOutcome>) -> String {
    match (compiled, outcome) {
        (false, _) => NOTE_COMPILATION_FAILED.to_string(),
        (true, Some(outcome)) => format!("{NOTE_RUNTIME_ERROR} ({})", outcome.label()),
        (true, None) => NOTE_RUNTIME_ERROR.to_string(),
    }
}

/// Runs one assignment's pipeline over submissions.
pub struct Grader<'a, R: BuildRunner> {
    /// what is being graded
    assignment:  &'a dyn Assignment,
    /// compiles and runs submissions
    runner:      R,
    /// scoring constants
    policy:      ScorePolicy,
    /// limit for one run of a submission
    run_timeout: Duration,
}

impl<'a, R: BuildRunner> Grader<'a, R> {
    /// Creates a grader with the default policy and run limit.
    pub fn new(assignment: &'a dyn Assignment, runner: R) -> Self {
        Self {
            assignment,
            runner,
            policy: ScorePolicy::default(),
            run_timeout: DEFAULT_JAVA_TIMEOUT,
        }
    }

    /// Creates a grader using the configured policy and run limit.
    pub fn from_config(assignment: &'a dyn Assignment, runner: R) -> Self {
        let cfg = config::get();
        Self::new(assignment, runner)
            .with_policy(cfg.score_policy())
            .with_run_timeout(cfg.java_timeout())
    }

    /// Replaces the scoring constants.
    pub fn with_policy(mut self, policy: ScorePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the run limit.
    pub fn with_run_timeout(mut self, run_timeout: Duration) -> Self {
        self.run_timeout = run_timeout;
        self
    }

    /// The assignment being graded
    pub fn assignment(&self) -> &dyn Assignment {
        self.assignment
    }

    /// Scoring constants in use
    pub fn policy(&self) -> &ScorePolicy {
        &self.policy
    }

    /// Logs a stage transition.
    fn enter(&self, submission: &Submission, stage: Stage) {
        tracing::debug!(
            "[{}] {} -> {}",
            self.assignment.id(),
            submission.student_name(),
            stage
        );
    }

    /// Grades one submission.
    ///
    /// Compilation and execution problems are recorded in the result. Errors
    /// are reserved for problems with the grading itself, such as a check
    /// naming a rubric item that does not exist.
    pub async fn grade(&self, submission: &Submission) -> Result<GradingResult> {
        let assignment = self.assignment;
        self.enter(submission, Stage::Start);
        ensure!(
            !submission.files().is_empty(),
            "Submission for {} has no Java files",
            submission.student_name()
        );

        for file in submission.files() {
            if let Some(reason) = file.facts().fallback_reason() {
                tracing::debug!("{}: pattern fallback ({reason})", file.file_name());
            }
        }
        self.enter(submission, Stage::FactsExtracted);

        let mut rubric = assignment.rubric();
        assignment.check_structure(submission, &mut rubric)?;
        self.enter(submission, Stage::StructurallyChecked);

        let scratch = ScratchSpace::new()?;
        let compiled = self.runner.compile(&scratch, submission.files()).await;
        if !compiled.success {
            tracing::debug!(
                "{}: javac reported {} error(s)",
                submission.student_name(),
                compiled.error_count()
            );
        }
        self.enter(submission, Stage::Compiled);

        let outcome = if compiled.success {
            let outcome = self
                .runner
                .run(&scratch, submission.files(), self.run_timeout)
                .await;
            self.enter(submission, Stage::Executed);
            Some(outcome)
        } else {
            self.enter(submission, Stage::ExecutionSkipped);
            None
        };
        drop(scratch);

        match outcome.as_ref() {
            Some(outcome) if outcome.success() => {
                assignment.check_output(outcome.stdout(), &mut rubric)?;
                self.enter(submission, Stage::OutputChecked);
            }
            _ => {
                let note = no_output_note(compiled.success, outcome.as_ref());
                apply_no_output_deductions(&mut rubric, assignment.output_categories(), &note);
                self.enter(submission, Stage::DeductionsAppliedForNoOutput);
            }
        }

        let oop_notes = check_oop_practices(submission, assignment.lint_allow_list());
        self.enter(submission, Stage::LintChecked);

        let execution_success = outcome.as_ref().is_some_and(RunOutcome::success);
        let result = GradingResult::builder()
            .student_name(submission.student_name())
            .student_id(submission.student_id())
            .rubric_items(rubric.into_items())
            .compilation_success(compiled.success)
            .execution_success(execution_success)
            .actual_output(outcome.as_ref().map(|o| o.stdout()).unwrap_or_default())
            .source_code(submission.display_source())
            .compiler_errors(compiled.errors)
            .javac_diagnostics(compiled.diagnostics)
            .runtime_errors(outcome.as_ref().map(RunOutcome::error_text).unwrap_or_default())
            .oop_notes(oop_notes)
            .expected_output(assignment.expected_output())
            .build()
            .scored(&self.policy);
        self.enter(submission, Stage::ScoreComputed);

        tracing::info!(
            "{}: {}/{} ({})",
            result.student_name,
            result.total_score,
            result.max_score,
            result.letter_grade()
        );
        self.enter(submission, Stage::Done);
        Ok(result)
    }

    /// Grades one submission, turning any grading error into a zero score
    /// with the error as its message.
    pub async fn grade_or_zero(&self, submission: &Submission) -> GradingResult {
        match self.grade(submission).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Could not grade {}: {e:#}", submission.student_name());
                GradingResult::errored(
                    submission.student_name(),
                    submission.student_id(),
                    format!("{e:#}"),
                    self.policy.max_score,
                )
            }
        }
    }

    /// Grades one discovered student. Students with nothing gradable get a
    /// zero-score result carrying the reason.
    pub async fn grade_discovered(&self, entry: &Discovered) -> GradingResult {
        match entry {
            Discovered::Ready(submission) => self.grade_or_zero(submission).await,
            Discovered::Ungradable {
                student_name,
                student_id,
                reason,
            } => GradingResult::errored(
                student_name.as_str(),
                student_id.as_str(),
                reason.clone(),
                self.policy.max_score,
            ),
        }
    }
}
