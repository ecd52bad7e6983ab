mod support;

use std::{
    fs,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use oop_grader::{
    assignments::Pa1,
    constants::{MAIN_METHOD, NOTE_COMPILATION_FAILED},
    grade::{
        Assignment, Grader, OutputChecker, Rubric, RubricError, RubricProvider, ScorePolicy,
        StructuralChecker, pipeline::apply_no_output_deductions,
    },
    java::{RunOutcome, Submission},
    submissions::{NO_JAVA_FILES, discover},
};
use support::{FakeRunner, PA1_LOAN_ACCOUNT, PA1_MAIN, PA1_OUTPUT, submission};
use tempfile::TempDir;

/// PA1 that counts how often its output checks run.
#[derive(Default)]
struct CountingPa1 {
    output_calls: AtomicUsize,
}

impl RubricProvider for CountingPa1 {
    fn rubric(&self) -> Rubric {
        Pa1.rubric()
    }
}

impl StructuralChecker for CountingPa1 {
    fn check_structure(
        &self,
        submission: &Submission,
        rubric: &mut Rubric,
    ) -> Result<(), RubricError> {
        Pa1.check_structure(submission, rubric)
    }
}

impl OutputChecker for CountingPa1 {
    fn check_output(&self, output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
        self.output_calls.fetch_add(1, Ordering::SeqCst);
        Pa1.check_output(output, rubric)
    }
}

impl Assignment for CountingPa1 {
    fn id(&self) -> &'static str {
        "counting"
    }

    fn title(&self) -> &'static str {
        "Counting PA1"
    }
}

/// Checks that refer to an item the rubric does not have.
struct BrokenChecks;

impl RubricProvider for BrokenChecks {
    fn rubric(&self) -> Rubric {
        Pa1.rubric()
    }
}

impl StructuralChecker for BrokenChecks {
    fn check_structure(&self, _: &Submission, rubric: &mut Rubric) -> Result<(), RubricError> {
        rubric.get_mut("no_such_item")?.pass("unreachable");
        Ok(())
    }
}

impl OutputChecker for BrokenChecks {
    fn check_output(&self, _: &str, _: &mut Rubric) -> Result<(), RubricError> {
        Ok(())
    }
}

impl Assignment for BrokenChecks {
    fn id(&self) -> &'static str {
        "broken"
    }

    fn title(&self) -> &'static str {
        "Broken"
    }
}

fn pa1_submission() -> Submission {
    submission(&[("LoanAccount.java", PA1_LOAN_ACCOUNT), ("Main.java", PA1_MAIN)])
}

fn main_items(rubric_items: &[oop_grader::grade::RubricItem]) -> Vec<&oop_grader::grade::RubricItem> {
    rubric_items
        .iter()
        .filter(|item| item.category() == MAIN_METHOD)
        .collect()
}

#[tokio::test]
async fn compile_failure_skips_execution_and_output_checks() {
    let assignment = CountingPa1::default();
    let grader = Grader::new(&assignment, FakeRunner::not_compiling());

    let result = grader
        .grade(&pa1_submission())
        .await
        .expect("grading succeeds");

    assert_eq!(assignment.output_calls.load(Ordering::SeqCst), 0);
    assert!(!result.compilation_success);
    assert!(!result.execution_success);
    assert!(result.compiler_errors.contains("';' expected"));
    assert_eq!(result.javac_diagnostics.len(), 1);
    assert_eq!(result.javac_diagnostics[0].line_number(), 3);

    let main = main_items(&result.rubric_items);
    assert_eq!(main.len(), 6);
    for item in main {
        assert!(!item.passed());
        assert_eq!(item.deduction(), item.max_deduction());
        assert_eq!(item.notes(), NOTE_COMPILATION_FAILED);
    }
    assert!(result.rubric_items.iter().filter(|i| i.category() != MAIN_METHOD).all(|i| i.passed()));
    assert_eq!(result.total_score, 50);
    assert_eq!(result.letter_grade(), "F");
}

#[tokio::test]
async fn crash_keeps_partial_output_and_labels_the_note() {
    let assignment = CountingPa1::default();
    let runner = FakeRunner::ending_with(RunOutcome::Crashed {
        stdout: "Monthly payments at 1% interest\n".to_string(),
        stderr: "Exception in thread \"main\" java.lang.ArithmeticException".to_string(),
    });
    let grader = Grader::new(&assignment, runner);

    let result = grader
        .grade(&pa1_submission())
        .await
        .expect("grading succeeds");

    assert_eq!(assignment.output_calls.load(Ordering::SeqCst), 0);
    assert!(result.compilation_success);
    assert!(!result.execution_success);
    assert_eq!(result.actual_output, "Monthly payments at 1% interest\n");
    assert!(result.runtime_errors.starts_with("Runtime error:"));
    for item in main_items(&result.rubric_items) {
        assert_eq!(item.notes(), "Could not verify: runtime error (crashed)");
    }
}

#[tokio::test]
async fn timeout_is_reported_as_such() {
    let runner = FakeRunner::ending_with(RunOutcome::TimedOut {
        limit: Duration::from_secs(10),
    });
    let grader = Grader::new(&Pa1, runner);

    let result = grader
        .grade(&pa1_submission())
        .await
        .expect("grading succeeds");

    assert!(result.runtime_errors.contains("timed out after 10s"));
    for item in main_items(&result.rubric_items) {
        assert_eq!(item.deduction(), item.max_deduction());
        assert_eq!(item.notes(), "Could not verify: runtime error (timed out)");
    }
}

#[tokio::test]
async fn successful_run_checks_output_exactly_once() {
    let assignment = CountingPa1::default();
    let grader = Grader::new(&assignment, FakeRunner::printing(PA1_OUTPUT));

    let result = grader
        .grade(&pa1_submission())
        .await
        .expect("grading succeeds");

    assert_eq!(assignment.output_calls.load(Ordering::SeqCst), 1);
    assert!(result.execution_success);
    assert_eq!(result.actual_output, PA1_OUTPUT);
    assert!(result.source_code.contains("// === LoanAccount.java ==="));
}

#[tokio::test]
async fn empty_submission_scores_zero_with_a_message() {
    let grader = Grader::new(&Pa1, FakeRunner::printing(PA1_OUTPUT));
    let empty = Submission::new("Empty Student", "", vec![]);

    let result = grader.grade_or_zero(&empty).await;

    assert_eq!(result.total_score, 0);
    assert_eq!(result.letter_grade(), "F");
    assert!(
        result
            .error_message
            .as_deref()
            .is_some_and(|m| m.contains("no Java files"))
    );
}

#[tokio::test]
async fn every_discovered_folder_gets_a_result() {
    let dir = TempDir::new().expect("temp dir");
    let alice = dir.path().join("alice_1_10_pa1");
    let bob = dir.path().join("bob_333_444_PA1");
    fs::create_dir_all(&alice).expect("create alice");
    fs::create_dir_all(&bob).expect("create bob");
    fs::write(alice.join("LoanAccount.java"), PA1_LOAN_ACCOUNT).expect("write class");
    fs::write(alice.join("Main.java"), PA1_MAIN).expect("write main");
    fs::write(bob.join("submission.zip"), "PK").expect("write archive");

    let found = discover(dir.path()).expect("discovery succeeds");
    let grader = Grader::new(&Pa1, FakeRunner::printing(PA1_OUTPUT));
    let mut results = Vec::new();
    for entry in &found {
        results.push(grader.grade_discovered(entry).await);
    }

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].student_name, "alice");
    assert!(results[0].error_message.is_none());

    let bob = &results[1];
    assert_eq!(bob.student_name, "bob");
    assert_eq!(bob.student_id, "333");
    assert_eq!(bob.total_score, 0);
    assert_eq!(bob.max_score, 100);
    assert_eq!(bob.error_message.as_deref(), Some(NO_JAVA_FILES));
}

#[tokio::test]
async fn unknown_rubric_item_is_a_grading_error() {
    let grader = Grader::new(&BrokenChecks, FakeRunner::printing(PA1_OUTPUT));

    let err = grader
        .grade(&pa1_submission())
        .await
        .expect_err("check names a missing item");

    assert!(format!("{err:#}").contains("no_such_item"));
}

#[tokio::test]
async fn exposed_fields_cost_lint_points() {
    let source = PA1_LOAN_ACCOUNT.replace(
        "private double principal;",
        "private double principal;\n    public int count;",
    );
    let sub = submission(&[("LoanAccount.java", &source), ("Main.java", PA1_MAIN)]);
    let grader = Grader::new(&Pa1, FakeRunner::printing(PA1_OUTPUT));

    let result = grader.grade(&sub).await.expect("grading succeeds");

    assert_eq!(result.oop_notes, vec!["Field 'count' should be private".to_string()]);
    assert_eq!(result.lint_penalty, 2);
    assert_eq!(result.total_score, 98);
    let last = result.deductions().pop().expect("lint deduction listed");
    assert_eq!(last.points, 2);
}

#[tokio::test]
async fn policy_changes_the_maximum() {
    let policy = ScorePolicy {
        max_score: 50,
        ..ScorePolicy::default()
    };
    let grader = Grader::new(&Pa1, FakeRunner::printing(PA1_OUTPUT)).with_policy(policy);

    let result = grader
        .grade(&pa1_submission())
        .await
        .expect("grading succeeds");

    assert_eq!(result.max_score, 50);
    assert_eq!(result.total_score, 50);
}

#[test]
fn no_output_deductions_touch_only_listed_categories() {
    let mut rubric = Pa1.rubric();
    apply_no_output_deductions(&mut rubric, &[MAIN_METHOD], "no output");

    for item in rubric.items() {
        if item.category() == MAIN_METHOD {
            assert_eq!(item.deduction(), item.max_deduction());
            assert_eq!(item.notes(), "no output");
        } else {
            assert!(item.passed());
        }
    }
    assert_eq!(rubric.total_deductions(), 50);
}
