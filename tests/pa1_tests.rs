mod support;

use oop_grader::{
    assignments::{Pa1, pa1},
    grade::{Grader, OutputChecker, RubricProvider, StructuralChecker},
};
use support::{FakeRunner, PA1_LOAN_ACCOUNT, PA1_MAIN, PA1_OUTPUT, submission};

#[test]
fn expected_payments_cover_every_rate_term_and_loan() {
    let payments = pa1::expected_payments();
    assert_eq!(payments.len(), 12);

    let five_percent_three_years = payments
        .iter()
        .find(|p| p.rate == 5.0 && p.months == 36 && p.principal == 5000.0)
        .expect("5% / 36 months / 5000 is expected");
    assert!((five_percent_three_years.payment - 149.85).abs() < 1e-9);
}

#[test]
fn well_formed_loan_account_passes_every_class_item() {
    let sub = submission(&[("LoanAccount.java", PA1_LOAN_ACCOUNT), ("Main.java", PA1_MAIN)]);
    let mut rubric = Pa1.rubric();
    Pa1.check_structure(&sub, &mut rubric)
        .expect("every rubric id exists");

    for id in ["class_a", "class_b", "class_c", "class_d", "class_d_i", "class_e", "main_a"] {
        let item = rubric.get(id).expect("item exists");
        assert!(item.passed(), "{id} should pass: {}", item.notes());
        assert_eq!(item.deduction(), 0);
    }
}

#[test]
fn boxed_principal_counts_as_floating_point() {
    let source = r#"
public class LoanAccount {
    private static Double annualInterestRate;
    private Double Principal;

    public LoanAccount(Double Principal) {
        this.Principal = Principal;
    }
}
"#;
    let sub = submission(&[("LoanAccount.java", source)]);
    let mut rubric = Pa1.rubric();
    Pa1.check_structure(&sub, &mut rubric)
        .expect("every rubric id exists");

    assert!(rubric.get("class_a").expect("class_a").passed());
    assert!(rubric.get("class_b").expect("class_b").passed());
    assert!(rubric.get("class_c").expect("class_c").passed());
}

#[test]
fn public_rate_field_loses_class_a() {
    let source = PA1_LOAN_ACCOUNT.replace(
        "private static double annualInterestRate;",
        "public static double annualInterestRate;",
    );
    let sub = submission(&[("LoanAccount.java", &source)]);
    let mut rubric = Pa1.rubric();
    Pa1.check_structure(&sub, &mut rubric)
        .expect("every rubric id exists");

    let item = rubric.get("class_a").expect("class_a");
    assert!(!item.passed());
    assert_eq!(item.deduction(), 5);
    assert!(item.notes().contains("not private"));
}

#[test]
fn one_missing_principal_costs_five_points() {
    let main = PA1_MAIN.replace("new LoanAccount(31000.00)", "new LoanAccount(30000.00)");
    let sub = submission(&[("LoanAccount.java", PA1_LOAN_ACCOUNT), ("Main.java", &main)]);
    let mut rubric = Pa1.rubric();
    Pa1.check_structure(&sub, &mut rubric)
        .expect("every rubric id exists");

    let item = rubric.get("main_a").expect("main_a");
    assert_eq!(item.deduction(), 5);
}

#[test]
fn correct_output_overrides_a_failed_formula() {
    let mut rubric = Pa1.rubric();
    rubric
        .get_mut("class_d_i")
        .expect("class_d_i")
        .fail_max("Math.pow not used in payment formula");

    Pa1.check_output(PA1_OUTPUT, &mut rubric)
        .expect("every rubric id exists");

    let item = rubric.get("class_d_i").expect("class_d_i");
    assert!(item.passed());
    assert_eq!(item.deduction(), 0);
}

#[test]
fn output_without_payments_overturns_a_passed_formula() {
    let output = "\
Monthly payments at 1% interest
36     100.00    200.00
60     100.00    200.00
72     100.00    200.00
Monthly payments at 5% interest
36     100.00    200.00
60     100.00    200.00
72     100.00    200.00
";
    let mut rubric = Pa1.rubric();
    Pa1.check_output(output, &mut rubric)
        .expect("every rubric id exists");

    let item = rubric.get("class_d_i").expect("class_d_i");
    assert!(!item.passed());
    assert_eq!(item.deduction(), item.max_deduction());

    // Formatting is still right even though the numbers are not.
    assert!(rubric.get("main_b").expect("main_b").passed());
    assert!(rubric.get("main_c").expect("main_c").passed());
    assert!(rubric.get("main_d").expect("main_d").passed());
    assert_eq!(rubric.get("main_e").expect("main_e").deduction(), 10);
}

#[test]
fn missing_terms_cost_a_third_each() {
    let two_terms: String = PA1_OUTPUT
        .lines()
        .filter(|line| !line.starts_with("72"))
        .map(|line| format!("{line}\n"))
        .collect();
    let one_term: String = two_terms
        .lines()
        .filter(|line| !line.starts_with("60"))
        .map(|line| format!("{line}\n"))
        .collect();

    let deduction_for = |output: &str| {
        let mut rubric = Pa1.rubric();
        Pa1.check_output(output, &mut rubric)
            .expect("every rubric id exists");
        rubric.get("main_f").expect("main_f").deduction()
    };

    let full = deduction_for(PA1_OUTPUT);
    let one_missing = deduction_for(&two_terms);
    let two_missing = deduction_for(&one_term);
    assert_eq!(full, 0);
    assert_eq!(one_missing, 3);
    assert_eq!(two_missing, 6);
    assert!(full <= one_missing && one_missing <= two_missing);
}

#[test]
fn one_loan_column_covers_every_rate_and_term() {
    let output = "\
Monthly payments at 1% interest
36     141.04
60     85.47
72     71.58
Monthly payments at 5% interest
36     149.85
60     94.36
72     80.52
";
    let mut rubric = Pa1.rubric();
    Pa1.check_output(output, &mut rubric)
        .expect("every rubric id exists");

    let rates = rubric.get("main_e").expect("main_e");
    assert!(rates.passed());
    assert_eq!(rates.deduction(), 0);
    let terms = rubric.get("main_f").expect("main_f");
    assert!(terms.passed());
    assert_eq!(terms.deduction(), 0);
    assert_eq!(rubric.get("class_d_i").expect("class_d_i").deduction(), 5);
}

#[test]
fn a_single_payment_is_enough_for_its_rate_and_term() {
    let output = "\
Monthly payments at 1% interest
36     141.04
Monthly payments at 5% interest
";
    let mut rubric = Pa1.rubric();
    Pa1.check_output(output, &mut rubric)
        .expect("every rubric id exists");

    assert_eq!(rubric.get("main_e").expect("main_e").deduction(), 5);
    assert_eq!(rubric.get("main_f").expect("main_f").deduction(), 6);
}

#[test]
fn checks_are_idempotent() {
    let sub = submission(&[("LoanAccount.java", PA1_LOAN_ACCOUNT), ("Main.java", PA1_MAIN)]);
    let mut once = Pa1.rubric();
    Pa1.check_structure(&sub, &mut once).expect("structure");
    Pa1.check_output(PA1_OUTPUT, &mut once).expect("output");

    let mut twice = once.clone();
    Pa1.check_structure(&sub, &mut twice).expect("structure");
    Pa1.check_output(PA1_OUTPUT, &mut twice).expect("output");

    assert_eq!(once, twice);
}

#[tokio::test]
async fn correct_submission_scores_full_marks() {
    let sub = submission(&[("LoanAccount.java", PA1_LOAN_ACCOUNT), ("Main.java", PA1_MAIN)]);
    let grader = Grader::new(&Pa1, FakeRunner::printing(PA1_OUTPUT));

    let result = grader.grade(&sub).await.expect("grading succeeds");

    assert!(result.compilation_success);
    assert!(result.execution_success);
    for item in &result.rubric_items {
        assert_eq!(item.deduction(), 0, "{} lost points: {}", item.id(), item.notes());
    }
    assert!(result.oop_notes.is_empty());
    assert_eq!(result.total_score, 100);
    assert_eq!(result.letter_grade(), "A");
    assert!(result.deductions().is_empty());
}
