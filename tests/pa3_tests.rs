mod support;

use oop_grader::{
    assignments::{Pa3, pa3},
    grade::{Grader, OutputChecker, RubricProvider, StructuralChecker},
};
use support::{FakeRunner, PA2_LOAN_ACCOUNT, PA3_CUSTOMER, submission};

const CUSTOMER_ITEMS: [&str; 7] = [
    "cust_props",
    "cust_constructor",
    "cust_getter_firstname",
    "cust_getter_lastname",
    "cust_getter_ssn",
    "cust_addloan",
    "cust_printreport",
];

#[test]
fn expected_payments_match_the_handout() {
    let payments: Vec<f64> = pa3::expected_payments().iter().map(|(_, p)| *p).collect();
    let handout = [401.46, 226.45, 1157.79, 1481.70, 128.62];
    for (actual, expected) in payments.iter().zip(handout) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    let text = pa3::expected_output_text();
    assert!(text.starts_with("Account Report for Customer: Tony Stark with SSN 111-22-3333\n\n"));
    assert!(text.contains("Account Report for Customer: Gal Gadot with SSN 444-55-6666"));
    assert!(text.contains("Vehicle VIN: NXK6767876"));
    assert!(text.contains("    783 Maple Lane\n    State College, PA 16801"));
}

#[test]
fn complete_customer_class_passes_every_item() {
    let sub = submission(&[
        ("Customer.java", PA3_CUSTOMER),
        ("LoanAccount.java", PA2_LOAN_ACCOUNT),
    ]);
    let mut rubric = Pa3.rubric();
    Pa3.check_structure(&sub, &mut rubric)
        .expect("every rubric id exists");

    for id in CUSTOMER_ITEMS {
        let item = rubric.get(id).expect("item exists");
        assert!(item.passed(), "{id} should pass: {}", item.notes());
    }
}

#[test]
fn renamed_customer_class_is_still_found() {
    let source = PA3_CUSTOMER
        .replace("class Customer", "class BankCustomer")
        .replace("public Customer(", "public BankCustomer(");
    let sub = submission(&[("BankCustomer.java", &source)]);
    let mut rubric = Pa3.rubric();
    Pa3.check_structure(&sub, &mut rubric)
        .expect("every rubric id exists");

    assert!(rubric.get("cust_constructor").expect("cust_constructor").passed());
    assert!(rubric.get("cust_printreport").expect("cust_printreport").passed());
}

#[test]
fn missing_customer_fails_every_customer_item() {
    let sub = submission(&[("LoanAccount.java", PA2_LOAN_ACCOUNT)]);
    let mut rubric = Pa3.rubric();
    Pa3.check_structure(&sub, &mut rubric)
        .expect("every rubric id exists");

    for id in CUSTOMER_ITEMS {
        let item = rubric.get(id).expect("item exists");
        assert_eq!(item.deduction(), item.max_deduction(), "{id}");
        assert_eq!(item.notes(), "Customer class not found");
    }
    assert!(rubric.get("main_code").expect("main_code").passed());
}

#[test]
fn getter_with_wrong_name_is_not_counted() {
    let source = PA3_CUSTOMER.replace("getSSN()", "fetchNumber()");
    let sub = submission(&[("Customer.java", &source)]);
    let mut rubric = Pa3.rubric();
    Pa3.check_structure(&sub, &mut rubric)
        .expect("every rubric id exists");

    let item = rubric.get("cust_getter_ssn").expect("cust_getter_ssn");
    assert!(!item.passed());
    assert_eq!(item.deduction(), 3);
    assert!(rubric.get("cust_getter_firstname").expect("first").passed());
}

#[test]
fn each_missing_payment_costs_two_points() {
    let output = pa3::expected_output_text()
        .replace("$1481.70", "$1400.00")
        .replace("$226.45", "$200.00");
    let mut rubric = Pa3.rubric();
    Pa3.check_output(&output, &mut rubric)
        .expect("every rubric id exists");

    let item = rubric.get("main_numbers").expect("main_numbers");
    assert_eq!(item.deduction(), 4);
    assert!(item.notes().contains("Mortgage 2 payment"));
    assert!(item.notes().contains("Car Loan 2 payment"));
}

#[test]
fn full_report_confirms_failed_customer_items() {
    let mut rubric = Pa3.rubric();
    for id in ["cust_printreport", "cust_addloan", "cust_getter_ssn"] {
        rubric.get_mut(id).expect("item exists").fail_max("not found");
    }

    Pa3.check_output(&pa3::expected_output_text(), &mut rubric)
        .expect("every rubric id exists");

    for id in ["cust_printreport", "cust_addloan", "cust_getter_ssn"] {
        assert!(rubric.get(id).expect("item exists").passed(), "{id}");
    }
}

#[test]
fn one_customer_report_is_partial_credit() {
    let full = pa3::expected_output_text();
    let (tony_only, _) = full
        .split_once("Account Report for Customer: Gal")
        .expect("second report present");
    let mut rubric = Pa3.rubric();
    rubric
        .get_mut("cust_printreport")
        .expect("cust_printreport")
        .fail_max("printMonthlyReport() method not found");

    Pa3.check_output(tony_only, &mut rubric)
        .expect("every rubric id exists");

    let item = rubric.get("cust_printreport").expect("cust_printreport");
    assert!(!item.passed());
    assert_eq!(item.deduction(), 7);
}

#[test]
fn dollar_amounts_with_one_decimal_lose_main_decimal() {
    let output = pa3::expected_output_text().replace("$35.12", "$35.1");
    let mut rubric = Pa3.rubric();
    Pa3.check_output(&output, &mut rubric)
        .expect("every rubric id exists");

    let item = rubric.get("main_decimal").expect("main_decimal");
    assert_eq!(item.deduction(), item.max_deduction());
    assert!(item.notes().contains("35.1"));
}

#[tokio::test]
async fn correct_submission_scores_full_marks() {
    let sub = submission(&[("Customer.java", PA3_CUSTOMER)]);
    let grader = Grader::new(&Pa3, FakeRunner::printing(&pa3::expected_output_text()));

    let result = grader.grade(&sub).await.expect("grading succeeds");

    for item in &result.rubric_items {
        assert_eq!(item.deduction(), 0, "{} lost points: {}", item.id(), item.notes());
    }
    assert!(result.oop_notes.is_empty());
    assert_eq!(result.total_score, 100);
    assert_eq!(result.letter_grade(), "A");
}
