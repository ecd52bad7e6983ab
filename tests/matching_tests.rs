use oop_grader::{
    assignments::amortization::{LoanCase, monthly_payment, round_cents},
    grade::matching::{
        TOLERANCE, contains_value, count_values, decimal_literals, dollar_amounts,
        has_two_decimals, is_integer_type, is_list_type, is_majority, is_numeric_type,
        is_string_type, name_contains_all, name_matches, numbers_in, per_value_deduction,
        proportional_deduction,
    },
};

#[test]
fn payment_formula_matches_known_values() {
    assert_eq!(monthly_payment(5_000.0, 5.0, 36), 149.85);
    assert_eq!(monthly_payment(31_000.0, 1.0, 72), 443.78);
    assert_eq!(monthly_payment(250_000.0, 3.1, 360), 1067.54);
    assert_eq!(LoanCase::new(5_000.0, 10.75, 48).payment(), 128.62);
}

#[test]
fn payment_formula_handles_degenerate_terms() {
    assert_eq!(monthly_payment(1_200.0, 0.0, 12), 100.0);
    assert_eq!(monthly_payment(1_000.0, 5.0, 0), 1_000.0);
    assert_eq!(round_cents(2.345_000_1), 2.35);
}

#[test]
fn names_match_ignoring_case_and_underscores() {
    assert!(name_matches("first_name", &["firstName"]));
    assert!(name_matches("ANNUALINTERESTRATE", &["rate", "annualInterestRate"]));
    assert!(!name_matches("principalAmount", &["principal"]));
    assert!(name_contains_all("calcMonthly_Payment", &["monthly", "payment"]));
}

#[test]
fn type_aliases_are_recognised() {
    assert!(is_numeric_type("double"));
    assert!(is_numeric_type("java.lang.Double"));
    assert!(!is_numeric_type("int"));
    assert!(is_integer_type("Integer"));
    assert!(is_string_type("String"));
    assert!(is_list_type("ArrayList<LoanAccount>"));
    assert!(is_list_type("LoanAccount[]"));
    assert!(!is_list_type("Address"));
}

#[test]
fn printed_numbers_are_extracted() {
    assert_eq!(numbers_in("Payment: $1,067.54 at 3.10%"), vec![1067.54, 67.54, 3.10]);
    assert!(numbers_in("36 months").is_empty());
}

#[test]
fn values_match_within_tolerance_or_literally() {
    assert!(contains_value("Monthly Payment: $393.99", 393.98, TOLERANCE));
    assert!(contains_value("Monthly Payment: $394.00", 393.98, TOLERANCE));
    assert!(!contains_value("Monthly Payment: $394.01", 393.98, TOLERANCE));
    assert!(contains_value("total 141.04", 141.04, 0.0));
    assert_eq!(count_values("85.47 and 529.91", &[85.47, 529.91, 71.58], TOLERANCE), 2);
}

#[test]
fn values_inside_longer_numbers_do_not_match() {
    assert!(!contains_value("Payment: 185.47", 85.47, TOLERANCE));
    assert!(!contains_value("Payment: 85.471", 85.47, 0.0));
    assert!(contains_value("Payment: $85.47.", 85.47, 0.0));
}

#[test]
fn decimal_places_are_inspected_as_printed() {
    let text = "Principal: $25000.0\nRate: 4.25%\nPayment: $393.98";
    assert_eq!(decimal_literals(text), vec!["25000.0", "4.25", "393.98"]);
    assert_eq!(dollar_amounts(text), vec!["25000.0", "393.98"]);
    assert!(!has_two_decimals("25000.0"));
    assert!(has_two_decimals("393.98"));
    assert!(!has_two_decimals("393"));
}

#[test]
fn partial_credit_helpers() {
    assert!(is_majority(3, 4));
    assert!(!is_majority(2, 4));
    assert!(is_majority(2, 3));

    assert_eq!(proportional_deduction(0, 3, 10), 0);
    assert_eq!(proportional_deduction(1, 3, 10), 3);
    assert_eq!(proportional_deduction(3, 3, 10), 10);
    assert_eq!(proportional_deduction(5, 3, 10), 10);
    assert_eq!(proportional_deduction(1, 0, 10), 0);

    assert_eq!(per_value_deduction(2, 2, 10), 4);
    assert_eq!(per_value_deduction(9, 2, 10), 10);
}
