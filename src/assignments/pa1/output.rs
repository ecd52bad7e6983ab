#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::sync::LazyLock;

use regex::Regex;

use super::{ExpectedPayment, RATES, TERMS, expected_payments};
use crate::grade::{
    Rubric, RubricError,
    matching::{
        TOLERANCE, contains_value, decimal_literals, has_two_decimals, is_majority,
        numbers_in, proportional_deduction,
    },
};

/// A line holding at least one two-decimal number.
static TWO_DECIMALS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d\.\d{2}\b").expect("two-decimal pattern is valid"));

/// Printed amounts smaller than this are rates or terms, not dollars.
const SMALLEST_AMOUNT: f64 = 30.0;

/// Printed amounts larger than this are not dollars either.
const LARGEST_AMOUNT: f64 = 300_000.0;

/// Grades the output items and lets the printed payments confirm or overturn
/// the formula verdict.
pub fn check(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let payments = expected_payments();
    check_headings(output, rubric)?;
    check_columns(output, rubric)?;
    check_decimals(output, rubric)?;
    check_rates(output, &payments, rubric)?;
    check_terms(output, &payments, rubric)?;
    check_formula_by_output(output, &payments, rubric)
}

/// Whether a heading for `rate` percent appears.
fn has_heading(output: &str, rate: f64) -> bool {
    let pattern = format!(r"(?i)(?:^|[^\d.]){rate:.0}(?:\.0+)?\s*(?:%|percent)");
    Regex::new(&pattern).is_ok_and(|re| re.is_match(output))
}

/// `main_b`: a heading for each rate.
fn check_headings(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let item = rubric.get_mut("main_b")?;
    let missing: Vec<String> = RATES
        .iter()
        .filter(|rate| !has_heading(output, **rate))
        .map(|rate| format!("{rate:.0}%"))
        .collect();
    match missing.len() {
        0 => item.pass("Headings found for both rates"),
        1 => item.fail(3, format!("No heading for {}", missing[0])),
        _ => item.fail_max("No rate headings found"),
    }
    Ok(())
}

/// `main_c`: rows holding several amounts each.
fn check_columns(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let rows = output
        .lines()
        .filter(|line| TWO_DECIMALS_RE.find_iter(line).count() >= 2)
        .count();
    let item = rubric.get_mut("main_c")?;
    match rows {
        0 => item.fail_max("No columnar rows of amounts found"),
        1..=3 => item.fail(5, format!("Only {rows} columnar rows found")),
        _ => item.pass(format!("{rows} columnar rows found")),
    }
    Ok(())
}

/// `main_d`: every dollar-sized amount has two decimal places.
fn check_decimals(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let amounts: Vec<&str> = decimal_literals(output)
        .into_iter()
        .filter(|literal| {
            literal
                .parse::<f64>()
                .is_ok_and(|v| (SMALLEST_AMOUNT..=LARGEST_AMOUNT).contains(&v))
        })
        .collect();
    let item = rubric.get_mut("main_d")?;
    if amounts.is_empty() {
        item.fail_max("No dollar amounts found");
    } else if let Some(bad) = amounts.iter().find(|a| !has_two_decimals(a)) {
        item.fail_max(format!("Amount {bad} does not have 2 decimal places"));
    } else {
        item.pass("All amounts have 2 decimal places");
    }
    Ok(())
}

/// Whether any of `payments` appears in `output`. One loan's column is
/// enough to show a rate or term was printed.
fn any_printed(output: &str, payments: &[&ExpectedPayment]) -> bool {
    payments
        .iter()
        .any(|p| contains_value(output, p.payment, TOLERANCE))
}

/// `main_e`: payments for each rate.
fn check_rates(
    output: &str,
    payments: &[ExpectedPayment],
    rubric: &mut Rubric,
) -> Result<(), RubricError> {
    let missing: Vec<String> = RATES
        .iter()
        .filter(|rate| {
            let at_rate: Vec<&ExpectedPayment> =
                payments.iter().filter(|p| p.rate == **rate).collect();
            !any_printed(output, &at_rate)
        })
        .map(|rate| format!("{rate:.0}%"))
        .collect();
    let item = rubric.get_mut("main_e")?;
    match missing.len() {
        0 => item.pass("Payments found for both rates"),
        1 => item.fail(5, format!("Payments at {} not found", missing[0])),
        _ => item.fail_max("Payments not found for either rate"),
    }
    Ok(())
}

/// `main_f`: payments for each term, losing a third per missing term.
fn check_terms(
    output: &str,
    payments: &[ExpectedPayment],
    rubric: &mut Rubric,
) -> Result<(), RubricError> {
    let missing: Vec<String> = TERMS
        .iter()
        .filter(|(_, months)| {
            let for_term: Vec<&ExpectedPayment> =
                payments.iter().filter(|p| p.months == *months).collect();
            !any_printed(output, &for_term)
        })
        .map(|(years, _)| format!("{years} year"))
        .collect();
    let item = rubric.get_mut("main_f")?;
    if missing.is_empty() {
        item.pass("Payments found for all terms");
    } else {
        let deduction = proportional_deduction(missing.len(), TERMS.len(), item.max_deduction());
        item.fail(
            deduction,
            format!("Payments not found for: {}", missing.join(", ")),
        );
    }
    Ok(())
}

/// `class_d_i`: correct printed payments prove the formula, and none at all
/// disproves it.
fn check_formula_by_output(
    output: &str,
    payments: &[ExpectedPayment],
    rubric: &mut Rubric,
) -> Result<(), RubricError> {
    let found = payments
        .iter()
        .filter(|p| contains_value(output, p.payment, TOLERANCE))
        .count();
    let total = payments.len();
    let item = rubric.get_mut("class_d_i")?;

    if is_majority(found, total) {
        item.pass(format!("{found}/{total} payments correct in output"));
    } else if found > 0 {
        item.fail(5, format!("Only {found}/{total} payments correct in output"));
    } else if item.passed() {
        let printed = numbers_in(output).len();
        item.fail_max(format!(
            "Formula present but no correct payments in output ({printed} numbers printed)"
        ));
    }
    Ok(())
}
