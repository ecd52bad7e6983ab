#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::sync::LazyLock;

use regex::Regex;

use super::{CAR_LOAN, CAR_VIN, CITY, MORTGAGE, MORTGAGE_PMI, STATE, STREET, UNSECURED_LOAN, ZIP};
use crate::grade::{
    Rubric, RubricError,
    matching::{TOLERANCE, contains_value, decimal_literals, has_two_decimals},
};

/// Principal printed by a loan's `toString`
static PRINCIPAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)principal.*\$?\d+").expect("principal pattern is valid"));

/// Rate printed by a loan's `toString`
static RATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:interest|rate).*\d+\.\d+\s*%").expect("rate pattern is valid")
});

/// Term printed by a loan's `toString`
static TERM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:month|term).*\d+").expect("term pattern is valid"));

/// PMI printed by the mortgage's `toString`
static PMI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)pmi|mortgage\s+insurance").expect("pmi pattern is valid"));

/// Printed amounts smaller than this are rates or terms, not dollars.
const SMALLEST_AMOUNT: f64 = 30.0;

/// Printed amounts larger than this are not dollars either.
const LARGEST_AMOUNT: f64 = 300_000.0;

/// Grades the main method items, then lets the output confirm or overturn
/// structural verdicts.
pub fn check(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    check_main_code(output, rubric)?;
    check_format(output, rubric)?;
    confirm_to_strings(output, rubric)?;
    confirm_calculate(output, rubric)?;
    refute_calculate(output, rubric)
}

/// Whether `value` is printed anywhere.
fn printed(output: &str, value: f64) -> bool {
    contains_value(output, value, TOLERANCE)
}

/// How many of the three loan payments are printed.
fn payments_found(output: &str) -> usize {
    [CAR_LOAN, MORTGAGE, UNSECURED_LOAN]
        .iter()
        .filter(|loan| printed(output, loan.payment()))
        .count()
}

/// `main_code`: the driver's data all shows up.
fn check_main_code(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let mut issues = Vec::new();
    let mut payment_issues = 0;
    if !printed(output, CAR_LOAN.payment()) {
        issues.push("car loan payment not found");
        payment_issues += 1;
    }
    if !output.contains(CAR_VIN) {
        issues.push("VIN not found");
    }
    if !printed(output, MORTGAGE.payment()) {
        issues.push("mortgage payment not found");
        payment_issues += 1;
    }
    if !printed(output, MORTGAGE_PMI) {
        issues.push("PMI amount not found");
    }
    if !output.contains(STREET) && !output.contains("321") {
        issues.push("property address not found");
    }
    if !printed(output, UNSECURED_LOAN.payment()) {
        issues.push("unsecured loan payment not found");
        payment_issues += 1;
    }

    let item = rubric.get_mut("main_code")?;
    if issues.len() >= 4 || payment_issues >= 3 {
        item.fail_max(format!("Main method output mostly missing: {}", issues.join("; ")));
    } else if !issues.is_empty() {
        item.fail(
            5,
            format!("Main method output partially correct: {}", issues.join("; ")),
        );
    } else {
        item.pass("All loan data found in output");
    }
    Ok(())
}

/// `main_format`: currency and percent symbols, and two decimal places on
/// dollar-sized amounts.
fn check_format(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let mut issues = Vec::new();
    if !output.contains('$') {
        issues.push("no $ symbols found".to_string());
    }
    if !output.contains('%') {
        issues.push("no % symbols found".to_string());
    }
    let bad: Vec<&str> = decimal_literals(output)
        .into_iter()
        .filter(|literal| {
            literal
                .parse::<f64>()
                .is_ok_and(|v| (SMALLEST_AMOUNT..=LARGEST_AMOUNT).contains(&v))
        })
        .filter(|literal| !has_two_decimals(literal))
        .take(3)
        .collect();
    if !bad.is_empty() {
        issues.push(format!("values not 2 decimal places: {}", bad.join(", ")));
    }

    let item = rubric.get_mut("main_format")?;
    if issues.is_empty() {
        item.pass("Output formatted with $, %, and 2 decimal places");
    } else {
        item.fail_max(issues.join("; "));
    }
    Ok(())
}

/// Passes failed `toString` items whose output is visibly right.
fn confirm_to_strings(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let lower = output.to_lowercase();

    let item = rubric.get_mut("la_tostring")?;
    if !item.passed()
        && PRINCIPAL_RE.is_match(output)
        && RATE_RE.is_match(output)
        && TERM_RE.is_match(output)
    {
        item.pass("toString verified via output");
    }

    let item = rubric.get_mut("cl_tostring")?;
    if !item.passed() && lower.contains("car loan") && output.contains(CAR_VIN) {
        item.pass("toString verified via output (VIN present)");
    }

    let item = rubric.get_mut("pm_tostring")?;
    if !item.passed() && lower.contains("mortgage") {
        let has_pmi = PMI_RE.is_match(output);
        let has_address = output.contains(STREET) || lower.contains("321 main");
        match (has_pmi, has_address) {
            (true, true) => item.pass("toString verified via output"),
            (true, false) => item.fail(5, "toString partially correct: missing address"),
            (false, true) => item.fail(5, "toString partially correct: missing PMI info"),
            (false, false) => {}
        }
    }

    let item = rubric.get_mut("ul_tostring")?;
    if !item.passed() && lower.contains("unsecured") && printed(output, UNSECURED_LOAN.payment())
    {
        item.pass("toString verified via output");
    }

    let item = rubric.get_mut("addr_tostring")?;
    if !item.passed() {
        let found = [STREET, CITY, STATE, ZIP]
            .iter()
            .filter(|part| output.contains(**part))
            .count();
        if found >= 3 {
            item.pass("toString verified via output");
        } else if found >= 1 {
            item.fail(5, format!("Address toString partial: {found}/4 parts found"));
        }
    }
    Ok(())
}

/// `la_calculate`: all three payments prove the formula; two rescue part of a
/// failed verdict.
fn confirm_calculate(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let found = payments_found(output);
    let item = rubric.get_mut("la_calculate")?;
    if found == 3 {
        item.pass("Formula verified: all payment values correct");
    } else if found >= 2 && !item.passed() {
        item.fail(3, format!("Formula partially correct: {found}/3 payments match"));
    }
    Ok(())
}

/// `la_calculate`: a passed formula that prints at most one right payment
/// is wrong after all.
fn refute_calculate(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let item = rubric.get_mut("la_calculate")?;
    if !item.passed() {
        return Ok(());
    }
    match payments_found(output) {
        0 => item.fail_max("Formula incorrect: no expected payment values found in output"),
        1 => item.fail(5, "Formula may be incorrect: only 1/3 payments match"),
        _ => {}
    }
    Ok(())
}
