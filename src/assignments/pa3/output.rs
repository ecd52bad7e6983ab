#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use regex::Regex;

use super::{CAR_LOAN_1, CAR_LOAN_2, Customer, GAL, MORTGAGE_1, MORTGAGE_2, TONY, expected_payments};
use crate::grade::{
    Rubric, RubricError,
    matching::{TOLERANCE, contains_value, dollar_amounts, has_two_decimals, per_value_deduction},
};

/// Points lost per payment missing from the report.
const POINTS_PER_PAYMENT: u32 = 2;

/// Grades the main method items, then lets the report confirm failed customer
/// items.
pub fn check(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    check_main_code(output, rubric)?;
    check_format(output, rubric)?;
    check_decimals(output, rubric)?;
    check_numbers(output, rubric)?;
    confirm_customer(output, rubric)
}

/// How many of the five payments are printed.
fn payments_found(output: &str) -> usize {
    expected_payments()
        .iter()
        .filter(|(_, payment)| contains_value(output, *payment, TOLERANCE))
        .count()
}

/// `main_code`: names, SSNs, loan sections, VINs, and streets all show up.
fn check_main_code(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let lower = output.to_lowercase();
    let mut issues = Vec::new();
    for customer in [TONY, GAL] {
        if !output.contains(customer.first) || !output.contains(customer.last) {
            issues.push(format!(
                "Customer {} {} not found",
                customer.first, customer.last
            ));
        }
    }
    for customer in [TONY, GAL] {
        if !output.contains(customer.ssn) {
            issues.push(format!("SSN {} not found", customer.ssn));
        }
    }
    for (section, label) in [
        ("car loan", "Car Loan"),
        ("mortgage", "Mortgage"),
        ("unsecured", "Unsecured Loan"),
    ] {
        if !lower.contains(section) {
            issues.push(format!("{label} section not found"));
        }
    }
    for (_, vin) in [CAR_LOAN_1, CAR_LOAN_2] {
        if !output.contains(vin) {
            issues.push(format!("VIN {vin} not found"));
        }
    }
    for mortgage in [MORTGAGE_1, MORTGAGE_2] {
        if !output.contains(mortgage.street) {
            issues.push(format!("Address '{}' not found", mortgage.street));
        }
    }

    let item = rubric.get_mut("main_code")?;
    if issues.len() >= 5 {
        item.fail_max(format!("Main method output mostly missing: {}", issues.join("; ")));
    } else if !issues.is_empty() {
        item.fail(
            5,
            format!("Main method output partially correct: {}", issues.join("; ")),
        );
    } else {
        item.pass("Both customer reports found in output");
    }
    Ok(())
}

/// `main_format`: currency and percent symbols.
fn check_format(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let mut issues = Vec::new();
    if !output.contains('$') {
        issues.push("no $ symbols found");
    }
    if !output.contains('%') {
        issues.push("no % symbols found");
    }
    let item = rubric.get_mut("main_format")?;
    if issues.is_empty() {
        item.pass("Output uses $ and % symbols");
    } else {
        item.fail_max(issues.join("; "));
    }
    Ok(())
}

/// `main_decimal`: every dollar amount has two decimal places.
fn check_decimals(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let amounts = dollar_amounts(output);
    let bad: Vec<&str> = amounts
        .iter()
        .copied()
        .filter(|a| !has_two_decimals(a))
        .take(3)
        .collect();
    let item = rubric.get_mut("main_decimal")?;
    if !bad.is_empty() {
        item.fail_max(format!("Dollar values not 2 decimal places: {}", bad.join(", ")));
    } else if amounts.is_empty() {
        item.fail_max("No dollar amounts found in output");
    } else {
        item.pass("All dollar amounts have 2 decimal places");
    }
    Ok(())
}

/// `main_numbers`: two points per missing payment.
fn check_numbers(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let missing: Vec<&str> = expected_payments()
        .into_iter()
        .filter(|(_, payment)| !contains_value(output, *payment, TOLERANCE))
        .map(|(label, _)| label)
        .collect();
    let item = rubric.get_mut("main_numbers")?;
    if missing.is_empty() {
        item.pass("All payments match");
    } else {
        let deduction =
            per_value_deduction(missing.len(), POINTS_PER_PAYMENT, item.max_deduction());
        item.fail(
            deduction,
            format!("{} payment(s) incorrect: {}", missing.len(), missing.join(", ")),
        );
    }
    Ok(())
}

/// Whether the report header for `customer` is printed.
fn has_report_header(output: &str, customer: Customer) -> bool {
    let pattern = format!(
        r"(?i)Account\s+Report\s+for\s+Customer.*{}\s+{}.*{}",
        regex::escape(customer.first),
        regex::escape(customer.last),
        regex::escape(customer.ssn)
    );
    Regex::new(&pattern).is_ok_and(|re| re.is_match(output))
}

/// Passes failed customer items the report shows to be working.
fn confirm_customer(output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
    let found = payments_found(output);

    let item = rubric.get_mut("cust_printreport")?;
    if !item.passed() {
        let tony = has_report_header(output, TONY);
        let gal = has_report_header(output, GAL);
        if tony && gal && found >= 4 {
            item.pass("printMonthlyReport verified via output");
        } else if (tony || gal) && found >= 2 {
            item.fail(7, "printMonthlyReport partially correct");
        }
    }

    let item = rubric.get_mut("cust_addloan")?;
    if !item.passed() && found >= 4 {
        item.pass("addLoanAccount verified via output (loans displayed correctly)");
    }

    for (id, values) in [
        ("cust_getter_firstname", [TONY.first, GAL.first]),
        ("cust_getter_lastname", [TONY.last, GAL.last]),
        ("cust_getter_ssn", [TONY.ssn, GAL.ssn]),
    ] {
        let item = rubric.get_mut(id)?;
        if !item.passed() && values.iter().all(|v| output.contains(v)) {
            item.pass("Getter verified via output");
        }
    }
    Ok(())
}
