#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! PA1: a single `LoanAccount` class and a driver printing monthly payments
//! for two loans at two rates over three terms.

/// Checks over captured output.
mod output;
/// Checks over extracted facts.
mod structure;

use std::fmt::Write as _;

use super::amortization::monthly_payment;
use crate::{
    constants::MAIN_METHOD,
    grade::{
        Assignment, OutputChecker, Rubric, RubricError, RubricItem, RubricProvider,
        StructuralChecker,
    },
    java::Submission,
};

/// Category of the class items
pub const CLASS_CATEGORY: &str = "LoanAccount Class";

/// Annual rates, in percent, the driver must print
pub const RATES: [f64; 2] = [1.0, 5.0];

/// Loan terms as (years, months)
pub const TERMS: [(u32, u32); 3] = [(3, 36), (5, 60), (6, 72)];

/// Principals of `loan1` and `loan2`
pub const PRINCIPALS: [f64; 2] = [5000.0, 31000.0];

/// One payment the driver is expected to print.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedPayment {
    /// annual rate in percent
    pub rate:      f64,
    /// term in months
    pub months:    u32,
    /// loan principal
    pub principal: f64,
    /// monthly payment, rounded to cents
    pub payment:   f64,
}

/// All twelve expected payments, by rate, then term, then principal.
pub fn expected_payments() -> Vec<ExpectedPayment> {
    let mut out = Vec::with_capacity(RATES.len() * TERMS.len() * PRINCIPALS.len());
    for rate in RATES {
        for (_, months) in TERMS {
            for principal in PRINCIPALS {
                out.push(ExpectedPayment {
                    rate,
                    months,
                    principal,
                    payment: monthly_payment(principal, rate, months),
                });
            }
        }
    }
    out
}

/// The PA1 rubric in its default state.
pub fn rubric() -> Rubric {
    Rubric::new(vec![
        RubricItem::new(
            "class_a",
            CLASS_CATEGORY,
            "Has private static instance variable annualInterestRate",
            5,
        ),
        RubricItem::new("class_b", CLASS_CATEGORY, "Has private instance variable principal", 5),
        RubricItem::new(
            "class_c",
            CLASS_CATEGORY,
            "Has constructor with one parameter, principal",
            5,
        ),
        RubricItem::new(
            "class_d",
            CLASS_CATEGORY,
            "Has calculateMonthlyPayment method with parameter numberOfPayments",
            10,
        ),
        RubricItem::new(
            "class_d_i",
            CLASS_CATEGORY,
            "Has proper formula to calculate payment and return it",
            10,
        ),
        RubricItem::new(
            "class_e",
            CLASS_CATEGORY,
            "Has a static method setAnnualInterestRate to set the annual interest rate",
            10,
        ),
        RubricItem::new(
            "main_a",
            MAIN_METHOD,
            "Creates two LoanAccount objects, loan1 and loan2 with proper initial principal \
             amounts",
            10,
        ),
        RubricItem::new(
            "main_b",
            MAIN_METHOD,
            "Displays the heading lines for each interest rate properly",
            5,
        ),
        RubricItem::new("main_c", MAIN_METHOD, "Displays the loan data as columnar output", 10),
        RubricItem::new(
            "main_d",
            MAIN_METHOD,
            "Displays the data with 2 decimal places for all dollar amounts",
            5,
        ),
        RubricItem::new(
            "main_e",
            MAIN_METHOD,
            "Displays the information at 1% and 5% interest rates",
            10,
        ),
        RubricItem::new(
            "main_f",
            MAIN_METHOD,
            "Displays the payment amounts for 3, 5, and 6 year loans",
            10,
        ),
    ])
}

/// Expected output as a reference table for the report.
pub fn expected_output_text() -> String {
    let payments = expected_payments();
    let mut out = String::new();
    for rate in RATES {
        let _ = writeln!(out, "Monthly payments at {rate:.0}% interest");
        let _ = writeln!(
            out,
            "{:<8}{:>12}{:>12}",
            "Months",
            format!("${:.2}", PRINCIPALS[0]),
            format!("${:.2}", PRINCIPALS[1])
        );
        for (_, months) in TERMS {
            let row: Vec<String> = payments
                .iter()
                .filter(|p| p.rate == rate && p.months == months)
                .map(|p| format!("{:>12.2}", p.payment))
                .collect();
            let _ = writeln!(out, "{months:<8}{}", row.concat());
        }
    }
    out.trim_end().to_string()
}

/// Programming Assignment 1: Loan Account
#[derive(Debug, Clone, Copy, Default)]
pub struct Pa1;

impl RubricProvider for Pa1 {
    fn rubric(&self) -> Rubric {
        rubric()
    }

    fn expected_output(&self) -> String {
        expected_output_text()
    }
}

impl StructuralChecker for Pa1 {
    fn check_structure(
        &self,
        submission: &Submission,
        rubric: &mut Rubric,
    ) -> Result<(), RubricError> {
        structure::check(submission, rubric)
    }
}

impl OutputChecker for Pa1 {
    fn check_output(&self, output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
        output::check(output, rubric)
    }
}

impl Assignment for Pa1 {
    fn id(&self) -> &'static str {
        "pa1"
    }

    fn title(&self) -> &'static str {
        "PA1: Loan Account"
    }
}
