#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! PA3: a `Customer` class holding a list of PA2 loans and printing a monthly
//! report for two customers.

/// Checks over captured output.
mod output;
/// Checks over extracted facts.
mod structure;

use std::fmt::Write as _;

use super::amortization::LoanCase;
use crate::{
    constants::MAIN_METHOD,
    grade::{
        Assignment, OutputChecker, Rubric, RubricError, RubricItem, RubricProvider,
        StructuralChecker,
    },
    java::Submission,
};

/// A customer the driver creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer {
    /// first name
    pub first: &'static str,
    /// last name
    pub last:  &'static str,
    /// social security number as printed
    pub ssn:   &'static str,
}

/// A mortgage the driver creates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MortgageCase {
    /// the loan terms
    pub loan:   LoanCase,
    /// monthly PMI
    pub pmi:    f64,
    /// street line of the property
    pub street: &'static str,
}

/// First customer
pub const TONY: Customer = Customer {
    first: "Tony",
    last:  "Stark",
    ssn:   "111-22-3333",
};

/// Second customer
pub const GAL: Customer = Customer {
    first: "Gal",
    last:  "Gadot",
    ssn:   "444-55-6666",
};

/// Tony's car loan and its VIN
pub const CAR_LOAN_1: (LoanCase, &str) = (LoanCase::new(25_000.0, 4.9, 72), "IRQ3458977");
/// Gal's car loan and its VIN
pub const CAR_LOAN_2: (LoanCase, &str) = (LoanCase::new(12_000.0, 5.0, 60), "NXK6767876");

/// Tony's mortgage
pub const MORTGAGE_1: MortgageCase = MortgageCase {
    loan:   LoanCase::new(250_000.0, 3.75, 360),
    pmi:    35.12,
    street: "321 Main Street",
};

/// Gal's mortgage
pub const MORTGAGE_2: MortgageCase = MortgageCase {
    loan:   LoanCase::new(375_000.0, 2.5, 360),
    pmi:    53.12,
    street: "783 Maple Lane",
};

/// Tony's unsecured loan
pub const UNSECURED_LOAN: LoanCase = LoanCase::new(5_000.0, 10.75, 48);

/// City, state, and zip shared by both properties
const CITY_LINE: &str = "State College, PA 16801";

/// Every payment the report prints, with a label for notes.
pub fn expected_payments() -> [(&'static str, f64); 5] {
    [
        ("Car Loan 1 payment", CAR_LOAN_1.0.payment()),
        ("Car Loan 2 payment", CAR_LOAN_2.0.payment()),
        ("Mortgage 1 payment", MORTGAGE_1.loan.payment()),
        ("Mortgage 2 payment", MORTGAGE_2.loan.payment()),
        ("Unsecured Loan payment", UNSECURED_LOAN.payment()),
    ]
}

/// Fields graded by the rubric, and so left alone by the lint.
const RUBRIC_FIELDS: &[&str] = &[
    "firstname",
    "lastname",
    "ssn",
    "loanaccounts",
    "loans",
    "principal",
    "annualinterestrate",
    "months",
    "vehiclevin",
    "pmimonthlyamount",
    "address",
    "street",
    "city",
    "state",
    "zipcode",
];

/// Category of the customer items
const CUSTOMER_CATEGORY: &str = "Customer Class";

/// The PA3 rubric in its default state.
pub fn rubric() -> Rubric {
    Rubric::new(vec![
        RubricItem::new(
            "cust_props",
            CUSTOMER_CATEGORY,
            "Has properties: firstName, lastName, SSN, loanAccounts (ArrayList<LoanAccount>)",
            5,
        ),
        RubricItem::new(
            "cust_constructor",
            CUSTOMER_CATEGORY,
            "Has constructor with three parameters (firstName, lastName, SSN)",
            5,
        ),
        RubricItem::new("cust_getter_firstname", CUSTOMER_CATEGORY, "Has getter for firstName", 3),
        RubricItem::new("cust_getter_lastname", CUSTOMER_CATEGORY, "Has getter for lastName", 3),
        RubricItem::new("cust_getter_ssn", CUSTOMER_CATEGORY, "Has getter for SSN", 3),
        RubricItem::new(
            "cust_addloan",
            CUSTOMER_CATEGORY,
            "Has addLoanAccount(LoanAccount) method",
            10,
        ),
        RubricItem::new(
            "cust_printreport",
            CUSTOMER_CATEGORY,
            "Has printMonthlyReport() method that prints all loan info using toString()",
            15,
        ),
        RubricItem::new(
            "main_code",
            MAIN_METHOD,
            "Uses the main method code as given in the assignment",
            10,
        ),
        RubricItem::new(
            "main_format",
            MAIN_METHOD,
            "Displays data with $ and % symbols as shown in output",
            5,
        ),
        RubricItem::new(
            "main_decimal",
            MAIN_METHOD,
            "Displays data with 2 decimal places for all dollar amounts",
            5,
        ),
        RubricItem::new(
            "main_numbers",
            MAIN_METHOD,
            "All numbers match expected output (-2 per incorrect value)",
            10,
        ),
    ])
}

/// Appends one loan's shared report lines.
fn write_loan(out: &mut String, heading: &str, loan: LoanCase) {
    let _ = writeln!(out, "{heading} with:");
    let _ = writeln!(out, "Principal: ${:.2}", loan.principal);
    let _ = writeln!(out, "Annual Interest Rate: {:.2}%", loan.annual_rate);
    let _ = writeln!(out, "Term of Loan in Months: {}", loan.months);
    let _ = writeln!(out, "Monthly Payment: ${:.2}", loan.payment());
}

/// Appends a customer's report header.
fn write_customer(out: &mut String, customer: Customer) {
    let _ = writeln!(
        out,
        "Account Report for Customer: {} {} with SSN {}\n",
        customer.first, customer.last, customer.ssn
    );
}

/// Appends a car loan.
fn write_car(out: &mut String, (loan, vin): (LoanCase, &str)) {
    write_loan(out, "Car Loan", loan);
    let _ = writeln!(out, "Vehicle VIN: {vin}\n\n");
}

/// Appends a mortgage.
fn write_mortgage(out: &mut String, mortgage: MortgageCase) {
    write_loan(out, "Primary Mortgage Loan", mortgage.loan);
    let _ = writeln!(out, "PMI Monthly Amount: ${:.2}", mortgage.pmi);
    let _ = writeln!(out, "Property Address:\n    {}\n    {CITY_LINE}", mortgage.street);
}

/// Expected output of the driver from the assignment handout.
pub fn expected_output_text() -> String {
    let mut out = String::from("Monthly Report of Customers by Loan Account\n");
    write_customer(&mut out, TONY);
    write_car(&mut out, CAR_LOAN_1);
    write_mortgage(&mut out, MORTGAGE_1);
    out.push_str("\n\n");
    write_loan(&mut out, "Unsecured Loan", UNSECURED_LOAN);
    out.push_str("\n\n\n");
    write_customer(&mut out, GAL);
    write_car(&mut out, CAR_LOAN_2);
    write_mortgage(&mut out, MORTGAGE_2);
    out.trim_end().to_string()
}

/// Programming Assignment 3: Customer Loan Accounts
#[derive(Debug, Clone, Copy, Default)]
pub struct Pa3;

impl RubricProvider for Pa3 {
    fn rubric(&self) -> Rubric {
        rubric()
    }

    fn expected_output(&self) -> String {
        expected_output_text()
    }
}

impl StructuralChecker for Pa3 {
    fn check_structure(
        &self,
        submission: &Submission,
        rubric: &mut Rubric,
    ) -> Result<(), RubricError> {
        structure::check(submission, rubric)
    }
}

impl OutputChecker for Pa3 {
    fn check_output(&self, output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
        output::check(output, rubric)
    }
}

impl Assignment for Pa3 {
    fn id(&self) -> &'static str {
        "pa3"
    }

    fn title(&self) -> &'static str {
        "PA3: Customer Loan Accounts"
    }

    fn lint_allow_list(&self) -> &'static [&'static str] {
        RUBRIC_FIELDS
    }
}
