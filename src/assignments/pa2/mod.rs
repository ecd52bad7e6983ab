#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! PA2: a `LoanAccount` hierarchy with car, mortgage, and unsecured loans,
//! plus an `Address` class composed into the mortgage.

/// Checks over captured output.
mod output;
/// Checks over extracted facts.
mod structure;

use super::amortization::LoanCase;
use crate::{
    constants::MAIN_METHOD,
    grade::{
        Assignment, OutputChecker, Rubric, RubricError, RubricItem, RubricProvider,
        StructuralChecker,
    },
    java::Submission,
};

/// The car loan the driver creates
pub const CAR_LOAN: LoanCase = LoanCase::new(25_000.0, 4.25, 72);
/// VIN of the car loan
pub const CAR_VIN: &str = "IRQ3458977";

/// The mortgage the driver creates
pub const MORTGAGE: LoanCase = LoanCase::new(250_000.0, 3.1, 360);
/// PMI of the mortgage
pub const MORTGAGE_PMI: f64 = 35.12;
/// Street of the mortgaged property
pub const STREET: &str = "321 Main Street";
/// City of the mortgaged property
pub const CITY: &str = "State College";
/// State of the mortgaged property
pub const STATE: &str = "PA";
/// Zip code of the mortgaged property
pub const ZIP: &str = "16801";

/// The unsecured loan the driver creates
pub const UNSECURED_LOAN: LoanCase = LoanCase::new(5_000.0, 10.75, 48);

/// Fields graded by the rubric, and so left alone by the lint.
const RUBRIC_FIELDS: &[&str] = &[
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

/// Category of the base class items
const LOAN_ACCOUNT: &str = "LoanAccount Class";
/// Category of the car loan items
const CAR_LOAN_CATEGORY: &str = "CarLoan Class";
/// Category of the mortgage items
const MORTGAGE_CATEGORY: &str = "PrimaryMortgage Class";
/// Category of the unsecured loan items
const UNSECURED_CATEGORY: &str = "UnsecuredLoan Class";
/// Category of the address items
const ADDRESS_CATEGORY: &str = "Address Class";

/// The PA2 rubric in its default state.
pub fn rubric() -> Rubric {
    let item = RubricItem::new;
    Rubric::new(vec![
        item("la_props", LOAN_ACCOUNT, "Has properties: principal, annualInterestRate, months", 5),
        item("la_constructor", LOAN_ACCOUNT, "Has constructor with three parameters", 5),
        item(
            "la_calculate",
            LOAN_ACCOUNT,
            "Has calculateMonthlyPayment() with no parameters and correct formula",
            10,
        ),
        item("la_getters", LOAN_ACCOUNT, "Has getters for the three property variables", 5),
        item(
            "la_tostring",
            LOAN_ACCOUNT,
            "Has toString() displaying principal, annualInterestRate, and months",
            10,
        ),
        item("cl_extends", CAR_LOAN_CATEGORY, "CarLoan is a subclass of LoanAccount", 5),
        item("cl_props", CAR_LOAN_CATEGORY, "Has vehicleVIN property", 5),
        item(
            "cl_constructor",
            CAR_LOAN_CATEGORY,
            "Has constructor with four parameters (3 LoanAccount + VIN)",
            5,
        ),
        item("cl_tostring", CAR_LOAN_CATEGORY, "Has toString() displaying VIN number", 5),
        item(
            "pm_extends",
            MORTGAGE_CATEGORY,
            "PrimaryMortgage is a subclass of LoanAccount",
            5,
        ),
        item("pm_props", MORTGAGE_CATEGORY, "Has PMIMonthlyAmount and Address properties", 5),
        item(
            "pm_constructor",
            MORTGAGE_CATEGORY,
            "Has constructor with five parameters (3 LoanAccount + PMI + Address)",
            5,
        ),
        item(
            "pm_tostring",
            MORTGAGE_CATEGORY,
            "Has toString() displaying PMIMonthlyAmount and Address",
            10,
        ),
        item("ul_extends", UNSECURED_CATEGORY, "UnsecuredLoan is a subclass of LoanAccount", 5),
        item(
            "ul_constructor",
            UNSECURED_CATEGORY,
            "Has constructor with three parameters (LoanAccount params)",
            5,
        ),
        item("ul_tostring", UNSECURED_CATEGORY, "Has toString() displaying unsecured loan info", 10),
        item("addr_props", ADDRESS_CATEGORY, "Has properties: street, city, state, zipcode", 5),
        item("addr_constructor", ADDRESS_CATEGORY, "Has constructor with four parameters", 5),
        item("addr_getters", ADDRESS_CATEGORY, "Has getters for each property", 5),
        item("addr_tostring", ADDRESS_CATEGORY, "Has toString() displaying address information", 10),
        item("main_code", MAIN_METHOD, "Uses the main method code as given in the assignment", 10),
        item(
            "main_format",
            MAIN_METHOD,
            "Displays data with $ and % symbols and 2 decimal places",
            5,
        ),
    ])
}

/// Prints the shared part of every loan's report.
fn loan_lines(heading: &str, loan: LoanCase) -> String {
    format!(
        "{heading} with:\nPrincipal: ${:.2}\nAnnual Interest Rate: {:.2}%\nTerm of Loan in \
         Months: {}\nMonthly Payment: ${:.2}",
        loan.principal,
        loan.annual_rate,
        loan.months,
        loan.payment()
    )
}

/// Expected output of the driver from the assignment handout.
pub fn expected_output_text() -> String {
    format!(
        "{}\nVehicle VIN: {CAR_VIN}\n\n{}\nPMI Monthly Amount: ${MORTGAGE_PMI:.2}\nProperty \
         Address:\n    {STREET}\n    {CITY}, {STATE} {ZIP}\n\n{}",
        loan_lines("Car Loan", CAR_LOAN),
        loan_lines("Primary Mortgage Loan", MORTGAGE),
        loan_lines("Unsecured Loan", UNSECURED_LOAN),
    )
}

/// Programming Assignment 2: Loan Account Hierarchy
#[derive(Debug, Clone, Copy, Default)]
pub struct Pa2;

impl RubricProvider for Pa2 {
    fn rubric(&self) -> Rubric {
        rubric()
    }

    fn expected_output(&self) -> String {
        expected_output_text()
    }
}

impl StructuralChecker for Pa2 {
    fn check_structure(
        &self,
        submission: &Submission,
        rubric: &mut Rubric,
    ) -> Result<(), RubricError> {
        structure::check(submission, rubric)
    }
}

impl OutputChecker for Pa2 {
    fn check_output(&self, output: &str, rubric: &mut Rubric) -> Result<(), RubricError> {
        output::check(output, rubric)
    }
}

impl Assignment for Pa2 {
    fn id(&self) -> &'static str {
        "pa2"
    }

    fn title(&self) -> &'static str {
        "PA2: Loan Account Hierarchy"
    }

    fn lint_allow_list(&self) -> &'static [&'static str] {
        RUBRIC_FIELDS
    }
}
