#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::{
    assignments::{
        common::{
            check_constructor_arity, check_extends, check_getters, check_to_string,
            constructor_arities, fail_all, has_field,
        },
        synonyms::{
            ADDRESS_GETTERS, CITY, LOAN_GETTERS, MONTHS, PMI, PRINCIPAL, PROPERTY_ADDRESS, RATE,
            STATE, STREET, VIN, ZIP,
        },
    },
    grade::{
        Rubric, RubricError,
        matching::{is_numeric_type, name_contains_all, name_matches},
    },
    java::{ClassView, Submission},
};

/// Names tried for the base class, in priority order.
const BASE_NAMES: &[&str] = &[
    "LoanAccount",
    "LoanAccountHierarchy",
    "Loan",
    "LoanClass",
    "BaseLoan",
];

/// Classes that are never the base class even when their fields fit.
const NOT_BASE: &[&str] = &[
    "Address",
    "CarLoan",
    "PrimaryMortgage",
    "UnsecuredLoan",
    "Main",
    "Test",
    "Customer",
];

/// Finds the base loan class by name, or by having all three loan properties.
fn base_loan_class(submission: &Submission) -> Option<ClassView<'_>> {
    submission.find_class(BASE_NAMES).or_else(|| {
        submission.classes().find(|c| {
            !NOT_BASE.iter().any(|n| c.name.eq_ignore_ascii_case(n))
                && has_field(*c, PRINCIPAL)
                && has_field(*c, RATE)
                && has_field(*c, MONTHS)
        })
    })
}

/// Grades every class item. Classes that cannot be found lose all their
/// items.
pub fn check(submission: &Submission, rubric: &mut Rubric) -> Result<(), RubricError> {
    let base_name = match base_loan_class(submission) {
        Some(base) => {
            check_loan_account(base, rubric)?;
            base.name.clone()
        }
        None => {
            fail_all(
                rubric,
                &["la_props", "la_constructor", "la_calculate", "la_getters", "la_tostring"],
                "LoanAccount class not found",
            )?;
            "LoanAccount".to_string()
        }
    };

    match submission.find_class(&["CarLoan"]) {
        Some(car) => check_car_loan(car, &base_name, rubric)?,
        None => fail_all(
            rubric,
            &["cl_extends", "cl_props", "cl_constructor", "cl_tostring"],
            "CarLoan class not found",
        )?,
    }

    match submission.find_class(&["PrimaryMortgage", "Mortgage", "MortgageLoan"]) {
        Some(mortgage) => check_mortgage(mortgage, &base_name, rubric)?,
        None => fail_all(
            rubric,
            &["pm_extends", "pm_props", "pm_constructor", "pm_tostring"],
            "PrimaryMortgage class not found",
        )?,
    }

    match submission.find_class(&["UnsecuredLoan", "PersonalLoan"]) {
        Some(unsecured) => {
            check_extends(unsecured, rubric, "ul_extends", &base_name)?;
            check_constructor_arity(unsecured, rubric, "ul_constructor", 3)?;
            check_to_string(unsecured, rubric, "ul_tostring")?;
        }
        None => fail_all(
            rubric,
            &["ul_extends", "ul_constructor", "ul_tostring"],
            "UnsecuredLoan class not found",
        )?,
    }

    match submission.find_class(&["Address"]) {
        Some(address) => check_address(address, rubric),
        None => fail_all(
            rubric,
            &["addr_props", "addr_constructor", "addr_getters", "addr_tostring"],
            "Address class not found",
        ),
    }
}

/// The five base class items.
fn check_loan_account(base: ClassView<'_>, rubric: &mut Rubric) -> Result<(), RubricError> {
    let missing: Vec<&str> = [
        ("principal", PRINCIPAL),
        ("annualInterestRate", RATE),
        ("months", MONTHS),
    ]
    .into_iter()
    .filter(|(_, synonyms)| !has_field(base, synonyms))
    .map(|(label, _)| label)
    .collect();
    let item = rubric.get_mut("la_props")?;
    if missing.is_empty() {
        item.pass("All three properties found");
    } else {
        item.fail_max(format!("Missing properties: {}", missing.join(", ")));
    }

    let item = rubric.get_mut("la_constructor")?;
    if base.constructors.iter().any(|c| c.arity() == 3) {
        item.pass("Found 3-parameter constructor");
    } else if base.constructors.is_empty() {
        item.fail_max("No constructor found");
    } else {
        item.fail_max(format!(
            "No 3-parameter constructor (found {} params)",
            constructor_arities(base)
        ));
    }

    check_calculate(base, rubric)?;
    check_getters(base, rubric, "la_getters", LOAN_GETTERS, 3)?;
    check_to_string(base, rubric, "la_tostring")
}

/// `la_calculate`: a parameterless payment method with a numeric return and a
/// power in the formula. One problem costs 5 points, more cost everything.
fn check_calculate(base: ClassView<'_>, rubric: &mut Rubric) -> Result<(), RubricError> {
    let item = rubric.get_mut("la_calculate")?;
    let method = base
        .methods
        .iter()
        .find(|m| name_matches(&m.name, &["calculateMonthlyPayment"]))
        .or_else(|| {
            base.methods
                .iter()
                .find(|m| name_contains_all(&m.name, &["monthly", "payment"]))
        });
    let Some(method) = method else {
        item.fail_max("Method calculateMonthlyPayment not found");
        return Ok(());
    };

    let mut issues = Vec::new();
    if !is_numeric_type(&method.return_type) {
        issues.push(format!("return type '{}', expected double", method.return_type));
    }
    if method.arity() != 0 {
        issues.push(format!("should take no parameters, found {}", method.arity()));
    }
    if !base.source_contains(r"(?i)Math\.pow") {
        issues.push("formula may not use Math.pow()".to_string());
    }

    match issues.len() {
        0 => item.pass(format!("Found {}()", method.name)),
        1 => item.fail(5, format!("calculateMonthlyPayment: {}", issues[0])),
        _ => item.fail_max(format!("calculateMonthlyPayment: {}", issues.join("; "))),
    }
    Ok(())
}

/// The four car loan items.
fn check_car_loan(
    car: ClassView<'_>,
    base_name: &str,
    rubric: &mut Rubric,
) -> Result<(), RubricError> {
    check_extends(car, rubric, "cl_extends", base_name)?;

    let item = rubric.get_mut("cl_props")?;
    if has_field(car, VIN) || car.source_contains(r"(?i)(?:vehicleVIN|vin)\b") {
        item.pass("Found vehicleVIN property");
    } else {
        item.fail_max("vehicleVIN property not found");
    }

    check_constructor_arity(car, rubric, "cl_constructor", 4)?;
    check_to_string(car, rubric, "cl_tostring")
}

/// The four mortgage items. A four-parameter constructor is accepted too,
/// since the address may be composed from fewer arguments.
fn check_mortgage(
    mortgage: ClassView<'_>,
    base_name: &str,
    rubric: &mut Rubric,
) -> Result<(), RubricError> {
    check_extends(mortgage, rubric, "pm_extends", base_name)?;

    let has_pmi = has_field(mortgage, PMI);
    let has_address = has_field(mortgage, PROPERTY_ADDRESS)
        || mortgage
            .fields
            .iter()
            .any(|f| f.declared_type.eq_ignore_ascii_case("Address"));
    let mut missing = Vec::new();
    if !has_pmi {
        missing.push("PMIMonthlyAmount");
    }
    if !has_address {
        missing.push("Address");
    }
    let item = rubric.get_mut("pm_props")?;
    if missing.is_empty() {
        item.pass("Found PMI and address properties");
    } else {
        item.fail_max(format!("Missing properties: {}", missing.join(", ")));
    }

    let item = rubric.get_mut("pm_constructor")?;
    if mortgage.constructors.iter().any(|c| c.arity() == 5) {
        item.pass("Found 5-parameter constructor");
    } else if mortgage.constructors.iter().any(|c| c.arity() >= 4) {
        item.pass("Found constructor with at least 4 parameters");
    } else {
        item.fail_max(format!(
            "No 5-parameter constructor found ({})",
            constructor_arities(mortgage)
        ));
    }

    check_to_string(mortgage, rubric, "pm_tostring")
}

/// The four address items.
fn check_address(address: ClassView<'_>, rubric: &mut Rubric) -> Result<(), RubricError> {
    let missing: Vec<&str> = [
        ("street", STREET),
        ("city", CITY),
        ("state", STATE),
        ("zipcode", ZIP),
    ]
    .into_iter()
    .filter(|(_, synonyms)| !has_field(address, synonyms))
    .map(|(label, _)| label)
    .collect();
    let item = rubric.get_mut("addr_props")?;
    if missing.is_empty() {
        item.pass("All four properties found");
    } else {
        item.fail_max(format!("Missing properties: {}", missing.join(", ")));
    }

    check_constructor_arity(address, rubric, "addr_constructor", 4)?;
    check_getters(address, rubric, "addr_getters", ADDRESS_GETTERS, 4)?;
    check_to_string(address, rubric, "addr_tostring")
}
