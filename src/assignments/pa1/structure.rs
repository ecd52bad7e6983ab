#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::{
    assignments::synonyms::{PRINCIPAL, RATE},
    grade::{
        Rubric, RubricError,
        matching::{is_integer_type, is_numeric_type, name_matches},
    },
    java::{ClassView, Submission},
};

/// Names under which the graded class is looked for, in priority order.
const CLASS_NAMES: &[&str] = &["LoanAccount", "Loan", "LoanAccountClass"];

/// Finds the loan class: by name, then any class with a payment method, then
/// the first class of the primary file.
fn loan_class(submission: &Submission) -> Option<ClassView<'_>> {
    submission
        .find_class(CLASS_NAMES)
        .or_else(|| {
            submission.find_class_where(|c| {
                c.methods
                    .iter()
                    .any(|m| name_matches(&m.name, &["calculateMonthlyPayment"]))
            })
        })
        .or_else(|| {
            let primary = submission.primary_file()?;
            submission
                .classes()
                .find(|c| std::ptr::eq(c.file(), primary))
        })
}

/// Grades the six class items.
pub fn check(submission: &Submission, rubric: &mut Rubric) -> Result<(), RubricError> {
    let Some(class) = loan_class(submission) else {
        for id in ["class_a", "class_b", "class_c", "class_d", "class_e"] {
            rubric.get_mut(id)?.fail_max("LoanAccount class not found");
        }
        check_formula(submission, rubric)?;
        return check_loans_created(submission, rubric);
    };

    check_rate_field(class, rubric)?;
    check_principal_field(class, rubric)?;
    check_constructor(class, rubric)?;
    check_payment_method(class, rubric)?;
    check_formula(submission, rubric)?;
    check_rate_setter(class, rubric)?;
    check_loans_created(submission, rubric)
}

/// `class_a`: a private static numeric rate field.
fn check_rate_field(class: ClassView<'_>, rubric: &mut Rubric) -> Result<(), RubricError> {
    let item = rubric.get_mut("class_a")?;
    match class.fields.iter().find(|f| name_matches(&f.name, RATE)) {
        Some(f) if f.is_private() && f.is_static() && is_numeric_type(&f.declared_type) => {
            item.pass(format!("Found private static {} {}", f.declared_type, f.name));
        }
        Some(f) => {
            let mut problems = Vec::new();
            if !f.is_private() {
                problems.push("not private");
            }
            if !f.is_static() {
                problems.push("not static");
            }
            if !is_numeric_type(&f.declared_type) {
                problems.push("not a floating point type");
            }
            item.fail_max(format!("Field '{}' is {}", f.name, problems.join(", ")));
        }
        None => item.fail_max("No annual interest rate field found"),
    }
    Ok(())
}

/// `class_b`: a private numeric principal field.
fn check_principal_field(class: ClassView<'_>, rubric: &mut Rubric) -> Result<(), RubricError> {
    let item = rubric.get_mut("class_b")?;
    match class.fields.iter().find(|f| name_matches(&f.name, PRINCIPAL)) {
        Some(f) if f.is_private() && is_numeric_type(&f.declared_type) => {
            item.pass(format!("Found private {} {}", f.declared_type, f.name));
        }
        Some(f) if !f.is_private() => {
            item.fail_max(format!("Field '{}' is not private", f.name));
        }
        Some(f) => item.fail_max(format!(
            "Field '{}' has type {}, expected a floating point type",
            f.name, f.declared_type
        )),
        None => item.fail_max("No principal field found"),
    }
    Ok(())
}

/// `class_c`: a one-argument constructor taking a numeric principal.
fn check_constructor(class: ClassView<'_>, rubric: &mut Rubric) -> Result<(), RubricError> {
    let item = rubric.get_mut("class_c")?;
    if class.constructors.is_empty() {
        item.fail_max("No constructor found");
        return Ok(());
    }
    match class.constructors.iter().find(|c| c.arity() == 1) {
        Some(c) if is_numeric_type(&c.parameter_types[0]) => {
            item.pass("Found one-parameter constructor");
        }
        Some(c) => item.fail(
            3,
            format!(
                "Constructor parameter has type {}, expected a floating point type",
                c.parameter_types[0]
            ),
        ),
        None => item.fail_max("No constructor with exactly one parameter"),
    }
    Ok(())
}

/// `class_d`: `calculateMonthlyPayment(int)` returning a floating point value.
fn check_payment_method(class: ClassView<'_>, rubric: &mut Rubric) -> Result<(), RubricError> {
    let item = rubric.get_mut("class_d")?;
    let Some(method) = class
        .methods
        .iter()
        .find(|m| name_matches(&m.name, &["calculateMonthlyPayment"]))
    else {
        item.fail_max("calculateMonthlyPayment method not found");
        return Ok(());
    };

    let mut problems = Vec::new();
    if !is_numeric_type(&method.return_type) {
        problems.push(format!("returns {}", method.return_type));
    }
    match method.parameter_types.as_slice() {
        [only] if is_integer_type(only) => {}
        [only] => problems.push(format!("parameter has type {only}, expected int")),
        params => problems.push(format!("takes {} parameters, expected 1", params.len())),
    }

    if problems.is_empty() {
        item.pass("Found calculateMonthlyPayment(int)");
    } else {
        item.fail(5, format!("calculateMonthlyPayment {}", problems.join("; ")));
    }
    Ok(())
}

/// `class_d_i`: the formula raises to a power somewhere.
fn check_formula(submission: &Submission, rubric: &mut Rubric) -> Result<(), RubricError> {
    let item = rubric.get_mut("class_d_i")?;
    if submission.source_contains(r"Math\s*\.\s*pow\s*\(") {
        item.pass("Uses Math.pow");
    } else {
        item.fail_max("Math.pow not used in payment formula");
    }
    Ok(())
}

/// `class_e`: a static one-argument `setAnnualInterestRate`.
fn check_rate_setter(class: ClassView<'_>, rubric: &mut Rubric) -> Result<(), RubricError> {
    let item = rubric.get_mut("class_e")?;
    match class
        .methods
        .iter()
        .find(|m| name_matches(&m.name, &["setAnnualInterestRate"]))
    {
        Some(m) if m.is_static() && m.arity() == 1 => item.pass("Found static setter"),
        Some(m) if !m.is_static() => item.fail(5, "setAnnualInterestRate is not static"),
        Some(m) => item.fail(
            5,
            format!("setAnnualInterestRate takes {} parameters, expected 1", m.arity()),
        ),
        None => item.fail_max("setAnnualInterestRate method not found"),
    }
    Ok(())
}

/// `main_a`: two loans constructed with the assigned principals.
fn check_loans_created(submission: &Submission, rubric: &mut Rubric) -> Result<(), RubricError> {
    let created = |amount: u32| {
        submission.source_contains(&format!(r"new\s+\w+\s*\(\s*{amount}(?:\.0*)?[dDfF]?\s*\)"))
    };
    let item = rubric.get_mut("main_a")?;
    match (created(5000), created(31000)) {
        (true, true) => item.pass("Both loans created with 5000 and 31000"),
        (false, false) => item.fail_max("No loan created with 5000 or 31000"),
        (true, false) => item.fail(5, "No loan created with 31000"),
        (false, true) => item.fail(5, "No loan created with 5000"),
    }
    Ok(())
}
