#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::{
    assignments::{
        common::{constructor_arities, fail_all, has_field},
        synonyms::{FIRST_NAME, LAST_NAME, LOAN_LIST, SSN},
    },
    grade::{
        Rubric, RubricError,
        matching::{is_list_type, name_contains_all, name_matches},
    },
    java::{ClassView, MethodFact, Submission},
};

/// Every customer item, in rubric order.
const CUSTOMER_ITEMS: &[&str] = &[
    "cust_props",
    "cust_constructor",
    "cust_getter_firstname",
    "cust_getter_lastname",
    "cust_getter_ssn",
    "cust_addloan",
    "cust_printreport",
];

/// Classes from PA2 or the driver, never the customer.
const NOT_CUSTOMER: &[&str] = &[
    "Address",
    "CarLoan",
    "PrimaryMortgage",
    "UnsecuredLoan",
    "LoanAccount",
    "LoanAccountHierarchy",
    "Main",
    "Test",
];

/// Finds the customer class: named `Customer`, named like it, or holding a
/// name, an SSN, and a list.
fn customer_class(submission: &Submission) -> Option<ClassView<'_>> {
    submission
        .find_class(&["Customer"])
        .or_else(|| {
            submission
                .classes()
                .find(|c| c.name.to_lowercase().contains("customer"))
        })
        .or_else(|| {
            submission.classes().find(|c| {
                !NOT_CUSTOMER.iter().any(|n| c.name.eq_ignore_ascii_case(n))
                    && has_field(*c, FIRST_NAME)
                    && has_field(*c, LAST_NAME)
                    && has_field(*c, SSN)
                    && c.fields.iter().any(|f| is_list_type(&f.declared_type))
            })
        })
}

/// Grades every customer item.
pub fn check(submission: &Submission, rubric: &mut Rubric) -> Result<(), RubricError> {
    let Some(customer) = customer_class(submission) else {
        return fail_all(rubric, CUSTOMER_ITEMS, "Customer class not found");
    };

    check_properties(submission, customer, rubric)?;
    check_constructor(customer, rubric)?;
    check_getters(customer, rubric)?;
    check_add_loan(submission, customer, rubric)?;
    check_print_report(submission, customer, rubric)
}

/// `cust_props`: names, SSN, and a loan list, with a declaration search over
/// every file for anything the facts missed.
fn check_properties(
    submission: &Submission,
    customer: ClassView<'_>,
    rubric: &mut Rubric,
) -> Result<(), RubricError> {
    let mut missing = Vec::new();
    if !has_field(customer, FIRST_NAME)
        && !submission.source_contains(r"(?:String|string)\s+(?:firstName|first_name|fname)")
    {
        missing.push("firstName");
    }
    if !has_field(customer, LAST_NAME)
        && !submission.source_contains(r"(?:String|string)\s+(?:lastName|last_name|lname)")
    {
        missing.push("lastName");
    }
    if !has_field(customer, SSN)
        && !submission.source_contains(r"(?:String|string)\s+(?:SSN|ssn|socialSecurityNumber)")
    {
        missing.push("SSN");
    }
    if !has_field(customer, LOAN_LIST)
        && !customer.fields.iter().any(|f| is_list_type(&f.declared_type))
        && !submission.source_contains(r"ArrayList\s*<\s*LoanAccount\s*>")
    {
        missing.push("loanAccounts (ArrayList<LoanAccount>)");
    }

    let item = rubric.get_mut("cust_props")?;
    if missing.is_empty() {
        item.pass("All four properties found");
    } else {
        item.fail_max(format!("Missing properties: {}", missing.join(", ")));
    }
    Ok(())
}

/// `cust_constructor`: three parameters.
fn check_constructor(customer: ClassView<'_>, rubric: &mut Rubric) -> Result<(), RubricError> {
    let item = rubric.get_mut("cust_constructor")?;
    if customer.constructors.iter().any(|c| c.arity() == 3) {
        item.pass("Found 3-parameter constructor");
    } else if customer.constructors.is_empty() {
        item.fail_max("No constructor found");
    } else {
        item.fail_max(format!(
            "No 3-parameter constructor (found {} params)",
            constructor_arities(customer)
        ));
    }
    Ok(())
}

/// Whether a getter exists under one of `names`, or any `get*` containing
/// `fragment`.
fn has_getter(customer: ClassView<'_>, names: &[&str], fragment: &str) -> bool {
    customer.methods.iter().any(|m| {
        name_matches(&m.name, names) || {
            let lower = m.name.to_lowercase();
            lower.starts_with("get") && lower.contains(fragment)
        }
    })
}

/// The three getter items.
fn check_getters(customer: ClassView<'_>, rubric: &mut Rubric) -> Result<(), RubricError> {
    let getters: [(&str, &[&str], &str, &str); 3] = [
        (
            "cust_getter_firstname",
            &["getFirstName", "getFname", "getFirst"],
            "first",
            "getFirstName()",
        ),
        (
            "cust_getter_lastname",
            &["getLastName", "getLname", "getLast"],
            "last",
            "getLastName()",
        ),
        (
            "cust_getter_ssn",
            &["getSSN", "getSocialSecurityNumber", "getSocial"],
            "ss",
            "getSSN()",
        ),
    ];
    for (id, names, fragment, label) in getters {
        let item = rubric.get_mut(id)?;
        if has_getter(customer, names, fragment) {
            item.pass(format!("Found {label}"));
        } else {
            item.fail_max(format!("{label} not found"));
        }
    }
    Ok(())
}

/// Finds a method by exact names first, then by each group of name fragments
/// in turn.
fn find_method<'a>(
    customer: ClassView<'a>,
    names: &[&str],
    fragment_groups: &[&[&str]],
) -> Option<&'a MethodFact> {
    let methods = &customer.facts().methods;
    methods
        .iter()
        .find(|m| name_matches(&m.name, names))
        .or_else(|| {
            fragment_groups.iter().find_map(|fragments| {
                methods
                    .iter()
                    .find(|m| name_contains_all(&m.name, fragments))
            })
        })
}

/// `cust_addloan`: a one-parameter method adding a loan.
fn check_add_loan(
    submission: &Submission,
    customer: ClassView<'_>,
    rubric: &mut Rubric,
) -> Result<(), RubricError> {
    let method = find_method(
        customer,
        &["addLoanAccount", "addLoan", "addAccount"],
        &[&["add", "loan"], &["add", "account"]],
    );
    let item = rubric.get_mut("cust_addloan")?;
    match method {
        Some(m) if m.arity() == 1 => item.pass(format!("Found {}()", m.name)),
        Some(m) => item.fail(
            5,
            format!("addLoanAccount should take 1 parameter, found {}", m.arity()),
        ),
        None if submission.source_contains(r"(?i)void\s+add\w*(?:Loan|Account)\s*\(") => {
            item.pass("Found add method declaration");
        }
        None => item.fail_max("addLoanAccount() method not found"),
    }
    Ok(())
}

/// `cust_printreport`: a void report method.
fn check_print_report(
    submission: &Submission,
    customer: ClassView<'_>,
    rubric: &mut Rubric,
) -> Result<(), RubricError> {
    let method = find_method(
        customer,
        &["printMonthlyReport", "printReport", "monthlyReport", "printLoanReport"],
        &[&["print", "report"], &["print", "monthly"]],
    );
    let item = rubric.get_mut("cust_printreport")?;
    match method {
        Some(m) if m.is_void() => item.pass(format!("Found {}()", m.name)),
        Some(m) => item.fail(
            5,
            format!("printMonthlyReport should return void, found {}", m.return_type),
        ),
        None if submission.source_contains(r"(?i)void\s+print\w*(?:Monthly|Report)\s*\(") => {
            item.pass("Found print method declaration");
        }
        None => item.fail_max("printMonthlyReport() method not found"),
    }
    Ok(())
}
