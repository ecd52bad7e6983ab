#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The gradable assignments and their registry.

/// Loan payment arithmetic behind every expected value.
pub mod amortization;
/// Checks several assignments share.
mod common;
/// Loan account with a static rate.
pub mod pa1;
/// Loan account class hierarchy.
pub mod pa2;
/// Customers holding loan accounts.
pub mod pa3;
/// Accepted spellings of graded names.
pub mod synonyms;

pub use pa1::Pa1;
pub use pa2::Pa2;
pub use pa3::Pa3;

use crate::grade::Assignment;

/// Every registered assignment, in course order.
static ASSIGNMENTS: [&(dyn Assignment); 3] = [&Pa1, &Pa2, &Pa3];

/// Looks up an assignment by id, ignoring case.
pub fn lookup(id: &str) -> Option<&'static dyn Assignment> {
    ASSIGNMENTS
        .iter()
        .copied()
        .find(|a| a.id().eq_ignore_ascii_case(id.trim()))
}

/// Every registered assignment
pub fn list() -> &'static [&'static dyn Assignment] {
    &ASSIGNMENTS
}
