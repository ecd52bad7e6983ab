#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use itertools::Itertools;

use crate::java::{FieldFact, Submission};

/// Field names never worth a lint note.
const ALWAYS_ALLOWED: &[&str] = &["args"];

/// Whether `field` is visible outside its class when it should not be:
/// public or package-private, and neither static nor protected.
fn is_exposed(field: &FieldFact) -> bool {
    !field.is_private() && !field.is_static() && !field.has_modifier("protected")
}

/// Flags exposed fields in the submission's primary class file.
///
/// Names in `allow_list` (compared case-insensitively) are skipped because the
/// rubric already grades them. Each field is reported once.
pub fn check_oop_practices(submission: &Submission, allow_list: &[&str]) -> Vec<String> {
    let Some(file) = submission.primary_file() else {
        return vec![];
    };

    file.facts()
        .fields()
        .filter(|f| is_exposed(f))
        .filter(|f| {
            !ALWAYS_ALLOWED.contains(&f.name.as_str())
                && !allow_list.iter().any(|a| a.eq_ignore_ascii_case(&f.name))
        })
        .map(|f| format!("Field '{}' should be private", f.name))
        .unique()
        .collect()
}
