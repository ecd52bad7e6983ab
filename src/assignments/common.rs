#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Checks several assignments share.

use itertools::Itertools;

use crate::{
    grade::{
        Rubric, RubricError,
        matching::{any_name_matches, name_matches},
    },
    java::ClassView,
};

/// Fails every item in `ids` with its maximum deduction and the same note.
pub fn fail_all(rubric: &mut Rubric, ids: &[&str], note: &str) -> Result<(), RubricError> {
    for id in ids {
        rubric.get_mut(id)?.fail_max(note);
    }
    Ok(())
}

/// Whether the class declares `toString`, or its file at least calls one.
pub fn has_to_string(class: ClassView<'_>) -> bool {
    class
        .methods
        .iter()
        .any(|m| m.name.eq_ignore_ascii_case("toString"))
        || class.source_contains(r"toString\s*\(")
}

/// Grades a `toString` item.
pub fn check_to_string(
    class: ClassView<'_>,
    rubric: &mut Rubric,
    id: &str,
) -> Result<(), RubricError> {
    let item = rubric.get_mut(id)?;
    if has_to_string(class) {
        item.pass("Found toString()");
    } else {
        item.fail_max("toString() method not found");
    }
    Ok(())
}

/// Constructor arities for notes, e.g. `[2, 3]` or `none`.
pub fn constructor_arities(class: ClassView<'_>) -> String {
    if class.constructors.is_empty() {
        return "none".to_string();
    }
    format!("[{}]", class.constructors.iter().map(|c| c.arity()).join(", "))
}

/// Grades a constructor item that wants exactly `arity` parameters.
pub fn check_constructor_arity(
    class: ClassView<'_>,
    rubric: &mut Rubric,
    id: &str,
    arity: usize,
) -> Result<(), RubricError> {
    let item = rubric.get_mut(id)?;
    if class.constructors.iter().any(|c| c.arity() == arity) {
        item.pass(format!("Found {arity}-parameter constructor"));
    } else {
        item.fail_max(format!(
            "No {arity}-parameter constructor found ({})",
            constructor_arities(class)
        ));
    }
    Ok(())
}

/// Grades a subclass item: the class must extend `base`.
pub fn check_extends(
    class: ClassView<'_>,
    rubric: &mut Rubric,
    id: &str,
    base: &str,
) -> Result<(), RubricError> {
    let item = rubric.get_mut(id)?;
    if class.extends(base) {
        item.pass(format!("{} extends {base}", class.name));
    } else {
        item.fail_max(format!(
            "{} does not extend {base} (extends: {})",
            class.name,
            class.superclass.as_deref().unwrap_or("nothing")
        ));
    }
    Ok(())
}

/// Whether the class has a field named like one of `synonyms`.
pub fn has_field(class: ClassView<'_>, synonyms: &[&str]) -> bool {
    any_name_matches(class.fields.iter().map(|f| f.name.as_str()), synonyms)
}

/// Counts getters: distinct names from `known`, or failing `wanted` of those,
/// every parameterless `get*` method that returns something.
pub fn count_getters(class: ClassView<'_>, known: &[&str], wanted: usize) -> usize {
    let named = class
        .methods
        .iter()
        .filter(|m| name_matches(&m.name, known))
        .map(|m| m.name.to_lowercase())
        .unique()
        .count();
    if named >= wanted {
        return named;
    }
    class
        .methods
        .iter()
        .filter(|m| m.name.to_lowercase().starts_with("get") && !m.is_void() && m.arity() == 0)
        .count()
}

/// Grades a getters item that wants at least `wanted` getters.
pub fn check_getters(
    class: ClassView<'_>,
    rubric: &mut Rubric,
    id: &str,
    known: &[&str],
    wanted: usize,
) -> Result<(), RubricError> {
    let found = count_getters(class, known, wanted);
    let item = rubric.get_mut(id)?;
    if found >= wanted {
        item.pass(format!("{found} getters found"));
    } else {
        item.fail_max(format!("Only {found} getter(s) found, expected {wanted}"));
    }
    Ok(())
}
