#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a check refers to the rubric incorrectly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RubricError {
    /// A check asked for an item id the rubric does not define.
    #[error("rubric has no item with id `{0}`")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One gradable criterion with a point cap and its current verdict.
///
/// Items start out passed with no deduction. `passed` and `deduction` only
/// change together, through [`RubricItem::pass`], [`RubricItem::fail`], and
/// [`RubricItem::fail_max`].
pub struct RubricItem {
    /// stable key, e.g. `class_d_i`
    id:            String,
    /// grouping used for subtotals, e.g. `Main Method`
    category:      String,
    /// what the item checks
    description:   String,
    /// points lost when the item fails outright
    max_deduction: u32,
    /// points currently lost, never above `max_deduction`
    deduction:     u32,
    /// current verdict
    passed:        bool,
    /// explanation of the verdict
    notes:         String,
}

impl RubricItem {
    /// Creates an item in its default passing state.
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        max_deduction: u32,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            description: description.into(),
            max_deduction,
            deduction: 0,
            passed: true,
            notes: String::new(),
        }
    }

    /// Item id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Item category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Item description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Points lost on outright failure
    pub fn max_deduction(&self) -> u32 {
        self.max_deduction
    }

    /// Points currently lost
    pub fn deduction(&self) -> u32 {
        self.deduction
    }

    /// Current verdict
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Explanation of the verdict
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Whether the full points were earned.
    pub fn earned(&self) -> bool {
        self.deduction == 0
    }

    /// Marks the item passed and clears its deduction.
    pub fn pass(&mut self, note: impl Into<String>) {
        self.passed = true;
        self.deduction = 0;
        self.notes = note.into();
    }

    /// Marks the item failed with `deduction` points lost, clamped to the
    /// item's maximum.
    pub fn fail(&mut self, deduction: u32, note: impl Into<String>) {
        self.passed = false;
        self.deduction = deduction.min(self.max_deduction);
        self.notes = note.into();
    }

    /// Marks the item failed with its maximum deduction.
    pub fn fail_max(&mut self, note: impl Into<String>) {
        self.fail(self.max_deduction, note);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// An ordered set of rubric items addressed by id.
pub struct Rubric {
    /// items in presentation order
    items: Vec<RubricItem>,
}

impl Rubric {
    /// Creates a rubric from items in presentation order.
    pub fn new(items: Vec<RubricItem>) -> Self {
        Self { items }
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Result<&RubricItem, RubricError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| RubricError::NotFound(id.to_string()))
    }

    /// Looks up an item by id for mutation.
    pub fn get_mut(&mut self, id: &str) -> Result<&mut RubricItem, RubricError> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| RubricError::NotFound(id.to_string()))
    }

    /// Items in presentation order
    pub fn items(&self) -> &[RubricItem] {
        &self.items
    }

    /// Mutable iterator over every item
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RubricItem> {
        self.items.iter_mut()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the rubric has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the rubric, returning its items.
    pub fn into_items(self) -> Vec<RubricItem> {
        self.items
    }

    /// Sum of every item's current deduction
    pub fn total_deductions(&self) -> u32 {
        self.items.iter().map(RubricItem::deduction).sum()
    }
}
