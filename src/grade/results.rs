#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::{
    rubric::RubricItem,
    score::{ScorePolicy, letter_grade},
};
use crate::java::JavacDiagnostic;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One line of the deductions list: why points were lost and how many.
pub struct Deduction {
    /// what was missed
    pub reason: String,
    /// points lost, never negative
    pub points: u32,
}

#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
/// Everything known about one graded submission.
///
/// `total_score` and `lint_penalty` are derived; call
/// [`GradingResult::scored`] after building.
pub struct GradingResult {
    /// student display name
    pub student_name:        String,
    /// opaque student identifier
    pub student_id:          String,
    /// final rubric verdicts
    #[builder(default)]
    pub rubric_items:        Vec<RubricItem>,
    /// javac succeeded
    #[builder(default)]
    pub compilation_success: bool,
    /// the program ran to completion
    #[builder(default)]
    pub execution_success:   bool,
    /// standard output of the run
    #[builder(default)]
    pub actual_output:       String,
    /// submitted source, one header per file when there are several
    #[builder(default)]
    pub source_code:         String,
    /// javac output
    #[builder(default)]
    pub compiler_errors:     String,
    /// diagnostics javac reported, in order
    #[builder(default)]
    #[serde(default)]
    pub javac_diagnostics:   Vec<JavacDiagnostic>,
    /// crash, timeout, or launch failure text
    #[builder(default)]
    pub runtime_errors:      String,
    /// OOP lint notes
    #[builder(default)]
    pub oop_notes:           Vec<String>,
    /// expected program output for the report
    #[builder(default)]
    pub expected_output:     String,
    /// score before deductions
    #[builder(default = 100)]
    pub max_score:           u32,
    /// computed score
    #[builder(skip)]
    pub total_score:         u32,
    /// points lost to lint notes
    #[builder(skip)]
    pub lint_penalty:        u32,
    /// set when grading itself failed
    pub error_message:       Option<String>,
}

impl GradingResult {
    /// Computes `total_score` and `lint_penalty` under `policy`.
    pub fn scored(mut self, policy: &ScorePolicy) -> Self {
        let deductions = self.rubric_items.iter().map(RubricItem::deduction).sum();
        self.max_score = policy.max_score;
        self.lint_penalty = policy.lint_penalty(self.oop_notes.len());
        self.total_score = policy.score(deductions, self.oop_notes.len());
        self
    }

    /// A zero-score result for a submission that could not be graded.
    pub fn errored(
        student_name: impl Into<String>,
        student_id: impl Into<String>,
        message: impl Into<String>,
        max_score: u32,
    ) -> Self {
        let message: String = message.into();
        GradingResult::builder()
            .student_name(student_name)
            .student_id(student_id)
            .max_score(max_score)
            .error_message(message)
            .build()
    }

    /// Letter grade for `total_score`
    pub fn letter_grade(&self) -> &'static str {
        letter_grade(self.total_score)
    }

    /// Sum of deductions for items in `category`
    pub fn category_deductions(&self, category: &str) -> u32 {
        self.rubric_items
            .iter()
            .filter(|item| item.category() == category)
            .map(RubricItem::deduction)
            .sum()
    }

    /// Categories in rubric order, without repeats
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.rubric_items {
            if !seen.contains(&item.category()) {
                seen.push(item.category());
            }
        }
        seen
    }

    /// Every point lost, rubric items first and the lint penalty last.
    pub fn deductions(&self) -> Vec<Deduction> {
        let mut out: Vec<Deduction> = self
            .rubric_items
            .iter()
            .filter(|item| item.deduction() > 0)
            .map(|item| Deduction {
                reason: if item.notes().is_empty() {
                    item.description().to_string()
                } else {
                    format!("{}: {}", item.description(), item.notes())
                },
                points: item.deduction(),
            })
            .collect();

        if self.lint_penalty > 0 {
            out.push(Deduction {
                reason: format!("OOP practice issues ({})", self.oop_notes.len()),
                points: self.lint_penalty,
            });
        }
        out
    }
}
