#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Write as _;

use colored::Colorize;
use itertools::Itertools;
use similar::{Algorithm, ChangeTag, utils::diff_unicode_words};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};

use super::{results::GradingResult, rubric::RubricItem};

/// What to include when rendering a result.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// include source code and compiler output
    pub verbose:   bool,
    /// include a word diff of expected against actual output
    pub show_diff: bool,
}

#[derive(Tabled)]
/// One table row per rubric item
struct ItemRow {
    #[tabled(rename = "Item")]
    /// rubric item id
    id:          String,
    #[tabled(rename = "Requirement")]
    /// item description
    description: String,
    #[tabled(rename = "Status")]
    /// PASS or FAIL
    status:      &'static str,
    #[tabled(rename = "Points")]
    /// e.g. `-5/10`
    points:      String,
    #[tabled(rename = "Notes")]
    /// verdict notes
    notes:       String,
}

impl From<&RubricItem> for ItemRow {
    fn from(item: &RubricItem) -> Self {
        Self {
            id:          item.id().to_string(),
            description: item.description().to_string(),
            status:      if item.passed() { "PASS" } else { "FAIL" },
            points:      format!("-{}/{}", item.deduction(), item.max_deduction()),
            notes:       item.notes().to_string(),
        }
    }
}

/// Word-level diff of `expected` against `actual`: deletions red in the
/// expected half, insertions green in the actual half.
pub fn output_diff(expected: &str, actual: &str) -> String {
    let diff = diff_unicode_words(Algorithm::Patience, expected.trim(), actual.trim());

    let mut colored_expected = String::new();
    let mut colored_actual = String::new();
    for (change, value) in diff {
        match change {
            ChangeTag::Equal => {
                colored_expected.push_str(value);
                colored_actual.push_str(value);
            }
            ChangeTag::Insert => colored_actual.push_str(&format!("{}", value.green())),
            ChangeTag::Delete => colored_expected.push_str(&format!("{}", value.red())),
        }
    }

    format!("Expected:\n{colored_expected}\n\nActual:\n{colored_actual}\n")
}

/// Renders one graded submission for the terminal.
pub fn render_result(result: &GradingResult, options: ReportOptions) -> String {
    let mut out = String::new();
    let who = if result.student_id.is_empty() {
        result.student_name.clone()
    } else {
        format!("{} ({})", result.student_name, result.student_id)
    };
    let _ = writeln!(out, "{}", who.bold());

    if let Some(message) = &result.error_message {
        let _ = writeln!(out, "{} {message}", "Could not grade:".red().bold());
        let _ = writeln!(out, "Score: 0/{}  Grade: F", result.max_score);
        return out;
    }

    let status = |ok: bool| if ok { "yes".green() } else { "no".red() };
    let _ = writeln!(
        out,
        "Compiled: {}  Ran: {}",
        status(result.compilation_success),
        status(result.execution_success)
    );

    for category in result.categories() {
        let rows: Vec<ItemRow> = result
            .rubric_items
            .iter()
            .filter(|item| item.category() == category)
            .map(ItemRow::from)
            .collect();
        let _ = writeln!(
            out,
            "{}",
            Table::new(&rows)
                .with(Panel::header(category))
                .with(Panel::footer(format!(
                    "Deductions: -{}",
                    result.category_deductions(category)
                )))
                .with(Modify::new(Rows::new(1..)).with(Width::wrap(32).keep_words(true)))
                .with(Modify::new(Rows::first()).with(Alignment::center()))
                .with(Style::modern())
        );
    }

    if !result.oop_notes.is_empty() {
        let _ = writeln!(
            out,
            "{} (-{})\n  {}",
            "OOP practice".yellow().bold(),
            result.lint_penalty,
            result.oop_notes.iter().join("\n  ")
        );
    }

    if !result.runtime_errors.is_empty() {
        let _ = writeln!(out, "{}\n{}", "Runtime".red().bold(), result.runtime_errors.trim_end());
    }

    if !result.compilation_success {
        let diagnostics = &result.javac_diagnostics;
        if !diagnostics.is_empty() {
            let _ = writeln!(
                out,
                "{}",
                Table::new(diagnostics)
                    .with(Panel::header("Compiler diagnostics"))
                    .with(Modify::new(Rows::new(1..)).with(Width::wrap(48).keep_words(true)))
                    .with(Style::modern())
            );
        }
    }

    if options.verbose && !result.compiler_errors.trim().is_empty() {
        let _ = writeln!(out, "{}\n{}", "Compiler".red().bold(), result.compiler_errors.trim_end());
    }

    if options.show_diff && result.execution_success && !result.expected_output.is_empty() {
        let _ = writeln!(out, "{}", output_diff(&result.expected_output, &result.actual_output));
    }

    if options.verbose {
        let _ = writeln!(out, "{}\n{}", "Source".bold(), result.source_code);
    }

    let score = format!(
        "Score: {}/{}  Grade: {}",
        result.total_score,
        result.max_score,
        result.letter_grade()
    );
    let _ = writeln!(out, "{}", score.bold());
    out
}

/// Aggregate numbers over a batch of results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchSummary {
    /// number of results
    pub count:   usize,
    /// mean total score
    pub average: f64,
    /// best total score
    pub high:    u32,
    /// worst total score
    pub low:     u32,
}

impl BatchSummary {
    /// Summarizes `results`, or `None` when there are none.
    pub fn of(results: &[GradingResult]) -> Option<Self> {
        let (low, high) = results
            .iter()
            .map(|r| r.total_score)
            .minmax()
            .into_option()?;
        let total: u64 = results.iter().map(|r| u64::from(r.total_score)).sum();

        Some(Self {
            count: results.len(),
            average: total as f64 / results.len() as f64,
            high,
            low,
        })
    }
}

#[derive(Tabled)]
/// One table row per student in the batch summary
struct SummaryRow {
    #[tabled(rename = "Student")]
    /// display name
    student: String,
    #[tabled(rename = "Score")]
    /// `score/max`
    score:   String,
    #[tabled(rename = "Grade")]
    /// letter grade
    grade:   &'static str,
}

/// Renders a one-line-per-student table with average, high, and low.
pub fn render_summary(results: &[GradingResult]) -> String {
    let Some(summary) = BatchSummary::of(results) else {
        return String::from("No submissions graded.\n");
    };

    let rows: Vec<SummaryRow> = results
        .iter()
        .map(|r| SummaryRow {
            student: r.student_name.clone(),
            score:   format!("{}/{}", r.total_score, r.max_score),
            grade:   r.letter_grade(),
        })
        .collect();

    format!(
        "{}\n",
        Table::new(&rows)
            .with(Panel::header("Summary"))
            .with(Panel::footer(format!(
                "{} graded | average {:.1} | high {} | low {}",
                summary.count, summary.average, summary.high, summary.low
            )))
            .with(Style::modern())
    )
}
