#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};

/// Scoring constants: the maximum score and the lint penalty, which has its
/// own cap separate from rubric deductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePolicy {
    /// score with no deductions
    pub max_score:             u32,
    /// points lost per lint note
    pub lint_penalty_per_note: u32,
    /// most points lint can cost in total
    pub lint_penalty_cap:      u32,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            max_score:             100,
            lint_penalty_per_note: 2,
            lint_penalty_cap:      15,
        }
    }
}

impl ScorePolicy {
    /// Points lost to `lint_notes` notes, after the cap.
    pub fn lint_penalty(&self, lint_notes: usize) -> u32 {
        let notes = u32::try_from(lint_notes).unwrap_or(u32::MAX);
        notes
            .saturating_mul(self.lint_penalty_per_note)
            .min(self.lint_penalty_cap)
    }

    /// `max(0, max_score - deductions - lint penalty)`
    pub fn score(&self, total_deductions: u32, lint_notes: usize) -> u32 {
        self.max_score
            .saturating_sub(total_deductions)
            .saturating_sub(self.lint_penalty(lint_notes))
    }
}

/// Letter grade for a numeric score.
pub fn letter_grade(score: u32) -> &'static str {
    match score {
        93.. => "A",
        90..=92 => "A-",
        87..=89 => "B+",
        83..=86 => "B",
        80..=82 => "B-",
        77..=79 => "C+",
        70..=76 => "C",
        60..=69 => "D",
        _ => "F",
    }
}
