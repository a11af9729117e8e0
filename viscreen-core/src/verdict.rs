use serde::{Deserialize, Serialize};

use crate::phase::Eye;

/// Severity bucket for the color-plate test.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Mild,
    Significant,
}

/// Correct count for one eye's completed sub-session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EyeScore {
    pub eye: Eye,
    pub correct: usize,
    pub total: usize,
}

impl EyeScore {
    /// An eye passes only at the maximum score.
    pub fn passed(&self) -> bool {
        self.correct == self.total
    }
}

/// Final classified outcome of a completed session. Derived once from the
/// full response log, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "test", rename_all = "lowercase")]
pub enum Verdict {
    Acuity { left: EyeScore, right: EyeScore },
    Plates {
        severity: Severity,
        correct: usize,
        total: usize,
    },
}

impl Verdict {
    /// Acuity verdicts are perfect only when both eyes pass.
    pub fn is_perfect(&self) -> bool {
        match self {
            Verdict::Acuity { left, right } => left.passed() && right.passed(),
            Verdict::Plates { severity, .. } => *severity == Severity::Normal,
        }
    }
}
