use serde::{Deserialize, Serialize};

use crate::phase::Eye;
use crate::stimulus::Stimulus;

/// Sentinel recorded when an acuity trial times out.
pub const KEY_DONT_KNOW: &str = "dontKnow";
/// Escape option on every plate; also the plate timeout sentinel.
pub const KEY_NOT_SURE: &str = "notSure";
/// Escape option on every plate.
pub const KEY_NO_NUMBER: &str = "noNumberVisible";

/// One selectable answer. Escape candidates carry a reserved label key as
/// their value; the presentation layer localizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
}

impl Candidate {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn is_escape(&self) -> bool {
        matches!(self.value.as_str(), KEY_NOT_SURE | KEY_NO_NUMBER)
    }
}

/// One stimulus-presentation-and-response unit. Immutable once generated.
#[derive(Debug, Clone)]
pub struct Trial<S: Stimulus> {
    pub index: usize,
    pub stimulus: S,
    pub options: Vec<Candidate>,
    pub deadline_secs: u64,
}

impl<S: Stimulus> Trial<S> {
    /// Exactly one option matches this per the generation contract.
    pub fn correct_value(&self) -> String {
        self.stimulus.answer()
    }
}

/// Recorded outcome of one completed trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub trial_index: usize,
    pub eye: Option<Eye>,
    pub chosen: String,
    pub correct: bool,
    pub timed_out: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_detection() {
        assert!(Candidate::new(KEY_NOT_SURE).is_escape());
        assert!(Candidate::new(KEY_NO_NUMBER).is_escape());
        assert!(!Candidate::new("12").is_escape());
        assert!(!Candidate::new("E").is_escape());
    }
}
