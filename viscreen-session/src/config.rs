use std::collections::HashSet;

use crate::error::SessionError;

/// Sloan optotype set used for the acuity letter sequences.
pub const SLOAN_LETTERS: [char; 10] = ['C', 'D', 'H', 'K', 'N', 'O', 'R', 'S', 'V', 'Z'];

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Trials per test phase (per eye for acuity).
    pub trials_per_sequence: usize,
    /// Per-trial response deadline.
    pub deadline_secs: u64,
    /// Selectable answers per acuity trial, correct letter included.
    pub option_count: usize,
    /// Alphabet the acuity stimuli and distractors are drawn from.
    pub alphabet: Vec<char>,
    /// Staircase: letter point size starts here...
    pub max_letter_size: f32,
    /// ...never drops below this floor...
    pub min_letter_size: f32,
    /// ...and shrinks by this much per trial index.
    pub letter_size_step: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            trials_per_sequence: 10,
            deadline_secs: 10,
            option_count: 4,
            alphabet: SLOAN_LETTERS.to_vec(),
            max_letter_size: 120.0,
            min_letter_size: 24.0,
            letter_size_step: 12.0,
        }
    }
}

impl SessionConfig {
    /// A broken stimulus set is a fatal configuration error: the alphabet
    /// must cover one full no-repeat sequence and one full option set.
    pub fn validate(&self) -> Result<(), SessionError> {
        let distinct: HashSet<char> = self.alphabet.iter().copied().collect();
        let needed = self.option_count.max(self.trials_per_sequence);
        if distinct.len() < needed {
            return Err(SessionError::InvalidStimulusSet {
                needed,
                found: distinct.len(),
            });
        }
        Ok(())
    }
}
