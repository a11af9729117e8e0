use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Action requested in a phase that does not permit it. Recoverable:
    /// callers drop the action and carry on.
    #[error("`{action}` is not valid in the current phase")]
    InvalidTransition { action: &'static str },

    /// The configured alphabet cannot cover a stimulus sequence and its
    /// option sets. Fatal at construction.
    #[error("stimulus alphabet needs {needed} distinct symbols, found {found}")]
    InvalidStimulusSet { needed: usize, found: usize },

    /// Verdict requested before the session reached its results phase.
    #[error("verdict is only available once the session has completed")]
    VerdictUnavailable,
}
