pub mod phase;
pub mod stimulus;
pub mod trial;
pub mod verdict;

pub use phase::{AcuityPhase, Eye, Phase, PlatePhase};
pub use stimulus::{LetterStimulus, PlateStimulus, Stimulus};
pub use trial::{Candidate, Response, Trial, KEY_DONT_KNOW, KEY_NO_NUMBER, KEY_NOT_SURE};
pub use verdict::{EyeScore, Severity, Verdict};
