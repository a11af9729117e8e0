/// Defines stimuli and the data the presentation layer needs to render them
pub trait Stimulus: Clone + Send + Sync + std::fmt::Debug {
    /// The value a correct response must match.
    fn answer(&self) -> String;
}

/// A single optotype letter at a staircase-determined size.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterStimulus {
    pub letter: char,
    pub point_size: f32,
}

impl Stimulus for LetterStimulus {
    fn answer(&self) -> String {
        self.letter.to_string()
    }
}

/// One curated pseudoisochromatic plate with its rendering recipe.
///
/// The recipe is opaque to the session engine; the presentation layer draws
/// `dot_count` dots from `palette` and the hidden figure in `figure_color`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateStimulus {
    pub id: u8,
    pub answer: &'static str,
    pub palette: [&'static str; 3],
    pub figure_color: &'static str,
    pub dot_count: u16,
}

impl Stimulus for PlateStimulus {
    fn answer(&self) -> String {
        self.answer.to_string()
    }
}
