use rand::Rng;
use viscreen_core::{
    AcuityPhase, Eye, LetterStimulus, Phase, PlatePhase, PlateStimulus, Response, Stimulus,
    Trial, Verdict, KEY_DONT_KNOW, KEY_NOT_SURE,
};

use crate::classify;
use crate::config::SessionConfig;
use crate::generator;

/// Strategy bundle that turns the generic session engine into one concrete
/// screening test: its phase graph, its trial sequences, its timeout
/// sentinel, and its classifier.
pub trait ScreeningPlan {
    type Phase: Phase;
    type Stim: Stimulus;

    fn name(&self) -> &'static str;

    /// Draw every trial sequence for one session up front, in phase order.
    /// All of the session's randomness is consumed here.
    fn build_session<R: Rng + ?Sized>(
        &self,
        config: &SessionConfig,
        rng: &mut R,
    ) -> Vec<(Self::Phase, Vec<Trial<Self::Stim>>)>;

    /// Reserved answer recorded when a trial's deadline expires.
    fn sentinel(&self) -> &'static str;

    fn classify(&self, responses: &[Response]) -> Verdict;
}

/// Letter-recognition acuity test, one sub-session per eye.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcuityPlan;

impl ScreeningPlan for AcuityPlan {
    type Phase = AcuityPhase;
    type Stim = LetterStimulus;

    fn name(&self) -> &'static str {
        "acuity"
    }

    fn build_session<R: Rng + ?Sized>(
        &self,
        config: &SessionConfig,
        rng: &mut R,
    ) -> Vec<(AcuityPhase, Vec<Trial<LetterStimulus>>)> {
        // Two independent draws; the eyes share no sequence state.
        vec![
            (
                AcuityPhase::EyeTest(Eye::Left),
                generator::acuity_trials(config, rng),
            ),
            (
                AcuityPhase::EyeTest(Eye::Right),
                generator::acuity_trials(config, rng),
            ),
        ]
    }

    fn sentinel(&self) -> &'static str {
        KEY_DONT_KNOW
    }

    fn classify(&self, responses: &[Response]) -> Verdict {
        classify::classify_acuity(responses)
    }
}

/// Color-plate number-recognition test over the curated plate list.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatePlan;

impl ScreeningPlan for PlatePlan {
    type Phase = PlatePhase;
    type Stim = PlateStimulus;

    fn name(&self) -> &'static str {
        "plates"
    }

    fn build_session<R: Rng + ?Sized>(
        &self,
        config: &SessionConfig,
        _rng: &mut R,
    ) -> Vec<(PlatePhase, Vec<Trial<PlateStimulus>>)> {
        vec![(PlatePhase::Testing, generator::plate_trials(config))]
    }

    fn sentinel(&self) -> &'static str {
        KEY_NOT_SURE
    }

    fn classify(&self, responses: &[Response]) -> Verdict {
        classify::classify_plates(responses)
    }
}
