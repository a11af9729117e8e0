use serde::{Deserialize, Serialize};

/// The eye under test during an acuity sub-session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eye {
    Left,
    Right,
}

/// Defines screening phases and behavior
pub trait Phase: Copy + Clone + PartialEq + Send + Sync + std::fmt::Debug + Default {
    /// Next phase in the fixed graph, or `None` from the terminal phase.
    fn next(&self) -> Option<Self>;

    /// Phase waits for an explicit proceed action (instructions screens).
    fn awaits_proceed(&self) -> bool {
        false
    }

    /// Phase runs trials.
    fn is_test(&self) -> bool {
        false
    }

    /// Terminal phase; only a reset leaves it.
    fn is_results(&self) -> bool {
        false
    }

    /// Eye covered by the current phase, where that applies.
    fn active_eye(&self) -> Option<Eye> {
        None
    }
}

/// Acuity test: both eyes in sequence, left first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AcuityPhase {
    Instructions,
    EyeInstruct(Eye),
    EyeTest(Eye),
    Results,
}

impl Default for AcuityPhase {
    fn default() -> Self {
        AcuityPhase::Instructions
    }
}

impl Phase for AcuityPhase {
    fn next(&self) -> Option<Self> {
        use AcuityPhase::*;
        Some(match self {
            Instructions => EyeInstruct(Eye::Left),
            EyeInstruct(eye) => EyeTest(*eye),
            EyeTest(Eye::Left) => EyeInstruct(Eye::Right),
            EyeTest(Eye::Right) => Results,
            Results => return None,
        })
    }

    fn awaits_proceed(&self) -> bool {
        matches!(self, Self::Instructions | Self::EyeInstruct(_))
    }

    fn is_test(&self) -> bool {
        matches!(self, Self::EyeTest(_))
    }

    fn is_results(&self) -> bool {
        matches!(self, Self::Results)
    }

    fn active_eye(&self) -> Option<Eye> {
        match self {
            Self::EyeInstruct(eye) | Self::EyeTest(eye) => Some(*eye),
            _ => None,
        }
    }
}

/// Color-plate test: a single trial sequence.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PlatePhase {
    Instructions,
    Testing,
    Results,
}

impl Default for PlatePhase {
    fn default() -> Self {
        PlatePhase::Instructions
    }
}

impl Phase for PlatePhase {
    fn next(&self) -> Option<Self> {
        use PlatePhase::*;
        Some(match self {
            Instructions => Testing,
            Testing => Results,
            Results => return None,
        })
    }

    fn awaits_proceed(&self) -> bool {
        matches!(self, Self::Instructions)
    }

    fn is_test(&self) -> bool {
        matches!(self, Self::Testing)
    }

    fn is_results(&self) -> bool {
        matches!(self, Self::Results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk<P: Phase>() -> Vec<P> {
        let mut out = vec![P::default()];
        while let Some(next) = out.last().unwrap().next() {
            out.push(next);
        }
        out
    }

    #[test]
    fn acuity_phase_order() {
        use AcuityPhase::*;
        assert_eq!(
            walk::<AcuityPhase>(),
            vec![
                Instructions,
                EyeInstruct(Eye::Left),
                EyeTest(Eye::Left),
                EyeInstruct(Eye::Right),
                EyeTest(Eye::Right),
                Results,
            ]
        );
        assert!(Results.is_results());
        assert_eq!(Results.next(), None);
    }

    #[test]
    fn plate_phase_order() {
        use PlatePhase::*;
        assert_eq!(walk::<PlatePhase>(), vec![Instructions, Testing, Results]);
        assert_eq!(Results.next(), None);
    }

    #[test]
    fn test_phases_report_active_eye() {
        assert_eq!(
            AcuityPhase::EyeTest(Eye::Right).active_eye(),
            Some(Eye::Right)
        );
        assert_eq!(AcuityPhase::Instructions.active_eye(), None);
        assert_eq!(PlatePhase::Testing.active_eye(), None);
    }
}
