use viscreen_core::{Eye, EyeScore, Response, Severity, Verdict};

/// Accuracy at or above this is classified `Normal`.
pub const NORMAL_CUTOFF: f64 = 0.90;
/// Accuracy at or above this (and below `NORMAL_CUTOFF`) is `Mild`.
pub const MILD_CUTOFF: f64 = 0.70;

/// Band an overall plate accuracy. Bands are contiguous and evaluated in
/// order, so every accuracy lands in exactly one.
pub fn plate_severity(accuracy: f64) -> Severity {
    if accuracy >= NORMAL_CUTOFF {
        Severity::Normal
    } else if accuracy >= MILD_CUTOFF {
        Severity::Mild
    } else {
        Severity::Significant
    }
}

/// Reduce a completed plate log to its verdict. Callers guarantee the log is
/// complete; classification of a partial log is undefined.
pub fn classify_plates(responses: &[Response]) -> Verdict {
    let total = responses.len();
    let correct = responses.iter().filter(|r| r.correct).count();
    let accuracy = correct as f64 / total as f64;
    Verdict::Plates {
        severity: plate_severity(accuracy),
        correct,
        total,
    }
}

/// Reduce a completed two-eye acuity log to per-eye scores.
pub fn classify_acuity(responses: &[Response]) -> Verdict {
    Verdict::Acuity {
        left: eye_score(responses, Eye::Left),
        right: eye_score(responses, Eye::Right),
    }
}

fn eye_score(responses: &[Response], eye: Eye) -> EyeScore {
    let for_eye = responses.iter().filter(|r| r.eye == Some(eye));
    let (mut correct, mut total) = (0, 0);
    for response in for_eye {
        total += 1;
        if response.correct {
            correct += 1;
        }
    }
    EyeScore { eye, correct, total }
}
