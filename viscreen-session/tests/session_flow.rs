use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use viscreen_core::{AcuityPhase, Eye, PlatePhase, Severity, Verdict};
use viscreen_session::{AcuityPlan, PlatePlan, ScreeningPlan, SessionConfig, SessionEngine};
use viscreen_timing::{Clock, ManualClock};

fn engine<P: ScreeningPlan>(
    plan: P,
    seed: u64,
) -> (SessionEngine<P, ManualClock, StdRng>, ManualClock) {
    let clock = ManualClock::new();
    let engine = SessionEngine::new(
        plan,
        SessionConfig::default(),
        clock.clone(),
        StdRng::seed_from_u64(seed),
    )
    .expect("default config is valid");
    (engine, clock)
}

/// Answer the current trial correctly or with some wrong option.
fn answer<P: ScreeningPlan, C: Clock>(
    engine: &mut SessionEngine<P, C, StdRng>,
    correctly: bool,
) {
    let trial = engine.current_trial().expect("in a test phase");
    let target = trial.correct_value();
    let value = if correctly {
        target
    } else {
        trial
            .options
            .iter()
            .map(|o| o.value.clone())
            .find(|v| *v != target)
            .expect("every trial has a wrong option")
    };
    engine.submit_answer(&value).unwrap();
}

#[test]
fn plates_nine_of_ten_is_normal() {
    let (mut engine, _clock) = engine(PlatePlan, 1);
    engine.begin().unwrap();

    for i in 0..10 {
        answer(&mut engine, i != 4);
    }

    assert_eq!(engine.phase(), PlatePhase::Results);
    assert_eq!(
        engine.verdict().unwrap(),
        Verdict::Plates {
            severity: Severity::Normal,
            correct: 9,
            total: 10,
        }
    );
}

#[test]
fn plates_severity_bands_from_full_runs() {
    for (correct, expected) in [
        (10, Severity::Normal),
        (9, Severity::Normal),
        (8, Severity::Mild),
        (7, Severity::Mild),
        (6, Severity::Significant),
        (0, Severity::Significant),
    ] {
        let (mut engine, _clock) = engine(PlatePlan, 1);
        engine.begin().unwrap();
        for i in 0..10 {
            answer(&mut engine, i < correct);
        }
        let Verdict::Plates { severity, .. } = engine.verdict().unwrap() else {
            panic!("expected plate verdict");
        };
        assert_eq!(severity, expected, "{correct}/10 misbanded");
    }
}

#[test]
fn acuity_ten_and_eight_needs_attention() {
    let (mut engine, _clock) = engine(AcuityPlan, 17);
    engine.begin().unwrap();
    engine.proceed().unwrap();

    for _ in 0..10 {
        answer(&mut engine, true);
    }
    engine.proceed().unwrap();
    for i in 0..10 {
        answer(&mut engine, i >= 2);
    }

    assert_eq!(engine.phase(), AcuityPhase::Results);
    let verdict = engine.verdict().unwrap();
    assert!(!verdict.is_perfect());
    let Verdict::Acuity { left, right } = verdict else {
        panic!("expected acuity verdict");
    };
    assert_eq!((left.eye, left.correct, left.total), (Eye::Left, 10, 10));
    assert_eq!((right.eye, right.correct, right.total), (Eye::Right, 8, 10));
}

#[test]
fn acuity_sessions_differ_across_seeds_but_replay_within_one() {
    let letters = |seed: u64| -> Vec<String> {
        let (mut engine, _clock) = engine(AcuityPlan, seed);
        engine.begin().unwrap();
        engine.proceed().unwrap();
        let mut out = Vec::new();
        for _ in 0..10 {
            out.push(engine.current_trial().unwrap().correct_value());
            answer(&mut engine, true);
        }
        out
    };

    assert_eq!(letters(5), letters(5));
    let base = letters(5);
    assert!((6..16).any(|seed| letters(seed) != base));
}

#[test]
fn mixed_timeouts_and_answers_fill_the_log_exactly_once() {
    let (mut engine, clock) = engine(PlatePlan, 3);
    engine.begin().unwrap();

    for i in 0..10 {
        if i % 3 == 0 {
            clock.advance(Duration::from_secs(10));
            assert!(engine.poll_deadline());
        } else {
            answer(&mut engine, true);
        }
    }

    assert_eq!(engine.phase(), PlatePhase::Results);
    let log = engine.responses();
    assert_eq!(log.len(), 10);
    let indices: Vec<usize> = log.iter().map(|r| r.trial_index).collect();
    assert_eq!(indices, (0..10).collect::<Vec<_>>());
    assert_eq!(log.iter().filter(|r| r.timed_out).count(), 4);
    assert!(log.iter().filter(|r| r.timed_out).all(|r| !r.correct));

    // 6 correct of 10.
    let Verdict::Plates { severity, correct, .. } = engine.verdict().unwrap() else {
        panic!("expected plate verdict");
    };
    assert_eq!(correct, 6);
    assert_eq!(severity, Severity::Significant);
}

#[test]
fn restart_after_results_yields_a_fresh_session() {
    let (mut engine, _clock) = engine(AcuityPlan, 8);
    engine.begin().unwrap();
    engine.proceed().unwrap();
    for _ in 0..10 {
        answer(&mut engine, true);
    }
    engine.proceed().unwrap();
    for _ in 0..10 {
        answer(&mut engine, false);
    }
    assert!(engine.verdict().is_ok());

    engine.reset();
    assert_eq!(engine.phase(), AcuityPhase::Instructions);
    assert!(engine.responses().is_empty());
    assert!(engine.verdict().is_err());

    engine.begin().unwrap();
    assert_eq!(engine.phase(), AcuityPhase::EyeInstruct(Eye::Left));
    assert!(engine.responses().is_empty());
}
