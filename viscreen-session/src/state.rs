use std::time::Duration;

use rand::Rng;
use tracing::debug;
use viscreen_core::{Phase, Response, Trial, Verdict};
use viscreen_timing::{Clock, DeadlineTimer};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::plan::ScreeningPlan;

/// Generic session state machine.
///
/// One engine drives both screening tests; the plan strategy supplies the
/// phase graph, the trial sequences, the timeout sentinel, and the
/// classifier. The engine owns all session state and mutates it only through
/// the transition methods below, on one logical thread.
pub struct SessionEngine<P: ScreeningPlan, C: Clock, R: Rng> {
    plan: P,
    config: SessionConfig,
    rng: R,
    phase: P::Phase,
    /// Every trial sequence for the session, drawn up front at `begin`.
    sequences: Vec<(P::Phase, Vec<Trial<P::Stim>>)>,
    next_sequence: usize,
    active_sequence: usize,
    trial_pointer: usize,
    responses: Vec<Response>,
    timer: DeadlineTimer<C>,
    /// Monotone across the engine's whole lifetime, resets included, so a
    /// callback from any earlier trial can never match the current one.
    trial_token: u64,
}

impl<P, C, R> SessionEngine<P, C, R>
where
    P: ScreeningPlan,
    C: Clock,
    R: Rng,
{
    pub fn new(
        plan: P,
        config: SessionConfig,
        clock: C,
        rng: R,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            plan,
            config,
            rng,
            phase: P::Phase::default(),
            sequences: Vec::new(),
            next_sequence: 0,
            active_sequence: 0,
            trial_pointer: 0,
            responses: Vec::new(),
            timer: DeadlineTimer::new(clock),
            trial_token: 0,
        })
    }

    /// Instructions -> first active phase. Draws every trial sequence for
    /// the session in one pass, so no randomness is left for later.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        if self.phase != P::Phase::default() {
            return Err(SessionError::InvalidTransition { action: "begin" });
        }
        self.sequences = self.plan.build_session(&self.config, &mut self.rng);
        self.next_sequence = 0;
        self.responses.clear();
        let next = self
            .phase
            .next()
            .ok_or(SessionError::InvalidTransition { action: "begin" })?;
        self.enter(next);
        Ok(())
    }

    /// Advance past an intermediate instruction screen (acuity eye
    /// switches).
    pub fn proceed(&mut self) -> Result<(), SessionError> {
        if self.phase == P::Phase::default() || !self.phase.awaits_proceed() {
            return Err(SessionError::InvalidTransition { action: "proceed" });
        }
        let next = self
            .phase
            .next()
            .ok_or(SessionError::InvalidTransition { action: "proceed" })?;
        self.enter(next);
        Ok(())
    }

    /// Record an explicit selection for the current trial. Outside a test
    /// phase this mutates nothing; callers recover by dropping the action.
    pub fn submit_answer(&mut self, value: &str) -> Result<(), SessionError> {
        if !self.phase.is_test() {
            return Err(SessionError::InvalidTransition {
                action: "submit_answer",
            });
        }
        self.timer.cancel();
        self.record(value.to_string(), false);
        Ok(())
    }

    /// Deadline callback. A token from any trial other than the current one
    /// is stale and ignored; the current token closes the trial with the
    /// plan's sentinel, scored incorrect.
    pub fn on_timeout(&mut self, token: u64) {
        if token != self.trial_token || !self.phase.is_test() {
            debug!(token, current = self.trial_token, "stale_timeout_ignored");
            return;
        }
        self.timer.cancel();
        self.record(self.plan.sentinel().to_string(), true);
    }

    /// Drive deadline expiry from the caller's event loop. Returns true when
    /// a trial was closed by timeout.
    pub fn poll_deadline(&mut self) -> bool {
        match self.timer.poll() {
            Some(token) => {
                self.on_timeout(token);
                true
            }
            None => false,
        }
    }

    /// Valid only in the results phase, once the log is complete.
    pub fn verdict(&self) -> Result<Verdict, SessionError> {
        if !self.phase.is_results() {
            return Err(SessionError::VerdictUnavailable);
        }
        Ok(self.plan.classify(&self.responses))
    }

    /// Back to instructions: log and pointer cleared, any pending deadline
    /// cancelled. Also the teardown path when the respondent navigates away.
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.phase = P::Phase::default();
        self.sequences.clear();
        self.next_sequence = 0;
        self.active_sequence = 0;
        self.trial_pointer = 0;
        self.responses.clear();
        debug!(plan = self.plan.name(), "session_reset");
    }

    pub fn phase(&self) -> P::Phase {
        self.phase
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn current_trial(&self) -> Option<&Trial<P::Stim>> {
        if !self.phase.is_test() {
            return None;
        }
        self.sequences
            .get(self.active_sequence)
            .and_then(|(_, trials)| trials.get(self.trial_pointer))
    }

    /// (current, total) within the active test phase.
    pub fn trial_progress(&self) -> Option<(usize, usize)> {
        if !self.phase.is_test() {
            return None;
        }
        self.sequences
            .get(self.active_sequence)
            .map(|(_, trials)| (self.trial_pointer + 1, trials.len()))
    }

    /// Time left on the current trial's deadline.
    pub fn deadline_remaining(&self) -> Option<Duration> {
        self.timer.remaining()
    }

    pub fn trial_token(&self) -> u64 {
        self.trial_token
    }

    fn enter(&mut self, phase: P::Phase) {
        self.phase = phase;
        debug!(plan = self.plan.name(), phase = ?phase, "phase_advanced");
        if phase.is_test() {
            let idx = self.next_sequence;
            debug_assert!(self.sequences[idx].0 == phase);
            self.active_sequence = idx;
            self.next_sequence += 1;
            self.trial_pointer = 0;
            if self.sequences[idx].1.is_empty() {
                if let Some(next) = phase.next() {
                    self.enter(next);
                }
                return;
            }
            self.start_trial();
        } else {
            self.timer.cancel();
            if phase.is_results() {
                let completed: usize = self.sequences[..self.next_sequence]
                    .iter()
                    .map(|(_, trials)| trials.len())
                    .sum();
                debug_assert_eq!(self.responses.len(), completed);
            }
        }
    }

    fn start_trial(&mut self) {
        // Arming replaces any prior deadline, so at most one countdown is
        // ever live and it always carries the fresh token.
        self.trial_token += 1;
        let deadline_secs = self.sequences[self.active_sequence].1[self.trial_pointer].deadline_secs;
        self.timer
            .arm(self.trial_token, Duration::from_secs(deadline_secs));
        debug!(
            token = self.trial_token,
            trial = self.trial_pointer,
            "trial_started"
        );
    }

    fn record(&mut self, chosen: String, timed_out: bool) {
        let (index, correct) = {
            let trial = &self.sequences[self.active_sequence].1[self.trial_pointer];
            (trial.index, !timed_out && chosen == trial.correct_value())
        };
        debug!(trial = index, correct, timed_out, "response_recorded");
        self.responses.push(Response {
            trial_index: index,
            eye: self.phase.active_eye(),
            chosen,
            correct,
            timed_out,
        });

        self.trial_pointer += 1;
        let remaining = self.sequences[self.active_sequence].1.len() - self.trial_pointer;
        if remaining > 0 {
            self.start_trial();
        } else if let Some(next) = self.phase.next() {
            self.enter(next);
        }
    }
}
