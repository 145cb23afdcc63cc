//! Transport-agnostic session state — the interaction controller.
//!
//! One assessment session at a time: Idle -> Loading -> Settled, back to
//! Idle on clear. Settled holds a two-variant outcome, so a result and an
//! error can never be populated simultaneously.

use std::sync::Mutex;

use crate::models::RiskAssessment;
use crate::prediction::PREDICTION_FAILED_MESSAGE;

/// Observable session lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum AssessmentSession {
    /// No result, no error. Initial state; the form is shown.
    Idle,
    /// One prediction request is in flight.
    Loading,
    /// Exactly one of {assessment, error message}.
    Settled(SessionOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Assessed(RiskAssessment),
    /// Carries the fixed user-facing message, independent of cause.
    Failed(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("session lock poisoned")]
    LockPoisoned,

    #[error("an assessment request is already in flight")]
    RequestInFlight,
}

/// Global application state: the single current session behind a mutex.
/// There is no concurrent writer beyond the one in-flight request.
pub struct CoreState {
    session: Mutex<AssessmentSession>,
}

impl CoreState {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(AssessmentSession::Idle),
        }
    }

    /// Start a new request: Idle/Settled -> Loading, discarding any prior
    /// outcome. Rejected while a request is already in flight — a
    /// concurrent submit neither queues nor cancels.
    pub fn begin(&self) -> Result<(), CoreError> {
        let mut session = self.session.lock().map_err(|_| CoreError::LockPoisoned)?;
        if *session == AssessmentSession::Loading {
            return Err(CoreError::RequestInFlight);
        }
        *session = AssessmentSession::Loading;
        Ok(())
    }

    /// Loading -> Settled with a result.
    ///
    /// If the session already moved on (teardown, clear), the late result
    /// is discarded rather than resurrecting a dead request.
    pub fn settle_ok(&self, assessment: RiskAssessment) {
        self.settle(SessionOutcome::Assessed(assessment));
    }

    /// Loading -> Settled with the fixed failure message.
    pub fn settle_failed(&self) {
        self.settle(SessionOutcome::Failed(PREDICTION_FAILED_MESSAGE.to_string()));
    }

    fn settle(&self, outcome: SessionOutcome) {
        let Ok(mut session) = self.session.lock() else {
            return;
        };
        if *session != AssessmentSession::Loading {
            tracing::debug!("discarding settle for a session that already moved on");
            return;
        }
        *session = AssessmentSession::Settled(outcome);
    }

    /// Settled -> Idle, discarding the outcome. A clear from Idle is a
    /// harmless no-op; a clear while Loading is rejected.
    pub fn clear(&self) -> Result<(), CoreError> {
        let mut session = self.session.lock().map_err(|_| CoreError::LockPoisoned)?;
        if *session == AssessmentSession::Loading {
            return Err(CoreError::RequestInFlight);
        }
        *session = AssessmentSession::Idle;
        Ok(())
    }

    /// Observable copy of the current session.
    pub fn snapshot(&self) -> Result<AssessmentSession, CoreError> {
        self.session
            .lock()
            .map(|session| session.clone())
            .map_err(|_| CoreError::LockPoisoned)
    }
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}
