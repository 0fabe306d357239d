//! Attendance scan state machine.
//!
//! `Idle -> Scanning -> Submitting -> {Success, Duplicate, Error}`, back to
//! `Idle` through `reset`. A scanning session owns exactly one camera
//! subscription; the first accepted decode consumes it, so the camera is
//! never held once a submission starts.

use thiserror::Error;

use crate::api::{ApiError, AttendanceScanResult};

pub const DEFAULT_SCAN_ERROR: &str = "Código inválido o vencido";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Idle,
    Scanning,
    Submitting,
    Success,
    Duplicate,
    Error,
}

impl ScanStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ScanStatus::Success | ScanStatus::Duplicate | ScanStatus::Error
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanTransitionError {
    #[error("a camera subscription is already open")]
    AlreadySubscribed,
    #[error("the scanner must be idle to start")]
    NotIdle,
    #[error("a scan is already being submitted")]
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Awarded {
        delta: i64,
        total: u32,
        message: String,
        session_name: Option<String>,
    },
    Duplicate {
        message: String,
    },
    Failed {
        message: String,
    },
}

impl ScanOutcome {
    /// `previous` is the flower count known before the scan.
    pub fn from_response(previous: Option<u32>, result: &AttendanceScanResult) -> Self {
        if !result.added {
            return ScanOutcome::Duplicate {
                message: result.message.clone(),
            };
        }
        let delta = match previous {
            Some(previous) => i64::from(result.flowers) - i64::from(previous),
            None => 1,
        };
        ScanOutcome::Awarded {
            delta,
            total: result.flowers,
            message: result.message.clone(),
            session_name: result.session.as_ref().map(|session| session.name.clone()),
        }
    }

    pub fn from_error(error: &ApiError) -> Self {
        Self::failed(&error.message)
    }

    pub fn failed(message: &str) -> Self {
        let message = if message.trim().is_empty() {
            DEFAULT_SCAN_ERROR.to_string()
        } else {
            message.to_string()
        };
        ScanOutcome::Failed { message }
    }

    pub fn status(&self) -> ScanStatus {
        match self {
            ScanOutcome::Awarded { .. } => ScanStatus::Success,
            ScanOutcome::Duplicate { .. } => ScanStatus::Duplicate,
            ScanOutcome::Failed { .. } => ScanStatus::Error,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ScanOutcome::Awarded { message, .. }
            | ScanOutcome::Duplicate { message }
            | ScanOutcome::Failed { message } => message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMachine {
    status: ScanStatus,
    subscription: Option<SubscriptionId>,
    issued: u32,
    outcome: Option<ScanOutcome>,
}

impl Default for ScanMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanMachine {
    pub fn new() -> Self {
        Self {
            status: ScanStatus::Idle,
            subscription: None,
            issued: 0,
            outcome: None,
        }
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<&ScanOutcome> {
        self.outcome.as_ref()
    }

    pub fn holds_camera(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.status == ScanStatus::Submitting
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    /// Opens the single camera subscription for a new scanning session.
    pub fn begin(&mut self) -> Result<SubscriptionId, ScanTransitionError> {
        if self.subscription.is_some() {
            return Err(ScanTransitionError::AlreadySubscribed);
        }
        if self.status != ScanStatus::Idle {
            return Err(ScanTransitionError::NotIdle);
        }
        self.issued = self.issued.wrapping_add(1);
        let id = SubscriptionId(self.issued);
        self.subscription = Some(id);
        self.status = ScanStatus::Scanning;
        self.outcome = None;
        Ok(id)
    }

    /// Consumes the subscription on the first non-empty decode. Returns the
    /// code to submit, or `None` when the event is stale or empty.
    pub fn accept_decode(&mut self, id: SubscriptionId, code: &str) -> Option<String> {
        let code = code.trim();
        if code.is_empty() || self.subscription != Some(id) {
            return None;
        }
        self.subscription = None;
        self.status = ScanStatus::Submitting;
        Some(code.to_string())
    }

    /// PIN entry bypasses the camera entirely.
    pub fn begin_pin(&mut self) -> Result<(), ScanTransitionError> {
        match self.status {
            ScanStatus::Submitting => Err(ScanTransitionError::Busy),
            ScanStatus::Idle | ScanStatus::Scanning => {
                self.subscription = None;
                self.status = ScanStatus::Submitting;
                self.outcome = None;
                Ok(())
            }
            _ => Err(ScanTransitionError::NotIdle),
        }
    }

    /// Stops scanning. An in-flight submission is not aborted.
    pub fn cancel(&mut self) {
        self.subscription = None;
        if self.status == ScanStatus::Scanning {
            self.status = ScanStatus::Idle;
        }
    }

    /// Camera failures end the session; stale subscriptions are ignored.
    pub fn fail_camera(&mut self, id: SubscriptionId, message: &str) -> bool {
        if self.subscription != Some(id) {
            return false;
        }
        self.subscription = None;
        self.settle(ScanOutcome::failed(message));
        true
    }

    pub fn finish(&mut self, outcome: ScanOutcome) -> bool {
        if self.status != ScanStatus::Submitting {
            return false;
        }
        self.settle(outcome);
        true
    }

    pub fn reset(&mut self) {
        self.subscription = None;
        if self.status != ScanStatus::Submitting {
            self.status = ScanStatus::Idle;
            self.outcome = None;
        }
    }

    fn settle(&mut self, outcome: ScanOutcome) {
        self.status = outcome.status();
        self.outcome = Some(outcome);
    }
}
