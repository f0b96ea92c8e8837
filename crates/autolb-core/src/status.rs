//! Call status codes and channel connectivity states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status code attached to a failed pick or a resolution error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Code {
    Ok,
    Cancelled,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    FailedPrecondition,
    Unavailable,
    Internal,
}

impl Code {
    pub fn as_str(self) -> &'static str {
        match self {
            Code::Ok => "OK",
            Code::Cancelled => "CANCELLED",
            Code::Unknown => "UNKNOWN",
            Code::InvalidArgument => "INVALID_ARGUMENT",
            Code::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Code::NotFound => "NOT_FOUND",
            Code::FailedPrecondition => "FAILED_PRECONDITION",
            Code::Unavailable => "UNAVAILABLE",
            Code::Internal => "INTERNAL",
        }
    }
}

/// A status code plus an optional human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub code: Code,
    pub description: Option<String>,
}

impl Status {
    pub const OK: Status = Status { code: Code::Ok, description: None };

    pub fn new(code: Code) -> Self {
        Self { code, description: None }
    }

    pub fn internal(description: impl Into<String>) -> Self {
        Self::new(Code::Internal).with_description(description)
    }

    pub fn unavailable(description: impl Into<String>) -> Self {
        Self::new(Code::Unavailable).with_description(description)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_ok(&self) -> bool {
        self.code == Code::Ok
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(d) => write!(f, "{}: {}", self.code.as_str(), d),
            None => f.write_str(self.code.as_str()),
        }
    }
}

/// Externally observable routing state of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectivityState {
    Idle,
    Connecting,
    Ready,
    TransientFailure,
    Shutdown,
}

/// Connectivity state of a single connection, with the failure status when
/// the state is `TransientFailure`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityStateInfo {
    pub state: ConnectivityState,
    pub status: Status,
}

impl ConnectivityStateInfo {
    pub fn for_non_error(state: ConnectivityState) -> Self {
        Self { state, status: Status::OK }
    }

    pub fn for_transient_failure(status: Status) -> Self {
        Self { state: ConnectivityState::TransientFailure, status }
    }
}
