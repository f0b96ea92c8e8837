//! Shared error type across autolb crates.

use thiserror::Error;

/// Stable error codes for logs and metrics labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Required policy is not registered.
    PolicyNotFound,
    /// No eligible policy for a resolution update.
    Selection,
    /// Upstream handed over an attribute it must not set.
    UnexpectedAttribute,
    /// Service config has the wrong shape.
    InvalidServiceConfig,
    /// Static configuration is invalid.
    Config,
    /// Unsupported configuration version.
    UnsupportedVersion,
}

impl ErrorCode {
    /// String representation used in logs and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::PolicyNotFound => "POLICY_NOT_FOUND",
            ErrorCode::Selection => "SELECTION",
            ErrorCode::UnexpectedAttribute => "UNEXPECTED_ATTRIBUTE",
            ErrorCode::InvalidServiceConfig => "INVALID_SERVICE_CONFIG",
            ErrorCode::Config => "CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, LbError>;

/// Unified error type used by core and balancer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LbError {
    #[error(
        "Could not find policy '{0}'. Make sure its implementation is registered to the LoadBalancerRegistry."
    )]
    PolicyNotFound(String),
    #[error("{0}")]
    Selection(String),
    #[error("Unexpected {key} from upstream: {value}")]
    UnexpectedAttribute { key: &'static str, value: String },
    #[error("invalid service config: {0}")]
    InvalidServiceConfig(String),
    #[error("config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
}

impl LbError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            LbError::PolicyNotFound(_) => ErrorCode::PolicyNotFound,
            LbError::Selection(_) => ErrorCode::Selection,
            LbError::UnexpectedAttribute { .. } => ErrorCode::UnexpectedAttribute,
            LbError::InvalidServiceConfig(_) => ErrorCode::InvalidServiceConfig,
            LbError::Config(_) => ErrorCode::Config,
            LbError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
        }
    }
}
