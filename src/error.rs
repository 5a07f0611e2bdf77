//! Error types.
//!
//! - `ScalingError` is returned by the library (forward model, solvers, grid sweep).
//! - `AppError` is what the binary reports: a message plus a process exit code.

use thiserror::Error;

/// Why a bracketed root search gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootFailure {
    /// The residual has the same sign at both ends of the bracket.
    NoSignChange,
    /// The iteration cap was reached before the bracket shrank below tolerance.
    IterationLimit,
    /// The residual evaluated to NaN inside the bracket.
    NonFiniteResidual,
}

impl std::fmt::Display for RootFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RootFailure::NoSignChange => write!(f, "no sign change across the bracket"),
            RootFailure::IterationLimit => write!(f, "iteration limit reached"),
            RootFailure::NonFiniteResidual => write!(f, "residual is not a number"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalingError {
    #[error("Invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Root not found for {what} in [{lower:e}, {upper:e}]: {reason}")]
    RootNotFound {
        what: &'static str,
        lower: f64,
        upper: f64,
        reason: RootFailure,
    },

    #[error("Numeric overflow: {quantity} evaluated to {value}")]
    NumericOverflow { quantity: &'static str, value: f64 },
}

pub type ScalingResult<T> = Result<T, ScalingError>;

impl ScalingError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        ScalingError::InvalidParameter { name, value, reason }
    }
}

/// Require `value` to be finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> ScalingResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ScalingError::invalid(name, value, "must be finite and > 0"))
    }
}

/// Reject NaN and infinities coming out of the forward model.
pub(crate) fn require_finite(quantity: &'static str, value: f64) -> ScalingResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScalingError::NumericOverflow { quantity, value })
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ScalingError> for AppError {
    fn from(err: ScalingError) -> Self {
        let exit_code = match err {
            ScalingError::InvalidParameter { .. } => 2,
            ScalingError::RootNotFound { .. } | ScalingError::NumericOverflow { .. } => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
