use thiserror::Error;

/// Invalid host-supplied configuration. The request is rejected and the
/// controller keeps its previous state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid range: minimum {min} must not exceed maximum {max}")]
    InvalidRange { min: f64, max: f64 },
    #[error("increment must be a positive finite number, got {0}")]
    InvalidIncrement(f64),
    #[error("initial value is empty but empty values are not allowed")]
    EmptyNotAllowed,
    #[error("initial value {0} is not a number")]
    InvalidValue(f64),
}

/// Text that could not become the stepper's value.
///
/// These are expected while the user types; the host decides whether to
/// drop the keystroke or revert to the last valid text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("the field cannot be empty")]
    EmptyNotAllowed,
    #[error("'{0}' is not a valid number")]
    InvalidFormat(String),
    #[error("{value} is outside the range {min}..={max}")]
    OutOfRange { value: f64, min: f64, max: f64 },
    #[error("keyboard input is disabled for this field")]
    NotEditable,
}
