use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

use crate::error::ConfigError;
use crate::format::{DecimalFormat, NumberFormat};

bitflags! {
    /// Boolean switches of a stepper control.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct StepperFlags: u8 {
        const ENABLED        = 0b0001;
        const ALLOWS_EMPTY   = 0b0010;
        const KEYBOARD_INPUT = 0b0100;
    }
}

impl Default for StepperFlags {
    fn default() -> Self {
        StepperFlags::ENABLED | StepperFlags::ALLOWS_EMPTY | StepperFlags::KEYBOARD_INPUT
    }
}

/// Construction settings for a [`StepperController`](crate::StepperController).
///
/// Builder style, in the same spirit as composing a `Modifier`:
///
/// ```rust
/// use stepper_core::StepperConfig;
///
/// let cfg = StepperConfig::new()
///     .range(0.0, 100.0)
///     .increment(5.0)
///     .initial_value(Some(25.0))
///     .allows_empty(false);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct StepperConfig {
    pub min: f64,
    pub max: f64,
    pub increment: f64,
    pub initial_value: Option<f64>,
    pub flags: StepperFlags,
    pub placeholder: Option<String>,
    pub formatter: Rc<dyn NumberFormat>,
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            min: f64::MIN,
            max: f64::MAX,
            increment: 1.0,
            initial_value: None,
            flags: StepperFlags::default(),
            placeholder: None,
            formatter: Rc::new(DecimalFormat::default()),
        }
    }
}

impl fmt::Debug for StepperConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepperConfig")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("increment", &self.increment)
            .field("initial_value", &self.initial_value)
            .field("flags", &self.flags)
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}

impl StepperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn increment(mut self, step: f64) -> Self {
        self.increment = step;
        self
    }

    pub fn initial_value(mut self, value: Option<f64>) -> Self {
        self.initial_value = value;
        self
    }

    pub fn allows_empty(mut self, allows: bool) -> Self {
        self.flags.set(StepperFlags::ALLOWS_EMPTY, allows);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.flags.set(StepperFlags::ENABLED, enabled);
        self
    }

    pub fn allows_keyboard_input(mut self, allows: bool) -> Self {
        self.flags.set(StepperFlags::KEYBOARD_INPUT, allows);
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    pub fn formatter(mut self, formatter: Rc<dyn NumberFormat>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_range(self.min, self.max)?;
        validate_increment(self.increment)?;
        if self.initial_value.is_none() && !self.flags.contains(StepperFlags::ALLOWS_EMPTY) {
            return Err(ConfigError::EmptyNotAllowed);
        }
        if let Some(v) = self.initial_value
            && v.is_nan()
        {
            return Err(ConfigError::InvalidValue(v));
        }
        Ok(())
    }
}

pub(crate) fn validate_range(min: f64, max: f64) -> Result<(), ConfigError> {
    // NaN fails the comparison as well
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { min, max })
    }
}

pub(crate) fn validate_increment(step: f64) -> Result<(), ConfigError> {
    if step.is_finite() && step > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidIncrement(step))
    }
}
