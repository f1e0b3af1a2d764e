use std::fmt;
use std::rc::Rc;

use crate::clamp::{ClampedValue, clamp};
use crate::config::{StepperConfig, StepperFlags, validate_increment, validate_range};
use crate::error::{ConfigError, ParseError};
use crate::format::NumberFormat;
use crate::signal::{Signal, Subscription, ValuePublisher};

/// Single-slot observer told about every effective value change.
pub trait StepperDelegate {
    fn value_changed(&mut self, value: Option<f64>);
}

impl<F: FnMut(Option<f64>)> StepperDelegate for F {
    fn value_changed(&mut self, value: Option<f64>) {
        self(value)
    }
}

/// Owns a stepper's value and keeps it inside its range.
///
/// All mutation goes through this type. After any call that changes the
/// value, observers are told in a fixed order before the call returns:
/// the delegate first, then publisher subscribers. Both read
/// [`value`](Self::value) and the publisher as already updated.
pub struct StepperController {
    value: Option<f64>,
    min: f64,
    max: f64,
    increment: f64,
    flags: StepperFlags,
    placeholder: Option<String>,
    formatter: Rc<dyn NumberFormat>,
    text: String,
    last_non_empty: f64,
    before_edit: Option<Option<f64>>,
    delegate: Option<Box<dyn StepperDelegate>>,
    published: Signal<Option<f64>>,
}

impl StepperController {
    pub fn new(config: StepperConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let value = config.initial_value.map(|v| clamp(v, config.min, config.max));
        let mut controller = Self {
            value,
            min: config.min,
            max: config.max,
            increment: config.increment,
            flags: config.flags,
            placeholder: config.placeholder,
            formatter: config.formatter,
            text: String::new(),
            last_non_empty: value.unwrap_or(0.0),
            before_edit: None,
            delegate: None,
            published: Signal::new(value),
        };
        controller.render_text();
        Ok(controller)
    }

    // ---- reading ----

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// The formatted value, empty when there is no value.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text to show in the field: the value, or the placeholder while empty.
    pub fn display_text(&self) -> &str {
        match (&self.value, &self.placeholder) {
            (None, Some(placeholder)) if self.allows_empty() => placeholder,
            _ => &self.text,
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn minimum(&self) -> f64 {
        self.min
    }

    pub fn maximum(&self) -> f64 {
        self.max
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn increment_step(&self) -> f64 {
        self.increment
    }

    pub fn flags(&self) -> StepperFlags {
        self.flags
    }

    pub fn is_enabled(&self) -> bool {
        self.flags.contains(StepperFlags::ENABLED)
    }

    pub fn allows_empty(&self) -> bool {
        self.flags.contains(StepperFlags::ALLOWS_EMPTY)
    }

    pub fn allows_keyboard_input(&self) -> bool {
        self.flags.contains(StepperFlags::KEYBOARD_INPUT)
    }

    pub fn formatter(&self) -> Rc<dyn NumberFormat> {
        self.formatter.clone()
    }

    pub fn is_editing(&self) -> bool {
        self.before_edit.is_some()
    }

    /// Where the value sits inside its bounds, `0.0..=1.0`.
    ///
    /// `None` means "draw no indicator": the value is empty, a bound is the
    /// unbounded default, or the range has no width.
    pub fn fractional_position(&self) -> Option<f64> {
        let value = self.value?;
        if !self.is_bounded() {
            return None;
        }
        let span = self.max - self.min;
        if !span.is_finite() || span <= 0.0 {
            return None;
        }
        Some((value - self.min) / span)
    }

    pub fn is_bounded(&self) -> bool {
        self.min != f64::MIN
            && self.max != f64::MAX
            && self.min.is_finite()
            && self.max.is_finite()
    }

    pub fn can_increment(&self) -> bool {
        self.is_enabled() && self.value.is_none_or(|v| v < self.max)
    }

    pub fn can_decrement(&self) -> bool {
        self.is_enabled() && self.value.is_none_or(|v| v > self.min)
    }

    // ---- observers ----

    pub fn set_delegate(&mut self, delegate: impl StepperDelegate + 'static) {
        self.delegate = Some(Box::new(delegate));
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// Read-only stream of the current value, for any number of observers.
    pub fn publisher(&self) -> ValuePublisher<Option<f64>> {
        self.published.publisher()
    }

    pub fn subscribe(&self, f: impl Fn(&Option<f64>) + 'static) -> Subscription<Option<f64>> {
        self.published.subscribe(f)
    }

    // ---- value ----

    /// Store `candidate`, clamped into range.
    ///
    /// Returns whether the stored value changed (and observers were told).
    /// An empty candidate is refused when empties aren't allowed, as is NaN.
    pub fn set_value(&mut self, candidate: Option<f64>) -> bool {
        let next = match candidate {
            None if !self.allows_empty() => {
                log::warn!("stepper: ignoring empty value, empty values are not allowed");
                return false;
            }
            None => None,
            Some(v) if v.is_nan() => {
                log::warn!("stepper: ignoring NaN value");
                return false;
            }
            Some(v) => Some(clamp(v, self.min, self.max)),
        };
        self.store(next)
    }

    pub fn increment(&mut self) -> bool {
        self.step_by(self.increment)
    }

    pub fn decrement(&mut self) -> bool {
        self.step_by(-self.increment)
    }

    fn step_by(&mut self, delta: f64) -> bool {
        if !self.is_enabled() {
            log::debug!("stepper: step ignored while disabled");
            return false;
        }
        // an empty field resumes from the last value it held
        let base = self.value.unwrap_or(self.last_non_empty);
        self.set_value(Some(base + delta))
    }

    // ---- configuration ----

    pub fn set_range(&mut self, min: f64, max: f64) -> Result<(), ConfigError> {
        validate_range(min, max)?;
        self.min = min;
        self.max = max;
        match self.value {
            Some(v) => {
                self.store(Some(clamp(v, min, max)));
            }
            None => self.render_text(),
        }
        Ok(())
    }

    pub fn set_minimum(&mut self, min: f64) -> Result<(), ConfigError> {
        self.set_range(min, self.max)
    }

    pub fn set_maximum(&mut self, max: f64) -> Result<(), ConfigError> {
        self.set_range(self.min, max)
    }

    pub fn set_increment(&mut self, step: f64) -> Result<(), ConfigError> {
        validate_increment(step)?;
        self.increment = step;
        Ok(())
    }

    /// Swap the formatter. The value is untouched; only its text changes.
    pub fn set_formatter(&mut self, formatter: Rc<dyn NumberFormat>) {
        self.formatter = formatter;
        self.render_text();
    }

    /// Disallowing empties while empty restores the last value the field held.
    pub fn set_allows_empty(&mut self, allows: bool) {
        self.flags.set(StepperFlags::ALLOWS_EMPTY, allows);
        if !allows && self.value.is_none() {
            let restored = clamp(self.last_non_empty, self.min, self.max);
            self.store(Some(restored));
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.flags.set(StepperFlags::ENABLED, enabled);
    }

    pub fn set_allows_keyboard_input(&mut self, allows: bool) {
        self.flags.set(StepperFlags::KEYBOARD_INPUT, allows);
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.placeholder = placeholder;
    }

    // ---- text ----

    /// Check typed text without changing anything.
    ///
    /// Used to gate keystrokes: unlike [`commit_text`](Self::commit_text),
    /// a number outside the range is an error here.
    pub fn validate_candidate_text(&self, input: &str) -> Result<Option<f64>, ParseError> {
        if !self.allows_keyboard_input() {
            return Err(ParseError::NotEditable);
        }
        let parsed = self.parse_candidate(input)?;
        if let Some(v) = parsed
            && ClampedValue::new(v, self.min, self.max).was_clamped()
        {
            return Err(ParseError::OutOfRange {
                value: v,
                min: self.min,
                max: self.max,
            });
        }
        Ok(parsed)
    }

    /// Finish an edit: parse `input`, clamp it into range and store it.
    ///
    /// On error nothing changes and [`text`](Self::text) still holds the last
    /// valid rendering for the host to put back.
    pub fn commit_text(&mut self, input: &str) -> Result<(), ParseError> {
        if !self.allows_keyboard_input() {
            return Err(ParseError::NotEditable);
        }
        let parsed = self.parse_candidate(input).inspect_err(|e| {
            log::debug!("stepper: rejected committed text {input:?}: {e}");
        })?;
        self.set_value(parsed);
        Ok(())
    }

    /// Same as [`commit_text`](Self::commit_text).
    pub fn set_text(&mut self, input: &str) -> Result<(), ParseError> {
        self.commit_text(input)
    }

    /// Remember the value at the start of a text edit so it can be restored.
    pub fn begin_edit(&mut self) {
        self.before_edit = Some(self.value);
    }

    /// Abandon the current edit, restoring the value it started with.
    pub fn cancel_edit(&mut self) -> bool {
        match self.before_edit.take() {
            Some(previous) => self.set_value(previous),
            None => false,
        }
    }

    pub fn end_edit(&mut self, input: &str) -> Result<(), ParseError> {
        self.before_edit = None;
        self.commit_text(input)
    }

    fn parse_candidate(&self, input: &str) -> Result<Option<f64>, ParseError> {
        if input.trim().is_empty() {
            return if self.allows_empty() {
                Ok(None)
            } else {
                Err(ParseError::EmptyNotAllowed)
            };
        }
        self.formatter
            .parse(input)
            .map(Some)
            .ok_or_else(|| ParseError::InvalidFormat(input.to_string()))
    }

    // ---- internals ----

    fn store(&mut self, next: Option<f64>) -> bool {
        if let Some(v) = next {
            debug_assert!(
                self.min <= v && v <= self.max,
                "stepper value {v} escaped {}..={}",
                self.min,
                self.max
            );
            self.last_non_empty = v;
        }
        debug_assert!(next.is_some() || self.allows_empty());

        let previous = self.value;
        self.value = next;
        self.render_text();

        if previous == next {
            return false;
        }
        log::debug!("stepper: value {previous:?} -> {next:?}");
        self.notify();
        true
    }

    fn notify(&mut self) {
        let value = self.value;
        // readers of the publisher must see the new value from the first callback on
        self.published.store(value);
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.value_changed(value);
        }
        self.published.notify();
    }

    fn render_text(&mut self) {
        self.text = match self.value {
            Some(v) => self.formatter.format(v),
            None => String::new(),
        };
    }
}

impl fmt::Debug for StepperController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepperController")
            .field("value", &self.value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("increment", &self.increment)
            .field("flags", &self.flags)
            .field("text", &self.text)
            .field("editing", &self.is_editing())
            .finish_non_exhaustive()
    }
}
