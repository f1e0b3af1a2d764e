use std::ops::Range;

use stepper_core::{ConfigError, ParseError, StepperConfig, StepperController};

use crate::edit::EditBuffer;
use crate::semantics::{Role, Semantics};

/// Width of the `-` and `+` hit targets at each end of the field, in dp.
pub const HIT_TARGET_WIDTH: f32 = 24.0;

/// The three horizontal parts of a stepper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment {
    DecrementButton,
    Value,
    IncrementButton,
}

impl Segment {
    /// The event a press on this segment sends.
    pub fn press_event(self) -> StepperEvent {
        match self {
            Segment::DecrementButton => StepperEvent::DecrementPressed,
            Segment::Value => StepperEvent::FocusGained,
            Segment::IncrementButton => StepperEvent::IncrementPressed,
        }
    }
}

/// Map a pointer `x` (relative to the control's left edge) to a segment.
pub fn segment_at(x: f32, width: f32) -> Option<Segment> {
    if !(0.0..=width).contains(&x) {
        return None;
    }
    if x < HIT_TARGET_WIDTH {
        Some(Segment::DecrementButton)
    } else if x > width - HIT_TARGET_WIDTH {
        Some(Segment::IncrementButton)
    } else {
        Some(Segment::Value)
    }
}

/// Input from the host, already decoded from its native events.
#[derive(Clone, Debug, PartialEq)]
pub enum StepperEvent {
    IncrementPressed,
    DecrementPressed,
    /// The text part took keyboard focus; an edit starts.
    FocusGained,
    Insert(String),
    Backspace,
    Delete,
    MoveCursor { delta: isize, extend: bool },
    SelectAll,
    /// Focus left or return was pressed.
    Commit,
    /// Escape was pressed.
    Cancel,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EventOutcome {
    /// Not applicable in the current state (disabled, or not editing).
    Ignored,
    /// A button press; `changed` tells whether the value moved.
    Stepped { changed: bool },
    /// The edit buffer took the keystroke.
    Accepted,
    /// The keystroke was dropped; the buffer is unchanged.
    Rejected(ParseError),
    Committed { changed: bool },
    /// The committed text was unusable; the field shows the last valid text.
    Reverted(ParseError),
    Cancelled { changed: bool },
}

/// Everything a host needs to draw one frame of the control.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    pub text: String,
    /// `text` is the placeholder, draw it dimmed.
    pub is_placeholder: bool,
    /// Byte range to highlight while editing.
    pub selection: Option<Range<usize>>,
    /// Fill of the range indicator, `None` to hide it.
    pub fraction: Option<f64>,
    pub increment_enabled: bool,
    pub decrement_enabled: bool,
    /// Disabled controls hide their buttons.
    pub buttons_hidden: bool,
    pub editable: bool,
    pub semantics: Semantics,
    /// One node per [`Segment`], left to right.
    pub parts: [Semantics; 3],
}

/// Imperative stepper binding: feed it events, read back a [`RenderState`].
#[derive(Debug)]
pub struct StepperView {
    controller: StepperController,
    buffer: EditBuffer,
    focused: bool,
    label: Option<String>,
}

impl StepperView {
    pub fn new(config: StepperConfig) -> Result<Self, ConfigError> {
        let controller = StepperController::new(config)?;
        let buffer = EditBuffer::with_text(controller.text());
        Ok(Self {
            controller,
            buffer,
            focused: false,
            label: Some("stepper".to_string()),
        })
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn controller(&self) -> &StepperController {
        &self.controller
    }

    /// Direct access for programmatic changes (range, formatter, value...).
    ///
    /// An edit in progress is not disturbed; it still commits or cancels
    /// against the controller's state at that time.
    pub fn controller_mut(&mut self) -> &mut StepperController {
        &mut self.controller
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn edit_buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn handle(&mut self, event: StepperEvent) -> EventOutcome {
        log::trace!("stepper view event: {event:?}");
        match event {
            StepperEvent::IncrementPressed => self.step(true),
            StepperEvent::DecrementPressed => self.step(false),
            StepperEvent::FocusGained => self.focus(),
            StepperEvent::Insert(text) => self.edit(|b| b.insert_text(&text)),
            StepperEvent::Backspace => self.edit(EditBuffer::delete_backward),
            StepperEvent::Delete => self.edit(EditBuffer::delete_forward),
            StepperEvent::MoveCursor { delta, extend } => {
                self.navigate(|b| b.move_cursor(delta, extend))
            }
            StepperEvent::SelectAll => self.navigate(EditBuffer::select_all),
            StepperEvent::Commit => self.commit(),
            StepperEvent::Cancel => self.cancel(),
        }
    }

    pub fn render_state(&self) -> RenderState {
        let c = &self.controller;
        let (text, is_placeholder) = if self.focused {
            (self.buffer.text().to_string(), false)
        } else {
            let shown = c.display_text();
            (shown.to_string(), c.value().is_none() && !shown.is_empty())
        };

        let value_text = match c.value() {
            Some(_) => Some(c.text().to_string()),
            None => c.placeholder().map(str::to_string),
        };

        let editable = c.is_enabled() && c.allows_keyboard_input();

        let mut semantics = Semantics::new(Role::Stepper);
        semantics.label = self.label.clone();
        semantics.value = value_text.clone();
        semantics.focused = self.focused;
        semantics.enabled = c.is_enabled();

        let button = |label: &str, enabled: bool| {
            let mut node = Semantics::new(Role::Button);
            node.label = Some(label.to_string());
            node.enabled = enabled;
            node
        };
        let mut field = Semantics::new(Role::TextField);
        field.label = self.label.clone();
        field.value = value_text;
        field.focused = self.focused;
        field.enabled = editable;

        RenderState {
            text,
            is_placeholder,
            selection: self.focused.then(|| self.buffer.selection()),
            fraction: c.fractional_position(),
            increment_enabled: c.can_increment(),
            decrement_enabled: c.can_decrement(),
            buttons_hidden: !c.is_enabled(),
            editable,
            semantics,
            parts: [
                button("Decrement", c.can_decrement()),
                field,
                button("Increment", c.can_increment()),
            ],
        }
    }

    fn step(&mut self, up: bool) -> EventOutcome {
        if !self.controller.is_enabled() {
            return EventOutcome::Ignored;
        }
        let changed = if up {
            self.controller.increment()
        } else {
            self.controller.decrement()
        };
        if self.focused {
            // the button wins over whatever was half-typed
            self.buffer.set_text(self.controller.text());
        }
        EventOutcome::Stepped { changed }
    }

    fn focus(&mut self) -> EventOutcome {
        let c = &self.controller;
        if self.focused || !c.is_enabled() || !c.allows_keyboard_input() {
            return EventOutcome::Ignored;
        }
        self.controller.begin_edit();
        self.buffer.set_text(self.controller.text());
        self.buffer.select_all();
        self.focused = true;
        EventOutcome::Accepted
    }

    fn edit(&mut self, op: impl FnOnce(&mut EditBuffer)) -> EventOutcome {
        if !self.focused {
            return EventOutcome::Ignored;
        }
        let mut candidate = self.buffer.clone();
        op(&mut candidate);

        if !is_transient(candidate.text()) {
            match self.controller.validate_candidate_text(candidate.text()) {
                Ok(_) => {}
                // "1" on the way to "15" in 10..=20; commit clamps if it stays short
                Err(ParseError::OutOfRange { value, min, max })
                    if can_grow_into_range(value, min, max) => {}
                Err(e) => {
                    log::debug!("stepper view: keystroke rejected: {e}");
                    return EventOutcome::Rejected(e);
                }
            }
        }
        self.buffer = candidate;
        EventOutcome::Accepted
    }

    fn navigate(&mut self, op: impl FnOnce(&mut EditBuffer)) -> EventOutcome {
        if !self.focused {
            return EventOutcome::Ignored;
        }
        op(&mut self.buffer);
        EventOutcome::Accepted
    }

    fn commit(&mut self) -> EventOutcome {
        if !self.focused {
            return EventOutcome::Ignored;
        }
        self.focused = false;
        let before = self.controller.value();
        let typed = self.buffer.text().to_string();
        let result = self.controller.end_edit(&typed);
        self.buffer.set_text(self.controller.text());
        match result {
            Ok(()) => EventOutcome::Committed {
                changed: before != self.controller.value(),
            },
            Err(e) => {
                log::debug!("stepper view: reverting {typed:?}: {e}");
                EventOutcome::Reverted(e)
            }
        }
    }

    fn cancel(&mut self) -> EventOutcome {
        if !self.focused {
            return EventOutcome::Ignored;
        }
        self.focused = false;
        let changed = self.controller.cancel_edit();
        self.buffer.set_text(self.controller.text());
        EventOutcome::Cancelled { changed }
    }
}

/// Half-typed text that can't be judged yet: empty, or a lone sign.
/// Committing decides what happens to it.
fn is_transient(text: &str) -> bool {
    matches!(text.trim(), "" | "-" | "+")
}

/// Whether appending digits to a number typed as `value` can still land
/// inside `min..=max`. More digits only move a number away from zero.
fn can_grow_into_range(value: f64, min: f64, max: f64) -> bool {
    if value >= 0.0 {
        value < max
    } else {
        value > min
    }
}
