#![allow(non_snake_case)]
//! Host glue for the stepper control.
//!
//! The toolkit decodes its native input into [`StepperEvent`]s, passes them
//! to [`StepperView::handle`], and draws whatever
//! [`StepperView::render_state`] returns. Value rules live in
//! `stepper-core`; nothing here clamps or formats.

pub mod edit;
pub mod semantics;
pub mod view;

pub use edit::EditBuffer;
pub use semantics::{Role, Semantics};
pub use view::{
    EventOutcome, HIT_TARGET_WIDTH, RenderState, Segment, StepperEvent, StepperView, segment_at,
};

use stepper_core::{ConfigError, StepperConfig};

/// Build a stepper view, the way widgets are built elsewhere in the toolkit.
pub fn Stepper(config: StepperConfig) -> Result<StepperView, ConfigError> {
    StepperView::new(config)
}
