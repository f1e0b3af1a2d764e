//! # Stepper value controller
//!
//! A stepper is a numeric text field with `-`/`+` buttons. This crate holds
//! everything about it that isn't drawing: the bounded value with its text,
//! and who gets told when it changes. There are four pieces:
//!
//! - [`StepperController`] owns the value and keeps it in range.
//! - [`NumberFormat`] turns the value into text and back
//!   ([`DecimalFormat`] is the default).
//! - [`Signal`] / [`ValuePublisher`]: an observable value with ordered,
//!   synchronous delivery and [`Subscription`] teardown.
//! - [`StepperConfig`] is what the host passes in at construction.
//!
//! ## Stepping
//!
//! ```rust
//! use stepper_core::*;
//!
//! let mut stepper = StepperController::new(
//!     StepperConfig::new()
//!         .range(0.0, 10.0)
//!         .initial_value(Some(9.0))
//!         .allows_empty(false),
//! )?;
//!
//! assert!(stepper.increment());
//! assert_eq!(stepper.value(), Some(10.0));
//! assert!(!stepper.can_increment());
//! assert!(!stepper.increment()); // already at the top, nothing fires
//! assert_eq!(stepper.text(), "10");
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! ## Text
//!
//! Keystrokes are gated with `validate_candidate_text`, which rejects
//! numbers outside the range. Finished edits go through `commit_text`,
//! which clamps them instead:
//!
//! ```rust
//! use stepper_core::*;
//!
//! let mut stepper = StepperController::new(StepperConfig::new().range(0.0, 100.0))?;
//!
//! assert!(matches!(
//!     stepper.validate_candidate_text("250"),
//!     Err(ParseError::OutOfRange { .. })
//! ));
//! stepper.commit_text("250").unwrap();
//! assert_eq!(stepper.value(), Some(100.0));
//!
//! stepper.commit_text("").unwrap(); // empties are allowed by default
//! assert_eq!(stepper.value(), None);
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! ## Observing
//!
//! One delegate plus any number of publisher subscribers:
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use stepper_core::*;
//!
//! let mut stepper = StepperController::new(StepperConfig::new().initial_value(Some(1.0)))?;
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let sub = stepper.subscribe({
//!     let seen = seen.clone();
//!     move |v| seen.borrow_mut().push(*v)
//! });
//! stepper.increment();
//! sub.unsubscribe();
//! stepper.increment();
//!
//! assert_eq!(*seen.borrow(), vec![Some(2.0)]);
//! # Ok::<(), ConfigError>(())
//! ```
//!
//! Everything is single threaded: the host calls in from its UI thread and
//! notifications are delivered before each call returns.

pub mod clamp;
pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod format;
pub mod signal;
pub mod tests;

pub use clamp::*;
pub use config::*;
pub use controller::*;
pub use effects::*;
pub use error::*;
pub use format::*;
pub use signal::*;
