//! SIAPU form core
//!
//! Validation and derived-state logic for the SIAPU tutoring platform forms.
//!
//! This library provides:
//! - Field validators and whole-form validation driven by policies
//! - Derived statistics (attendance, countdowns, password strength)
//! - Calendar month arithmetic and date display helpers
//! - A form controller with a submit lifecycle
//! - Attendance sessions driven by a one-second ticker
//! - TOML policy loading and a small validation CLI

pub mod calendar;
pub mod cli;
pub mod config;
pub mod core;
pub mod form;
pub mod forms;
pub mod policy;
pub mod session;
pub mod stats;
pub mod validation;

// Re-exports for a compact public API
pub use config::Config;
pub use core::{AttendanceRecord, ErrorKind, ErrorMap, FieldError, FormValues, SubmitError};
pub use form::{FormController, SubmitCollaborator, SubmitOutcome, SubmitState};
pub use policy::{FormPolicy, PasswordPolicy, PolicyRegistry};
pub use session::{AttendanceSession, SessionEvent, SessionStatus, Ticker};
pub use validation::{validate_form, ValidationContext};
