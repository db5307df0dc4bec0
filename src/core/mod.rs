//! Core Data Model
//!
//! Form values, validation errors and attendance records shared by the
//! validators, the statistics helpers and the form controller.

pub mod attendance;
pub mod errors;
pub mod values;

pub use attendance::AttendanceRecord;
pub use errors::{ErrorKind, ErrorMap, FieldError, SubmitError};
pub use values::FormValues;
