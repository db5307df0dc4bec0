//! Form State
//!
//! Field values, errors and the submit lifecycle of one form instance.

pub mod collaborator;
pub mod controller;

pub use collaborator::SubmitCollaborator;
pub use controller::{FormController, SubmitOutcome, SubmitState};
