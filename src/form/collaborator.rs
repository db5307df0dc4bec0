//! Submit Collaborator
//!
//! The external operation (login, registration, password reset...) invoked
//! once a form validates. It resolves exactly once.

use std::future::Future;

use crate::core::FormValues;

pub trait SubmitCollaborator {
    fn submit(&self, values: FormValues) -> impl Future<Output = Result<(), String>>;
}

impl<F, Fut> SubmitCollaborator for F
where
    F: Fn(FormValues) -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    fn submit(&self, values: FormValues) -> impl Future<Output = Result<(), String>> {
        (self)(values)
    }
}
