//! Form Controller
//!
//! Holds the values and errors of a form and drives
//! Idle → Validating → Submitting → Succeeded/Failed.

use chrono::NaiveDate;

use super::collaborator::SubmitCollaborator;
use crate::core::{ErrorMap, FormValues, SubmitError};
use crate::policy::FormPolicy;
use crate::validation::validate_form;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// What a call to [`FormController::submit`] did
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; see [`FormController::errors`]
    Invalid,
    /// Values ready for the submit collaborator
    Ready(FormValues),
    /// A submission is already in flight
    Ignored,
}

#[derive(Debug, Clone)]
pub struct FormController {
    policy: FormPolicy,
    defaults: FormValues,
    values: FormValues,
    errors: ErrorMap,
    state: SubmitState,
    submit_error: Option<SubmitError>,
    submit_count: u32,
    today: NaiveDate,
}

impl FormController {
    /// Create a controller in `Idle` with the given default values
    pub fn new(policy: FormPolicy, defaults: FormValues) -> Self {
        Self {
            policy,
            values: defaults.clone(),
            defaults,
            errors: ErrorMap::new(),
            state: SubmitState::Idle,
            submit_error: None,
            submit_count: 0,
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Fix the date used for age checks
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn policy(&self) -> &FormPolicy {
        &self.policy
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.value(name)
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&SubmitError> {
        self.submit_error.as_ref()
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// Set a field value and drop its pending error
    ///
    /// Errors are not recomputed here; that only happens on submit.
    /// Returns false while a submission is in flight.
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        if self.is_submitting() {
            log::debug!(
                "form '{}': ignoring edit of '{}' while submitting",
                self.policy.name,
                name
            );
            return false;
        }

        self.values.set(name, value);
        self.errors.remove(name);
        true
    }

    /// Validate and, when clean, move to `Submitting`
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_submitting() {
            log::debug!(
                "form '{}': submit ignored, a submission is in flight",
                self.policy.name
            );
            return SubmitOutcome::Ignored;
        }

        self.transition(SubmitState::Validating);
        self.submit_error = None;
        self.submit_count += 1;
        self.errors = validate_form(&self.values, &self.policy, self.today);

        if !self.errors.is_empty() {
            log::debug!(
                "form '{}': {} invalid field(s)",
                self.policy.name,
                self.errors.len()
            );
            self.transition(SubmitState::Failed);
            return SubmitOutcome::Invalid;
        }

        self.transition(SubmitState::Submitting);
        SubmitOutcome::Ready(self.values.clone())
    }

    /// Record the collaborator's result for the in-flight submission
    pub fn settle(&mut self, result: Result<(), String>) -> SubmitState {
        if !self.is_submitting() {
            log::warn!(
                "form '{}': result received in state {:?}, ignoring",
                self.policy.name,
                self.state
            );
            return self.state;
        }

        match result {
            Ok(()) => {
                self.values = self.defaults.clone();
                self.errors.clear();
                self.transition(SubmitState::Succeeded);
            }
            Err(message) => {
                log::info!("form '{}': submit failed: {}", self.policy.name, message);
                self.submit_error = Some(SubmitError::ExternalSubmitFailure(message));
                self.transition(SubmitState::Failed);
            }
        }
        self.state
    }

    /// Run a full submission against `collaborator`
    pub async fn submit_with<C>(&mut self, collaborator: &C) -> SubmitState
    where
        C: SubmitCollaborator,
    {
        match self.submit() {
            SubmitOutcome::Ready(values) => {
                let result = collaborator.submit(values).await;
                self.settle(result)
            }
            SubmitOutcome::Invalid | SubmitOutcome::Ignored => self.state,
        }
    }

    fn transition(&mut self, next: SubmitState) {
        log::debug!(
            "form '{}': {:?} -> {:?}",
            self.policy.name,
            self.state,
            next
        );
        self.state = next;
    }
}
