//! Validation
//!
//! Single-field validators, the policy-driven form engine and input
//! formatting helpers.

pub mod engine;
pub mod format;
pub mod rules;

pub use engine::{rule_for, validate_field, validate_form, ValidationContext, ValidationRule};
pub use format::{format_date_input, format_phone_number};
pub use rules::{
    validate_confirmation, validate_date, validate_domain_restricted_email, validate_email,
    validate_password, validate_phone, validate_required_text, PasswordRule,
};
