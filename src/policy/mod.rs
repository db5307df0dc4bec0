//! Form Policies
//!
//! Caller-supplied validation configuration: schema, registry and loading.

pub mod loader;
pub mod registry;
pub mod schema;

pub use loader::{LoadedPolicy, PolicyLoader, PolicyPriority};
pub use registry::PolicyRegistry;
pub use schema::{
    FieldConstraints, FieldDef, FieldKind, FieldMessages, FormPolicy, PasswordPolicy, PolicyError,
};
