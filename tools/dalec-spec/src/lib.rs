//! The Dalec spec data model: YAML deserialization, required-field
//! validation, target-scoped inheritance, and `${VAR}` build-arg
//! substitution.
//!
//! Downstream crates (`dalec-source`, `dalec-deb`, `dalec-rpm`,
//! `dalec-distro`, `dalec-mux`) consume a validated [`Spec`] and never parse
//! YAML themselves.

pub mod artifact;
pub mod build;
pub mod changelog;
pub mod deps;
mod error;
pub mod image;
pub mod source;
mod spec;
pub mod test_step;
pub mod version;

pub use error::{Error, Result};
pub use spec::{Spec, TargetOverride};
