//! The distro capability abstraction (spec §4.5): `DistroConfig` plus the
//! Debian-family and RPM-family installer plumbing it shares across plugins.

pub mod config;
pub mod distros;
mod error;
pub mod installer;
pub mod types;

pub use config::DistroConfig;
pub use error::{Error, Result};
pub use types::{BuiltPackage, ContainerRef, Family, TestOutcome, WorkerImage};
