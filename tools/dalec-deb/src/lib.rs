//! Debian packaging layout synthesis (spec §4.3): renders the `debian/`
//! control tree for a validated spec and drives `dpkg-buildpackage` against it.

pub mod changelog;
pub mod control;
mod error;
pub mod install_files;
pub mod invoke;
pub mod layout;
pub mod patches;
pub mod rules;
pub mod sanitize;
pub mod scripts;
pub mod systemd;

pub use error::{Error, Result};
pub use layout::{render, DebianLayout};
