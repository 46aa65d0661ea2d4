//! External command invocation for Dalec: a resolved-once [`cli::CommandLine`]
//! wrapper, a [`retry::RetryPolicy`] for known-transient `docker build`
//! failures, and the `--build-arg`/`--secret` argument-vector helpers.

pub mod args;
pub mod cli;
mod error;
pub mod retry;

pub use cli::CommandLine;
pub use error::{Error, Result};
pub use retry::RetryPolicy;

use rand::Rng;

/// A value to pass as `NOCACHE` so a build step can bust a docker layer
/// cache it would otherwise reuse (spec §5 "each build runs in its own
/// isolated, ephemeral working tree").
pub fn nocache_token() -> String {
    rand::thread_rng().gen::<u32>().to_string()
}
