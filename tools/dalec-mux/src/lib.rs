//! Target dispatch multiplexer (spec §4.6): routes a `{subtarget}/{target}`
//! request string to a registered handler.

mod error;
mod registry;

pub use error::{Error, Result};
pub use registry::{Descriptor, Dispatch, Registry};
