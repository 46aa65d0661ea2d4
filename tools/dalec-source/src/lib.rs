//! Source resolution for Dalec: turning a spec's declared sources into build
//! nodes, running ecosystem generators, collecting patch application steps,
//! and the local capability to materialize inline and http content directly.

pub mod digest;
mod error;
pub mod fetch;
pub mod node;
pub mod resolver;
pub mod tar;

pub use error::{Error, Result};
pub use node::{SourceNode, SourceOp};
pub use resolver::{resolve, PatchStep, Resolved};
