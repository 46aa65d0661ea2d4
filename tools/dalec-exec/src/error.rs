use snafu::Snafu;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("'{name}' was not found on the search path"))]
    NotFound {
        name: String,
        source: which::Error,
    },

    #[snafu(display("Failed to start command '{program}': {source}"))]
    CommandStart {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("Command '{program} {args}' failed:\n{stdout}"))]
    CommandFailed {
        program: String,
        args: String,
        stdout: String,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
