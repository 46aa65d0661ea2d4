use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Spec failed distro validation: {reason}"))]
    Validation { reason: String },

    #[snafu(display("Spec has no target '{target}'"))]
    UnknownTarget { target: String },

    #[snafu(display("Failed to resolve sources: {source}"))]
    Resolve { source: dalec_source::Error },

    #[snafu(display("Failed to render deb packaging layout: {source}"))]
    Deb { source: dalec_deb::Error },

    #[snafu(display("Failed to render rpm packaging layout: {source}"))]
    Rpm { source: dalec_rpm::Error },

    #[snafu(display("Command invocation failed: {source}"))]
    Exec { source: dalec_exec::Error },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
