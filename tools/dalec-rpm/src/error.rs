use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to resolve sources: {source}"))]
    Resolve { source: dalec_source::Error },

    #[snafu(display("Failed to materialize source '{key}': {source}"))]
    Materialize { key: String, source: dalec_source::Error },

    #[snafu(display("Failed to invoke rpmbuild: {source}"))]
    Invoke { source: dalec_exec::Error },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
