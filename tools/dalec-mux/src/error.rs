use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Unknown target '{target}'"))]
    UnknownTarget { target: String },

    #[snafu(display("Subtarget '{name}' is already registered"))]
    DuplicateSubtarget { name: String },

    #[snafu(display("More than one registered descriptor is marked default"))]
    MultipleDefaults,

    #[snafu(display("No default subtarget is registered"))]
    NoDefault,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
