use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to parse spec YAML: {source}"))]
    Parse { source: serde_yaml::Error },

    #[snafu(display("Spec is missing required field '{field}'"))]
    MissingRequiredField { field: &'static str },

    #[snafu(display(
        "Patch '{patch}' on source key '{key}' references unknown source '{referenced}'"
    ))]
    UnknownPatchSource {
        key: String,
        patch: String,
        referenced: String,
    },

    #[snafu(display("Source '{key}' must declare exactly one of docker_image, git, http, context, build, or inline; found {found}"))]
    AmbiguousSourceVariant { key: String, found: usize },

    #[snafu(display("Unknown variable '${{{name}}}' referenced in spec and no default was given"))]
    UnknownVariable { name: String },

    #[snafu(display("Failed to re-serialize spec during argument substitution: {source}"))]
    SubstituteEncode { source: serde_yaml::Error },

    #[snafu(display("Failed to rebuild spec after argument substitution: {source}"))]
    SubstituteDecode { source: serde_yaml::Error },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
