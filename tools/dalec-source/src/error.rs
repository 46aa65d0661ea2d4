use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Source '{key}' references unresolvable variant: {source}"))]
    Variant { key: String, source: dalec_spec::Error },

    #[snafu(display("Failed to build tar entry for '{path}': {source}"))]
    TarAppend { path: String, source: std::io::Error },

    #[snafu(display("Failed to finish tar archive for source '{key}': {source}"))]
    TarFinish { key: String, source: std::io::Error },

    #[snafu(display("Failed to fetch '{url}': {source}"))]
    Fetch { url: String, source: reqwest::Error },

    #[snafu(display("Fetching '{url}' returned HTTP {status}"))]
    FetchStatus { url: String, status: reqwest::StatusCode },

    #[snafu(display("Digest mismatch for '{subject}': expected {expected}, got {actual}"))]
    DigestMismatch {
        subject: String,
        expected: String,
        actual: String,
    },

    #[snafu(display("Unsupported digest algorithm '{algo}', only 'sha256' is supported"))]
    UnsupportedDigestAlgo { algo: String },

    #[snafu(display("Malformed digest '{digest}', expected '<algo>:<hex>'"))]
    MalformedDigest { digest: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
