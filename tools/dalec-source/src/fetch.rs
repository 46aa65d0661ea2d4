//! Fetching an `http` source's content directly, for the cases where a
//! source's bytes can be obtained without a worker container (spec §4.2
//! "download and verify digest").

use crate::digest;
use crate::error::{self, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use snafu::{ensure, ResultExt};

/// Fetch `url` and verify its content against `digest` (`<algo>:<hex>`).
/// Returns the verified bytes; never writes a partial fetch to disk since the
/// caller decides where the content ultimately lands.
pub fn fetch_and_verify(url: &str, digest: &str) -> Result<Vec<u8>> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static("dalec (https://github.com/Azure/dalec)"),
    );

    let client = reqwest::blocking::Client::new();
    let response = client
        .get(url)
        .headers(headers)
        .send()
        .context(error::FetchSnafu { url })?;

    let status = response.status();
    ensure!(
        status.is_success(),
        error::FetchStatusSnafu {
            url: url.to_string(),
            status,
        }
    );

    let bytes = response.bytes().context(error::FetchSnafu { url })?.to_vec();
    digest::verify(&bytes, digest, url)?;
    Ok(bytes)
}
