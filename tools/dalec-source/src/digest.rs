//! Parsing and verifying `<algo>:<hex>` content digests (spec §3 `http.digest`).

use crate::error::{self, Result};
use sha2::{Digest as _, Sha256};
use snafu::ensure;

/// Verify `bytes` against a `<algo>:<hex>` digest. `subject` is only used to
/// produce a useful error message (typically the source key or URL).
pub fn verify(bytes: &[u8], digest: &str, subject: &str) -> Result<()> {
    let (algo, expected_hex) = digest
        .split_once(':')
        .ok_or_else(|| error::Error::MalformedDigest {
            digest: digest.to_string(),
        })?;
    ensure!(
        algo == "sha256",
        error::UnsupportedDigestAlgoSnafu {
            algo: algo.to_string()
        }
    );

    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let actual = hex::encode(hasher.finalize());

    ensure!(
        actual == expected_hex,
        error::DigestMismatchSnafu {
            subject: subject.to_string(),
            expected: expected_hex.to_string(),
            actual,
        }
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verifies_matching_digest() {
        let bytes = b"hello world";
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hex_digest = hex::encode(hasher.finalize());
        verify(bytes, &format!("sha256:{hex_digest}"), "test").unwrap();
    }

    #[test]
    fn rejects_mismatched_digest() {
        assert!(verify(b"hello world", "sha256:deadbeef", "test").is_err());
    }

    #[test]
    fn rejects_unsupported_algo() {
        assert!(verify(b"hello world", "md5:deadbeef", "test").is_err());
    }
}
