//! Deterministic tar-gzip wrapping (spec §4.2: "stable: root ownership,
//! excluded extended attributes that vary by filesystem, deterministic
//! ordering").

use crate::error::{self, Result};
use crate::node::InlineEntry;
use flate2::write::GzEncoder;
use flate2::Compression;
use snafu::ResultExt;
use std::collections::BTreeMap;
use std::io::Write;

/// Build a gzip-compressed tar archive from an inline file tree. Entries are
/// emitted in sorted key order with a fixed mtime and root ownership so the
/// output is bit-stable across runs (spec §8 property 1).
pub fn build_inline_archive(key: &str, files: &BTreeMap<String, InlineEntry>) -> Result<Vec<u8>> {
    let gz = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(gz);

    for (path, entry) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(entry.contents.len() as u64);
        header.set_mode(entry.permissions.unwrap_or(0o644));
        header.set_uid(0);
        header.set_gid(0);
        header.set_mtime(0);
        header.set_cksum();
        builder
            .append_data(&mut header, path, entry.contents.as_bytes())
            .context(error::TarAppendSnafu { path: path.clone() })?;
    }

    let gz = builder
        .into_inner()
        .context(error::TarFinishSnafu { key: key.to_string() })?;
    gz.finish().context(error::TarFinishSnafu { key: key.to_string() })
}

/// Wrap a single inline file's bytes directly, with no tar/gzip container
/// (file-valued sources pass through untarred, spec §4.2).
pub fn single_file_bytes(entry: &InlineEntry) -> Vec<u8> {
    entry.contents.as_bytes().to_vec()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn archive_is_deterministic_across_builds() {
        let mut files = BTreeMap::new();
        files.insert(
            "Makefile".to_string(),
            InlineEntry {
                contents: "all:\n\techo hi\n".to_string(),
                permissions: None,
            },
        );
        files.insert(
            "src/main.c".to_string(),
            InlineEntry {
                contents: "int main(){return 0;}".to_string(),
                permissions: Some(0o644),
            },
        );

        let first = build_inline_archive("k", &files).unwrap();
        let second = build_inline_archive("k", &files).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn reversed_insertion_order_is_still_deterministic() {
        let mut forward = BTreeMap::new();
        forward.insert("a".to_string(), InlineEntry { contents: "1".into(), permissions: None });
        forward.insert("b".to_string(), InlineEntry { contents: "2".into(), permissions: None });

        let mut backward = BTreeMap::new();
        backward.insert("b".to_string(), InlineEntry { contents: "2".into(), permissions: None });
        backward.insert("a".to_string(), InlineEntry { contents: "1".into(), permissions: None });

        assert_eq!(
            build_inline_archive("k", &forward).unwrap(),
            build_inline_archive("k", &backward).unwrap()
        );
    }
}
