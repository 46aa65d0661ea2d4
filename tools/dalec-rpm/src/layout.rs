//! Assembling the rpmbuild source tree (spec §4.4).

use crate::error::{self, Result};
use dalec_spec::Spec;
use snafu::ResultExt;
use std::collections::BTreeMap;

/// Every file `dalec-rpm` emits, keyed by its path relative to the
/// rpmbuild `SOURCES`/`SPECS` root. Text files (the `.spec` and
/// `build.sh`) and binary files (per-source tarballs/raw bytes) are kept
/// separate since tarball content isn't guaranteed valid UTF-8.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RpmLayout {
    pub files: BTreeMap<String, String>,
    pub binary_files: BTreeMap<String, Vec<u8>>,
}

pub fn render(spec: &Spec, target: &str) -> Result<RpmLayout> {
    let resolved = dalec_source::resolve(spec).context(error::ResolveSnafu)?;
    let mut layout = RpmLayout::default();
    layout.files.insert(
        format!("SPECS/{}.spec", spec.name),
        crate::specfile::render(spec, target, &resolved),
    );
    layout
        .files
        .insert("SOURCES/build.sh".to_string(), crate::scripts::build_sh(spec));

    for node in resolved.sources.values() {
        let bytes = crate::sources::materialize(node).context(error::MaterializeSnafu {
            key: node.key.clone(),
        })?;
        layout
            .binary_files
            .insert(format!("SOURCES/{}", node.output_name()), bytes);
    }

    Ok(layout)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn minimal_spec_renders_spec_file() {
        let spec = Spec::load(
            br#"
name: hello
version: "1.0"
revision: "1"
description: d
license: MIT
sources: {}
"#,
        )
        .unwrap();
        let layout = render(&spec, "jammy").unwrap();
        assert!(layout.files.contains_key("SPECS/hello.spec"));
        assert!(layout.files.contains_key("SOURCES/build.sh"));
    }

    #[test]
    fn inline_sources_are_materialized_under_sources() {
        let spec = Spec::load(
            br#"
name: hello
version: "1.0"
revision: "1"
description: d
license: MIT
sources:
  a:
    inline:
      dir:
        files:
          f: { contents: "x" }
  b:
    inline:
      file:
        contents: "plain file"
"#,
        )
        .unwrap();
        let layout = render(&spec, "jammy").unwrap();
        assert!(layout.binary_files.contains_key("SOURCES/a.tar.gz"));
        assert_eq!(layout.binary_files.get("SOURCES/b").unwrap(), b"plain file");
    }
}
