//! Materializing the `SOURCES/` directory (spec §4.4): each directory-source
//! tarred, each file-source raw.

use dalec_source::node::SourceOp;
use dalec_source::{fetch, tar, SourceNode};

/// The bytes to write at `SOURCES/<node.output_name()>`. Inline and http
/// sources are materialized directly; sources that require a remote
/// executor (docker image, git clone, build context, generator output) are
/// left as a marker, since this crate never executes a build (spec §5
/// executor boundary).
pub fn materialize(node: &SourceNode) -> dalec_source::Result<Vec<u8>> {
    match node.ops.first() {
        Some(SourceOp::InlineDir { files }) => tar::build_inline_archive(&node.key, files),
        Some(SourceOp::InlineFile { entry }) => Ok(tar::single_file_bytes(entry)),
        Some(SourceOp::FetchHttp { url, digest }) => fetch::fetch_and_verify(url, digest),
        _ => Ok(format!(
            "# '{}' materialized at build time by the remote executor\n",
            node.key
        )
        .into_bytes()),
    }
}
