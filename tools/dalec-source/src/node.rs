//! Build-node descriptions for resolved sources.
//!
//! Dalec hands these to a remote executor rather than running them itself
//! (spec §5 "all build work ... is represented as a declarative graph"); this
//! crate's job stops at producing a deterministic, content-describable
//! [`SourceNode`] per source key, plus the local capability to materialize
//! the variants whose content doesn't require a container (inline, http).

use dalec_spec::source::{BuildSource, Generator};
use std::collections::BTreeMap;

/// One operation an executor would run to produce a source's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOp {
    PullImage { r#ref: String, path: Option<String> },
    GitClone { url: String, commit: String, keep_git_dir: bool },
    FetchHttp { url: String, digest: String },
    NamedContext { name: String },
    DockerfileBuild {
        dockerfile: Option<String>,
        target: Option<String>,
        args: BTreeMap<String, String>,
        nested: Box<SourceNode>,
    },
    InlineDir { files: BTreeMap<String, InlineEntry> },
    InlineFile { entry: InlineEntry },
    /// Appended to every directory-valued source's op list (spec §4.2).
    TarGzip { output: String },
    /// A generator run against this source's resolved tree, contributing a
    /// pseudo-source under `Generator::output_key()` (spec §4.2).
    RunGenerator { generator: Generator, against: String },
    /// A patch applied against this source's resolved tree (spec §4.2).
    ApplyPatch { patch_source: String, strip: u32, path: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEntry {
    pub contents: String,
    pub permissions: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNode {
    pub key: String,
    pub is_dir: bool,
    pub ops: Vec<SourceOp>,
}

impl SourceNode {
    pub fn new(key: impl Into<String>, is_dir: bool) -> Self {
        Self {
            key: key.into(),
            is_dir,
            ops: Vec::new(),
        }
    }

    pub fn push(mut self, op: SourceOp) -> Self {
        self.ops.push(op);
        self
    }

    /// The name the resolved content is emitted under at the executor's
    /// output root: `<key>.tar.gz` for directories, `<key>` for files.
    pub fn output_name(&self) -> String {
        if self.is_dir {
            format!("{}.tar.gz", self.key)
        } else {
            self.key.clone()
        }
    }
}

pub(crate) fn nested_build_op(build: &BuildSource, nested: SourceNode) -> SourceOp {
    SourceOp::DockerfileBuild {
        dockerfile: build.dockerfile.clone(),
        target: build.target.clone(),
        args: build.args.clone(),
        nested: Box::new(nested),
    }
}
