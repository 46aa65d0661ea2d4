//! The `Source` data model (spec §3): a tagged variant over the ways a
//! build can acquire a directory or file, plus the generators that can run
//! against it before it is packaged.

use crate::error::{self, Result};
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Source {
    pub docker_image: Option<DockerImageSource>,
    pub git: Option<GitSource>,
    pub http: Option<HttpSource>,
    pub context: Option<ContextSource>,
    pub build: Option<Box<BuildSource>>,
    pub inline: Option<InlineSource>,

    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
    /// Ecosystem generators to run against the resolved tree before packaging.
    #[serde(default)]
    pub generate: Vec<Generator>,
}

/// The resolved variant of a [`Source`], once we've confirmed exactly one is set.
#[derive(Debug, Clone, Copy)]
pub enum SourceVariant<'a> {
    DockerImage(&'a DockerImageSource),
    Git(&'a GitSource),
    Http(&'a HttpSource),
    Context(&'a ContextSource),
    Build(&'a BuildSource),
    Inline(&'a InlineSource),
}

impl Source {
    /// Resolve which of the mutually-exclusive variants this source declares.
    ///
    /// `key` is only used to produce a useful error message; it is not part of
    /// the source's identity.
    pub fn variant(&self, key: &str) -> Result<SourceVariant<'_>> {
        let mut found = Vec::new();
        if let Some(v) = &self.docker_image {
            found.push(SourceVariant::DockerImage(v));
        }
        if let Some(v) = &self.git {
            found.push(SourceVariant::Git(v));
        }
        if let Some(v) = &self.http {
            found.push(SourceVariant::Http(v));
        }
        if let Some(v) = &self.context {
            found.push(SourceVariant::Context(v));
        }
        if let Some(v) = &self.build {
            found.push(SourceVariant::Build(v));
        }
        if let Some(v) = &self.inline {
            found.push(SourceVariant::Inline(v));
        }
        ensure!(
            found.len() == 1,
            error::AmbiguousSourceVariantSnafu {
                key: key.to_string(),
                found: found.len(),
            }
        );
        Ok(found.remove(0))
    }

    /// Whether this source produces a directory (and so should be tar-gzipped
    /// before packaging) or a single file (passed through as-is).
    pub fn is_dir(&self, key: &str) -> Result<bool> {
        Ok(match self.variant(key)? {
            SourceVariant::DockerImage(_) => true,
            SourceVariant::Git(_) => true,
            SourceVariant::Http(h) => !h.is_single_file(),
            SourceVariant::Context(_) => true,
            SourceVariant::Build(_) => true,
            SourceVariant::Inline(InlineSource::Dir { .. }) => true,
            SourceVariant::Inline(InlineSource::File(_)) => false,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DockerImageSource {
    pub r#ref: String,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GitSource {
    pub url: String,
    pub commit: String,
    #[serde(default)]
    pub keep_git_dir: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HttpSource {
    pub url: String,
    /// `algo:hex`, e.g. `sha256:abcd...`. Required for reproducible fetches.
    pub digest: String,
}

impl HttpSource {
    /// An http source with no archive extension we recognize is treated as a
    /// single file rather than something to unpack.
    fn is_single_file(&self) -> bool {
        !matches!(
            self.url.rsplit_once('.'),
            Some((_, "tar" | "gz" | "tgz" | "xz" | "zip" | "bz2"))
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ContextSource {
    /// Defaults to the frontend's default named context (`"context"`) when absent.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BuildSource {
    pub source: Source,
    #[serde(default)]
    pub dockerfile: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub args: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", untagged)]
pub enum InlineSource {
    Dir {
        #[serde(default)]
        files: BTreeMap<String, InlineFile>,
    },
    File(InlineFile),
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct InlineFile {
    pub contents: String,
    #[serde(default)]
    pub permissions: Option<u32>,
}

/// A patch application: `source` names a [`Source`] key whose content is a
/// patch file, applied against the source it is keyed under in the patches map.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PatchRef {
    pub source: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_strip")]
    pub strip: u32,
}

fn default_strip() -> u32 {
    1
}

/// A source-tree generator for a language ecosystem. Each variant takes the
/// resolved source tree plus a worker image and populates a vendoring/cache
/// tree, contributed back into the sources map under a reserved key.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Generator {
    Gomod,
    Cargohome,
    Pip,
    Node,
}

impl Generator {
    /// The reserved pseudo-source key this generator's output is merged under.
    pub fn output_key(&self) -> &'static str {
        match self {
            Generator::Gomod => "__gomods",
            Generator::Cargohome => "__cargohome",
            Generator::Pip => "__pipdeps",
            Generator::Node => "__nodemodules",
        }
    }
}
