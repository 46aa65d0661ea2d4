//! Turns a validated spec's `sources` map into build nodes (spec §4.2).

use crate::error::{self, Result};
use crate::node::{nested_build_op, InlineEntry, SourceNode, SourceOp};
use dalec_spec::source::{InlineSource, Source, SourceVariant};
use dalec_spec::Spec;
use snafu::ResultExt;
use std::collections::BTreeMap;

/// A patch application queued against a source key, in the order declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchStep {
    pub patch_source: String,
    pub strip: u32,
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolved {
    /// Every resolved source, including generator-contributed pseudo-sources,
    /// keyed and iterated in sorted order (spec §3 invariants).
    pub sources: BTreeMap<String, SourceNode>,
    /// Patch steps, keyed by the source key being patched.
    pub patches: BTreeMap<String, Vec<PatchStep>>,
}

/// Resolve every declared source into a [`SourceNode`], run generators, and
/// collect patch application steps. `target` only affects which sources a
/// caller cares about downstream; resolution itself is target-independent.
pub fn resolve(spec: &Spec) -> Result<Resolved> {
    let mut sources = BTreeMap::new();
    let mut generator_runs = Vec::new();

    for (key, source) in &spec.sources {
        let node = resolve_one(key, source)?;
        for generator in &source.generate {
            generator_runs.push((generator.output_key().to_string(), *generator, key.clone()));
        }
        sources.insert(key.clone(), node);
    }

    for (pseudo_key, generator, against) in generator_runs {
        let mut node = SourceNode::new(&pseudo_key, true);
        node.ops.push(SourceOp::RunGenerator { generator, against });
        node.ops.push(SourceOp::TarGzip {
            output: format!("{pseudo_key}.tar.gz"),
        });
        sources.insert(pseudo_key, node);
    }

    let mut patches = BTreeMap::new();
    for (key, refs) in &spec.patches {
        let steps = refs
            .iter()
            .map(|p| PatchStep {
                patch_source: p.source.clone(),
                strip: p.strip,
                path: p.path.clone(),
            })
            .collect();
        patches.insert(key.clone(), steps);
    }

    Ok(Resolved { sources, patches })
}

fn resolve_one(key: &str, source: &Source) -> Result<SourceNode> {
    let is_dir = source.is_dir(key).context(error::VariantSnafu { key })?;
    let variant = source.variant(key).context(error::VariantSnafu { key })?;

    let mut node = SourceNode::new(key, is_dir);
    node.ops.push(match variant {
        SourceVariant::DockerImage(d) => SourceOp::PullImage {
            r#ref: d.r#ref.clone(),
            path: d.path.clone(),
        },
        SourceVariant::Git(g) => SourceOp::GitClone {
            url: g.url.clone(),
            commit: g.commit.clone(),
            keep_git_dir: g.keep_git_dir,
        },
        SourceVariant::Http(h) => SourceOp::FetchHttp {
            url: h.url.clone(),
            digest: h.digest.clone(),
        },
        SourceVariant::Context(c) => SourceOp::NamedContext {
            name: c.name.clone().unwrap_or_else(|| "context".to_string()),
        },
        SourceVariant::Build(b) => {
            let nested = resolve_one(key, &b.source)?;
            nested_build_op(b, nested)
        }
        SourceVariant::Inline(InlineSource::Dir { files }) => SourceOp::InlineDir {
            files: files
                .iter()
                .map(|(name, f)| {
                    (
                        name.clone(),
                        InlineEntry {
                            contents: f.contents.clone(),
                            permissions: f.permissions,
                        },
                    )
                })
                .collect(),
        },
        SourceVariant::Inline(InlineSource::File(f)) => SourceOp::InlineFile {
            entry: InlineEntry {
                contents: f.contents.clone(),
                permissions: f.permissions,
            },
        },
    });

    if is_dir {
        node.ops.push(SourceOp::TarGzip {
            output: format!("{key}.tar.gz"),
        });
    }

    Ok(node)
}
