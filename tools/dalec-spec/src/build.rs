//! The `build` section (spec §3): environment, ordered steps, and typed
//! cache declarations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BuildConfig {
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub steps: Vec<BuildStep>,
    #[serde(default)]
    pub caches: Vec<CacheDecl>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BuildStep {
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    pub command: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CacheDecl {
    pub kind: CacheKind,
    /// Extra key component so unrelated packages don't collide on the same
    /// mount name. Defaults to the spec's package name at emission time.
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CacheKind {
    GoBuild,
    CargoBuild,
}

impl CacheKind {
    /// Cache-mount target directory inside the build container.
    pub fn mount_path(&self) -> &'static str {
        match self {
            CacheKind::GoBuild => "/root/.cache/go-build",
            CacheKind::CargoBuild => "/root/.cargo/registry",
        }
    }

    /// These are build-artifact caches: shared across concurrent writers
    /// rather than locked (spec §5).
    pub const fn is_shared(&self) -> bool {
        true
    }
}
