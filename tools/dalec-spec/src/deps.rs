//! Dependency declarations (spec §3): `PackageDependencies` and the
//! per-package version/arch constraints that the deb and rpm synthesizers
//! render into distro-native fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PackageDependencies {
    #[serde(default)]
    pub build: BTreeMap<String, PackageConstraints>,
    #[serde(default)]
    pub runtime: BTreeMap<String, PackageConstraints>,
    #[serde(default)]
    pub recommends: BTreeMap<String, PackageConstraints>,
    #[serde(default)]
    pub test: BTreeMap<String, PackageConstraints>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PackageConstraints {
    #[serde(default)]
    pub version: Vec<String>,
    #[serde(default)]
    pub arch: Vec<String>,
}

/// A table of package-name -> constraints, as used for `replaces`,
/// `provides`, and `conflicts`, which share `PackageConstraints`' shape but
/// are not grouped under build/runtime/recommends/test.
pub type ConstraintMap = BTreeMap<String, PackageConstraints>;
