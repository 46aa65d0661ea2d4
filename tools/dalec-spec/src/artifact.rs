//! Artifact placement (spec §3): where built files land inside the
//! installed package, plus the auxiliary install-time objects (systemd
//! units, users, groups, symlinks) a package may declare.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Distro-standard roots every artifact path is prefixed with (spec §3 invariants).
pub mod roots {
    pub const BIN: &str = "/usr/bin";
    pub const ETC: &str = "/etc";
    pub const DOC: &str = "/usr/share/doc";
    pub const INFO: &str = "/usr/share/info";
    pub const LIBEXEC: &str = "/usr/libexec";
    pub const LIB: &str = "/usr/lib";
    pub const MAN: &str = "/usr/share/man";
    pub const SYSTEMD: &str = "/lib/systemd/system";
    pub const INCLUDE: &str = "/usr/include";
    pub const SHARE: &str = "/usr/share";
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ArtifactConfig {
    #[serde(default)]
    pub sub_path: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub permissions: Option<u32>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
}

impl ArtifactConfig {
    /// Resolve the destination file name for a source key: the declared
    /// `name` if set, otherwise the source key's basename.
    pub fn resolve_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.name
            .as_deref()
            .unwrap_or_else(|| Path::new(key).file_name().and_then(|s| s.to_str()).unwrap_or(key))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Artifacts {
    #[serde(default)]
    pub binaries: BTreeMap<String, ArtifactConfig>,
    #[serde(default)]
    pub config_files: BTreeMap<String, ArtifactConfig>,
    #[serde(default)]
    pub manpages: BTreeMap<String, ArtifactConfig>,
    #[serde(default)]
    pub headers: BTreeMap<String, ArtifactConfig>,
    #[serde(default)]
    pub docs: BTreeMap<String, ArtifactConfig>,
    #[serde(default)]
    pub licenses: BTreeMap<String, ArtifactConfig>,
    #[serde(default)]
    pub libexec: BTreeMap<String, ArtifactConfig>,
    #[serde(default)]
    pub libs: BTreeMap<String, ArtifactConfig>,
    #[serde(default)]
    pub data_dirs: BTreeMap<String, ArtifactConfig>,
    #[serde(default)]
    pub info_files: BTreeMap<String, ArtifactConfig>,
    #[serde(default)]
    pub directories: DirectoriesConfig,
    #[serde(default)]
    pub systemd: SystemdConfig,
    #[serde(default)]
    pub users: Vec<UserConfig>,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
    #[serde(default)]
    pub disable_strip: bool,
    #[serde(default)]
    pub disable_auto_requires: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DirectoriesConfig {
    #[serde(default)]
    pub config: Vec<DirectoryConfig>,
    #[serde(default)]
    pub state: Vec<DirectoryConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DirectoryConfig {
    pub path: String,
    #[serde(default = "default_dir_mode")]
    pub mode: u32,
}

fn default_dir_mode() -> u32 {
    0o755
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SystemdConfig {
    #[serde(default)]
    pub units: BTreeMap<String, SystemdUnit>,
    #[serde(default)]
    pub dropins: BTreeMap<String, SystemdDropin>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SystemdUnit {
    #[serde(default = "default_true")]
    pub enable: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SystemdUnit {
    fn default() -> Self {
        Self { enable: true }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SystemdDropin {
    /// The `<name>.conf` filename dropped into `<unit>.d/`.
    pub name: String,
    pub source: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct UserConfig {
    pub name: String,
    #[serde(default)]
    pub system: bool,
    #[serde(default)]
    pub home: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GroupConfig {
    pub name: String,
    #[serde(default)]
    pub system: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LinkConfig {
    pub path: String,
    pub target: String,
}

/// A unit whose basename has units with mixed enable/disable state needs a
/// custom postinst fragment rather than relying on `dh_installsystemd`'s
/// per-basename enable/disable understanding (spec §4.3).
pub fn systemd_basenames_with_mixed_enable(units: &BTreeMap<String, SystemdUnit>) -> Vec<String> {
    let mut by_basename: BTreeMap<&str, Vec<bool>> = BTreeMap::new();
    for (name, unit) in units {
        let basename = name.split('.').next().unwrap_or(name);
        by_basename.entry(basename).or_default().push(unit.enable);
    }
    by_basename
        .into_iter()
        .filter(|(_, states)| states.iter().any(|e| *e) && states.iter().any(|e| !*e))
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolve_name_falls_back_to_basename() {
        let a = ArtifactConfig::default();
        assert_eq!(a.resolve_name("src/hello"), "hello");

        let named = ArtifactConfig {
            name: Some("renamed".into()),
            ..Default::default()
        };
        assert_eq!(named.resolve_name("src/hello"), "renamed");
    }

    #[test]
    fn mixed_enable_detected_per_basename() {
        let mut units = BTreeMap::new();
        units.insert("foo.service".to_string(), SystemdUnit { enable: true });
        units.insert("foo.socket".to_string(), SystemdUnit { enable: false });
        units.insert("bar.service".to_string(), SystemdUnit { enable: true });
        let mixed = systemd_basenames_with_mixed_enable(&units);
        assert_eq!(mixed, vec!["foo".to_string()]);
    }
}
