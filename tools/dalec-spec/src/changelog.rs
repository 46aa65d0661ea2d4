use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ChangelogEntry {
    /// RFC 2822-ish date string, rendered verbatim into distro changelogs.
    pub date: String,
    pub author: String,
    pub changes: Vec<String>,
}

/// A package repository to mount during a build or test (spec §3 `targets[x].repos`).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RepoConfig {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub gpg_key: Option<String>,
}
