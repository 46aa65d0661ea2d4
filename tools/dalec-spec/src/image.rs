//! Post-install container image directives (spec §3, §6): symlinks, env,
//! cmd/entrypoint, merged over the base image config.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ImageConfig {
    #[serde(default)]
    pub symlinks: BTreeMap<String, String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub cmd: Option<Vec<String>>,
    #[serde(default)]
    pub entrypoint: Option<Vec<String>>,
    #[serde(default)]
    pub working_dir: Option<String>,
    #[serde(default)]
    pub stop_signal: Option<String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub base: Option<String>,
}

impl ImageConfig {
    /// Merge `self` over `base`: every field `self` sets wins, everything
    /// else is inherited. Maps are merged key-by-key rather than replaced
    /// wholesale, matching "image config merges spec.image ... over the base"
    /// (spec §6).
    pub fn merged_over(&self, base: &ImageConfig) -> ImageConfig {
        let mut env = base.env.clone();
        env.extend(self.env.clone());
        let mut labels = base.labels.clone();
        labels.extend(self.labels.clone());
        let mut symlinks = base.symlinks.clone();
        symlinks.extend(self.symlinks.clone());

        ImageConfig {
            symlinks,
            env,
            cmd: self.cmd.clone().or_else(|| base.cmd.clone()),
            entrypoint: self.entrypoint.clone().or_else(|| base.entrypoint.clone()),
            working_dir: self.working_dir.clone().or_else(|| base.working_dir.clone()),
            stop_signal: self.stop_signal.clone().or_else(|| base.stop_signal.clone()),
            labels: labels.clone(),
            base: self.base.clone().or_else(|| base.base.clone()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn merge_prefers_overlay_but_keeps_base_env() {
        let mut base = ImageConfig::default();
        base.env.insert("A".into(), "base".into());
        base.cmd = Some(vec!["base-cmd".into()]);

        let mut overlay = ImageConfig::default();
        overlay.env.insert("B".into(), "overlay".into());

        let merged = overlay.merged_over(&base);
        assert_eq!(merged.env.get("A").unwrap(), "base");
        assert_eq!(merged.env.get("B").unwrap(), "overlay");
        assert_eq!(merged.cmd, Some(vec!["base-cmd".into()]));
    }
}
