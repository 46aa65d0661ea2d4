//! Rendering the per-artifact `debian/*.install`, `*.dirs`, `*.docs`,
//! `*.manpages`, `*.links`, and `conffiles` files (spec §4.3, §6).

use dalec_spec::artifact::{self, ArtifactConfig, Artifacts};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct InstallPlan {
    /// `<pkg>.install` lines. `needs_dh_exec` is true when any entry renames
    /// its destination, which requires the `#!/usr/bin/dh-exec` shebang.
    pub install_lines: Vec<String>,
    pub needs_dh_exec: bool,
    pub manpages_lines: Vec<String>,
    pub docs_lines: Vec<String>,
    pub links_lines: Vec<String>,
    pub conffiles_lines: Vec<String>,
    pub dirs_lines: Vec<String>,
}

pub fn plan(artifacts: &Artifacts) -> InstallPlan {
    let mut install_lines = Vec::new();
    let mut needs_dh_exec = false;

    for (map, root) in [
        (&artifacts.binaries, artifact::roots::BIN),
        (&artifacts.config_files, artifact::roots::ETC),
        (&artifacts.headers, artifact::roots::INCLUDE),
        (&artifacts.libexec, artifact::roots::LIBEXEC),
        (&artifacts.libs, artifact::roots::LIB),
        (&artifacts.data_dirs, artifact::roots::SHARE),
        (&artifacts.info_files, artifact::roots::INFO),
        (&artifacts.licenses, artifact::roots::DOC),
    ] {
        let (lines, renamed_any) = install_entries(map, root);
        needs_dh_exec |= renamed_any;
        install_lines.extend(lines);
    }
    install_lines.sort();

    let manpages_lines: Vec<String> = artifacts.manpages.keys().cloned().collect();
    let docs_lines: Vec<String> = artifacts.docs.keys().cloned().collect();

    let mut links_lines: Vec<String> = artifacts
        .links
        .iter()
        .map(|l| format!("{} {}", l.target, l.path))
        .collect();
    links_lines.sort();

    let mut conffiles_lines: Vec<String> = artifacts
        .config_files
        .iter()
        .map(|(key, cfg)| destination_path(key, cfg, artifact::roots::ETC))
        .collect();
    conffiles_lines.sort();

    let mut dirs_lines: Vec<String> = artifacts
        .directories
        .config
        .iter()
        .chain(artifacts.directories.state.iter())
        .map(|d| d.path.clone())
        .collect();
    dirs_lines.sort();

    InstallPlan {
        install_lines,
        needs_dh_exec,
        manpages_lines,
        docs_lines,
        links_lines,
        conffiles_lines,
        dirs_lines,
    }
}

fn install_entries(map: &BTreeMap<String, ArtifactConfig>, root: &str) -> (Vec<String>, bool) {
    let mut lines = Vec::new();
    let mut renamed_any = false;
    for (key, cfg) in map {
        let dest_dir = match &cfg.sub_path {
            Some(sub) => format!("{root}/{sub}"),
            None => root.to_string(),
        };
        let basename = Path::new(key)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(key.as_str());
        let resolved = cfg.resolve_name(key);
        if resolved != basename {
            lines.push(format!("{key} => {dest_dir}/{resolved}"));
            renamed_any = true;
        } else {
            lines.push(format!("{key} {dest_dir}/"));
        }
    }
    (lines, renamed_any)
}

pub(crate) fn destination_path(key: &str, cfg: &ArtifactConfig, root: &str) -> String {
    let dest_dir = match &cfg.sub_path {
        Some(sub) => format!("{root}/{sub}"),
        None => root.to_string(),
    };
    format!("{dest_dir}/{}", cfg.resolve_name(key))
}

#[cfg(test)]
mod test {
    use super::*;
    use dalec_spec::artifact::LinkConfig;

    #[test]
    fn renamed_binary_uses_dh_exec_syntax() {
        let mut artifacts = Artifacts::default();
        artifacts.binaries.insert(
            "src/hello".to_string(),
            ArtifactConfig {
                name: Some("hello-renamed".to_string()),
                ..Default::default()
            },
        );
        let plan = plan(&artifacts);
        assert!(plan.needs_dh_exec);
        assert_eq!(plan.install_lines, vec!["src/hello => /usr/bin/hello-renamed".to_string()]);
    }

    #[test]
    fn plain_binary_uses_directory_form() {
        let mut artifacts = Artifacts::default();
        artifacts.binaries.insert("src/hello".to_string(), ArtifactConfig::default());
        let plan = plan(&artifacts);
        assert!(!plan.needs_dh_exec);
        assert_eq!(plan.install_lines, vec!["src/hello /usr/bin/".to_string()]);
    }

    #[test]
    fn conffiles_lists_full_destination_paths() {
        let mut artifacts = Artifacts::default();
        artifacts
            .config_files
            .insert("cfg/app.conf".to_string(), ArtifactConfig::default());
        let plan = plan(&artifacts);
        assert_eq!(plan.conffiles_lines, vec!["/etc/app.conf".to_string()]);
    }

    #[test]
    fn links_render_as_target_then_path() {
        let mut artifacts = Artifacts::default();
        artifacts.links.push(LinkConfig {
            path: "/usr/bin/hello".to_string(),
            target: "/usr/bin/hello-1.0".to_string(),
        });
        let plan = plan(&artifacts);
        assert_eq!(plan.links_lines, vec!["/usr/bin/hello-1.0 /usr/bin/hello".to_string()]);
    }
}
