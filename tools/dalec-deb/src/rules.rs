//! Rendering `debian/rules` (spec §4.3).

use crate::install_files::destination_path;
use crate::systemd;
use dalec_spec::artifact::{self, Artifacts};
use std::fmt::Write;

pub fn render(artifacts: Option<&Artifacts>) -> String {
    let mut out = String::from("#!/usr/bin/make -f\n\n%:\n\tdh $@\n");

    let Some(artifacts) = artifacts else {
        return out;
    };

    let chmods = fixperms_lines(artifacts);
    if !chmods.is_empty() {
        writeln!(out).unwrap();
        writeln!(out, "execute_after_dh_fixperms:").unwrap();
        for line in chmods {
            writeln!(out, "{line}").unwrap();
        }
    }

    if systemd::needs_override(&artifacts.systemd) {
        writeln!(out).unwrap();
        writeln!(out, "override_dh_installsystemd:").unwrap();
        for line in systemd::installsystemd_lines(&artifacts.systemd) {
            writeln!(out, "{line}").unwrap();
        }
    }

    out
}

fn fixperms_lines(artifacts: &Artifacts) -> Vec<String> {
    let mut lines = Vec::new();
    for (map, root) in [
        (&artifacts.binaries, artifact::roots::BIN),
        (&artifacts.config_files, artifact::roots::ETC),
        (&artifacts.libexec, artifact::roots::LIBEXEC),
        (&artifacts.libs, artifact::roots::LIB),
    ] {
        for (key, cfg) in map {
            if let Some(mode) = cfg.permissions {
                let path = destination_path(key, cfg, root);
                lines.push(format!("\tchmod {mode:o} debian/*{path}"));
            }
        }
    }
    lines.sort();
    lines
}

#[cfg(test)]
mod test {
    use super::*;
    use dalec_spec::artifact::ArtifactConfig;

    #[test]
    fn plain_rules_has_no_overrides() {
        let rendered = render(None);
        assert_eq!(rendered, "#!/usr/bin/make -f\n\n%:\n\tdh $@\n");
    }

    #[test]
    fn explicit_permissions_trigger_fixperms_override() {
        let mut artifacts = Artifacts::default();
        artifacts.binaries.insert(
            "src/hello".to_string(),
            ArtifactConfig {
                permissions: Some(0o755),
                ..Default::default()
            },
        );
        let rendered = render(Some(&artifacts));
        assert!(rendered.contains("execute_after_dh_fixperms:"));
        assert!(rendered.contains("chmod 755"));
    }
}
