//! Rendering the `%install` section (spec §4.4): every artifact class gets
//! its target directory created and each entry copied under the distro
//! macro root.

use dalec_spec::artifact::{self, ArtifactConfig, Artifacts};

pub fn render(artifacts: &Artifacts) -> Vec<String> {
    let mut lines = Vec::new();

    for (map, root) in [
        (&artifacts.binaries, artifact::roots::BIN),
        (&artifacts.config_files, artifact::roots::ETC),
        (&artifacts.headers, artifact::roots::INCLUDE),
        (&artifacts.libexec, artifact::roots::LIBEXEC),
        (&artifacts.libs, artifact::roots::LIB),
        (&artifacts.data_dirs, artifact::roots::SHARE),
        (&artifacts.info_files, artifact::roots::INFO),
        (&artifacts.docs, artifact::roots::DOC),
        (&artifacts.licenses, artifact::roots::DOC),
        (&artifacts.manpages, artifact::roots::MAN),
    ] {
        for (key, cfg) in map {
            lines.extend(install_entry(key, cfg, root));
        }
    }

    for name in artifacts.systemd.units.keys() {
        lines.push(format!("mkdir -p %{{buildroot}}{}", artifact::roots::SYSTEMD));
        lines.push(format!("install -D {name} %{{buildroot}}{}/{name}", artifact::roots::SYSTEMD));
    }

    for dir in artifacts.directories.config.iter().chain(artifacts.directories.state.iter()) {
        lines.push(format!("mkdir -p %{{buildroot}}{}", dir.path));
    }

    lines.sort();
    lines
}

/// Plain entries install to `<dest_dir>/<resolved-name>`; entries whose
/// resolved name carries a wildcard are copied into the directory instead,
/// relying on `%files` glob matching (spec §4.4).
fn install_entry(key: &str, cfg: &ArtifactConfig, root: &str) -> Vec<String> {
    let dest_dir = match &cfg.sub_path {
        Some(sub) => format!("{root}/{sub}"),
        None => root.to_string(),
    };
    let resolved = cfg.resolve_name(key);

    let mut lines = vec![format!("mkdir -p %{{buildroot}}{dest_dir}")];
    if resolved.contains('*') {
        lines.push(format!("cp -a {key} %{{buildroot}}{dest_dir}/"));
    } else {
        lines.push(format!("install -D {key} %{{buildroot}}{dest_dir}/{resolved}"));
    }
    lines
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn plain_binary_is_installed_by_resolved_name() {
        let mut artifacts = Artifacts::default();
        artifacts.binaries.insert("src/hello".to_string(), ArtifactConfig::default());
        let lines = render(&artifacts);
        assert!(lines.contains(&"install -D src/hello %{buildroot}/usr/bin/hello".to_string()));
        assert!(lines.contains(&"mkdir -p %{buildroot}/usr/bin".to_string()));
    }

    #[test]
    fn wildcard_resolved_name_copies_into_the_directory() {
        let mut artifacts = Artifacts::default();
        artifacts.docs.insert(
            "docs/*.md".to_string(),
            ArtifactConfig {
                name: Some("*.md".to_string()),
                ..Default::default()
            },
        );
        let lines = render(&artifacts);
        assert!(lines.contains(&"cp -a docs/*.md %{buildroot}/usr/share/doc/".to_string()));
    }

    #[test]
    fn declared_directories_are_created() {
        let mut artifacts = Artifacts::default();
        artifacts.directories.state.push(dalec_spec::artifact::DirectoryConfig {
            path: "/var/lib/hello".to_string(),
            mode: 0o755,
        });
        let lines = render(&artifacts);
        assert!(lines.contains(&"mkdir -p %{buildroot}/var/lib/hello".to_string()));
    }
}
