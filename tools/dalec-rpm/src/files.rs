//! Rendering the `%files` section (spec §4.4).

use dalec_spec::artifact::{self, Artifacts};

pub fn render(artifacts: &Artifacts) -> Vec<String> {
    let mut lines = Vec::new();

    for (key, cfg) in &artifacts.binaries {
        lines.push(plain_entry(key, cfg, artifact::roots::BIN));
    }
    for (key, cfg) in &artifacts.config_files {
        lines.push(format!("%config(noreplace) {}", plain_path(key, cfg, artifact::roots::ETC)));
    }
    for (key, cfg) in &artifacts.headers {
        lines.push(plain_entry(key, cfg, artifact::roots::INCLUDE));
    }
    for (key, cfg) in &artifacts.libexec {
        lines.push(plain_entry(key, cfg, artifact::roots::LIBEXEC));
    }
    for (key, cfg) in &artifacts.libs {
        lines.push(plain_entry(key, cfg, artifact::roots::LIB));
    }
    for (key, cfg) in &artifacts.data_dirs {
        lines.push(plain_entry(key, cfg, artifact::roots::SHARE));
    }
    for (key, cfg) in &artifacts.info_files {
        lines.push(plain_entry(key, cfg, artifact::roots::INFO));
    }
    for (key, cfg) in &artifacts.docs {
        lines.push(format!("%doc {}", plain_path(key, cfg, artifact::roots::DOC)));
    }
    for (key, cfg) in &artifacts.licenses {
        lines.push(format!("%license {}", plain_path(key, cfg, artifact::roots::DOC)));
    }
    for (key, cfg) in &artifacts.manpages {
        lines.push(plain_entry(key, cfg, artifact::roots::MAN));
    }
    for name in artifacts.systemd.units.keys() {
        lines.push(format!("{}/{name}", artifact::roots::SYSTEMD));
    }
    for link in &artifacts.links {
        lines.push(link.path.clone());
    }
    for dir in artifacts.directories.config.iter().chain(artifacts.directories.state.iter()) {
        lines.push(format!("%dir {}", dir.path));
    }

    lines.sort();
    lines
}

fn plain_entry(key: &str, cfg: &dalec_spec::artifact::ArtifactConfig, root: &str) -> String {
    plain_path(key, cfg, root)
}

fn plain_path(key: &str, cfg: &dalec_spec::artifact::ArtifactConfig, root: &str) -> String {
    let dest_dir = match &cfg.sub_path {
        Some(sub) => format!("{root}/{sub}"),
        None => root.to_string(),
    };
    format!("{dest_dir}/{}", cfg.resolve_name(key))
}
