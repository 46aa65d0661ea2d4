//! Assembling the full `debian/` tree (spec §4.3).

use crate::error::{self, Result};
use crate::{changelog, control, install_files, patches, rules, scripts, systemd};
use dalec_source::Resolved;
use dalec_spec::Spec;
use snafu::ResultExt;
use std::collections::BTreeMap;

/// Every file `dalec-deb` emits, keyed by its path relative to the source
/// package root (e.g. `"debian/control"`).
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DebianLayout {
    pub files: BTreeMap<String, String>,
}

impl DebianLayout {
    fn put(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

pub fn render(spec: &Spec, target: &str, distro: &str) -> Result<DebianLayout> {
    let resolved = dalec_source::resolve(spec).context(error::ResolveSnafu)?;
    let artifacts = spec.get_artifacts(target);

    let mut layout = DebianLayout::default();
    layout.put("debian/control", control::render(spec, target));
    layout.put("debian/changelog", changelog::render(spec, distro));
    layout.put("debian/compat", format!("{}\n", control::DEBHELPER_COMPAT));
    layout.put("debian/rules", rules::render(artifacts));
    layout.put("debian/source/format", "3.0 (quilt)\n");
    layout.put("debian/source/options", "create-empty-orig\n");

    if let Some(artifacts) = artifacts {
        let plan = install_files::plan(artifacts);
        put_lines(&mut layout, format!("debian/{}.install", spec.name), &plan.install_lines);
        put_lines(&mut layout, format!("debian/{}.manpages", spec.name), &plan.manpages_lines);
        put_lines(&mut layout, format!("debian/{}.docs", spec.name), &plan.docs_lines);
        put_lines(&mut layout, format!("debian/{}.links", spec.name), &plan.links_lines);
        put_lines(&mut layout, format!("debian/{}.dirs", spec.name), &plan.dirs_lines);
        if !plan.conffiles_lines.is_empty() {
            put_lines(&mut layout, "debian/conffiles", &plan.conffiles_lines);
        }
        if plan.needs_dh_exec {
            layout.put(
                format!("debian/{}.install.dh-exec", spec.name),
                "#!/usr/bin/dh-exec\n",
            );
        }

        if systemd::has_mixed_enable(&artifacts.systemd) {
            let basenames = dalec_spec::artifact::systemd_basenames_with_mixed_enable(&artifacts.systemd.units);
            layout.put(
                format!("debian/dalec/{}", basenames_fragment_name()),
                systemd::custom_postinst_fragment(&basenames),
            );
        }
    }

    if let Some(series) = patches::series(&resolved.patches) {
        layout.put("debian/patches/series", series.series);
        layout.put(
            format!("debian/patches/{}", series.collated_patch_name),
            collate_patch_placeholder(&resolved),
        );
    }

    layout.put("debian/dalec/build.sh", scripts::build_sh(spec));
    layout.put("debian/dalec/patch.sh", scripts::patch_sh());
    let sanitized_keys: Vec<String> = resolved.sources.keys().cloned().collect();
    layout.put("debian/dalec/fix_sources.sh", scripts::fix_sources_sh(&sanitized_keys));

    Ok(layout)
}

fn put_lines(layout: &mut DebianLayout, path: impl Into<String>, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    let mut content = lines.join("\n");
    content.push('\n');
    layout.put(path, content);
}

fn basenames_fragment_name() -> &'static str {
    crate::systemd::CUSTOM_POSTINST_FRAGMENT_PATH
        .rsplit('/')
        .next()
        .unwrap_or("custom_systemd_postinst.sh.partial")
}

/// Collation itself (diffing each patch source's content against its target)
/// happens at executor time once source content is materialized; here we
/// only reserve the path and a marker that a patch set exists, since this
/// crate never executes a build.
fn collate_patch_placeholder(resolved: &Resolved) -> String {
    let mut out = String::new();
    for key in resolved.patches.keys() {
        out.push_str(&format!("# collated at build time from patches declared against '{key}'\n"));
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn spec_with(yaml: &str) -> Spec {
        Spec::load(yaml.as_bytes()).unwrap()
    }

    #[test]
    fn minimal_spec_renders_core_files() {
        let spec = spec_with(
            r#"
name: hello
version: "1.0"
revision: "1"
description: d
license: MIT
sources: {}
"#,
        );
        let layout = render(&spec, "jammy", "jammy").unwrap();
        assert!(layout.files.contains_key("debian/control"));
        assert!(layout.files.contains_key("debian/changelog"));
        assert!(layout.files.contains_key("debian/rules"));
        assert!(layout.files.contains_key("debian/compat"));
        assert_eq!(layout.files["debian/source/format"], "3.0 (quilt)\n");
    }
}
