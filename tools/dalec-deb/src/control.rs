//! Rendering `debian/control` (spec §4.3).

use dalec_spec::deps::{ConstraintMap, PackageConstraints};
use dalec_spec::version::format_for_deb;
use dalec_spec::Spec;
use std::fmt::Write;

/// `debhelper-compat` level always appended to `Build-Depends` (spec §8 E1).
pub const DEBHELPER_COMPAT: u32 = 13;

pub fn render(spec: &Spec, target: &str) -> String {
    let mut out = String::new();

    writeln!(out, "Source: {}", spec.name).unwrap();
    writeln!(
        out,
        "Maintainer: {}",
        spec.packager.as_deref().unwrap_or("Unknown <unknown@example.com>")
    )
    .unwrap();
    writeln!(out, "Priority: optional").unwrap();
    writeln!(out, "Standards-Version: 4.6.0").unwrap();

    let mut build_entries = spec
        .get_dependencies(target)
        .map(|d| format_entries(&d.build))
        .unwrap_or_default();
    build_entries.push(format!("debhelper-compat (= {DEBHELPER_COMPAT})"));
    build_entries.sort();
    writeln!(out, "Build-Depends: {}", build_entries.join(", ")).unwrap();

    if let Some(website) = &spec.website {
        writeln!(out, "Homepage: {website}").unwrap();
    }

    writeln!(out).unwrap();
    writeln!(out, "Package: {}", spec.name).unwrap();
    writeln!(
        out,
        "Architecture: {}",
        if spec.noarch { "all" } else { "any" }
    )
    .unwrap();

    let mut depends = spec
        .get_dependencies(target)
        .map(|d| format_entries(&d.runtime))
        .unwrap_or_default();
    depends.push("${shlibs:Depends}".to_string());
    depends.push("${misc:Depends}".to_string());
    writeln!(out, "Depends: {}", depends.join(", ")).unwrap();

    if let Some(recommends) = spec
        .get_dependencies(target)
        .map(|d| format_entries(&d.recommends))
        .filter(|e| !e.is_empty())
    {
        writeln!(out, "Recommends: {}", recommends.join(", ")).unwrap();
    }

    if let Some(replaces) = spec.get_replaces(target).map(format_entries).filter(|e| !e.is_empty()) {
        writeln!(out, "Replaces: {}", replaces.join(", ")).unwrap();
    }
    if let Some(conflicts) = spec.get_conflicts(target).map(format_entries).filter(|e| !e.is_empty()) {
        writeln!(out, "Conflicts: {}", conflicts.join(", ")).unwrap();
    }
    if let Some(provides) = spec.get_provides(target).map(format_entries).filter(|e| !e.is_empty()) {
        writeln!(out, "Provides: {}", provides.join(", ")).unwrap();
    }

    writeln!(out, "Description: {}", spec.description.lines().next().unwrap_or_default()).unwrap();
    for line in spec.description.lines().skip(1) {
        if line.trim().is_empty() {
            writeln!(out, " .").unwrap();
        } else {
            writeln!(out, " {line}").unwrap();
        }
    }

    out
}

fn format_entries(map: &ConstraintMap) -> Vec<String> {
    let mut entries: Vec<String> = map
        .iter()
        .flat_map(|(name, c)| format_entries_for(name, c))
        .collect();
    entries.sort();
    entries
}

fn format_entries_for(name: &str, constraints: &PackageConstraints) -> Vec<String> {
    let arch_suffix = if constraints.arch.is_empty() {
        String::new()
    } else {
        format!(" [{}]", constraints.arch.join(" "))
    };
    if constraints.version.is_empty() {
        vec![format!("{name}{arch_suffix}")]
    } else {
        constraints
            .version
            .iter()
            .map(|v| format!("{name} ({}){arch_suffix}", format_for_deb(v)))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn spec_with(yaml: &str) -> Spec {
        Spec::load(yaml.as_bytes()).unwrap()
    }

    #[test]
    fn debhelper_compat_is_always_present() {
        let spec = spec_with(
            r#"
name: hello
version: "1.0"
revision: "1"
description: a hello package
license: MIT
sources: {}
"#,
        );
        let control = render(&spec, "jammy");
        assert!(control.contains(&format!("debhelper-compat (= {DEBHELPER_COMPAT})")));
    }

    #[test]
    fn runtime_constraint_is_rendered_in_debian_syntax() {
        let spec = spec_with(
            r#"
name: hello
version: "1.0"
revision: "1"
description: a hello package
license: MIT
sources: {}
targets:
  jammy:
    dependencies:
      runtime:
        foo:
          version: ["<< 2.0"]
"#,
        );
        let control = render(&spec, "jammy");
        let depends_line = control.lines().find(|l| l.starts_with("Depends:")).unwrap();
        assert!(depends_line.contains("foo (< 2.0)"));
    }
}
