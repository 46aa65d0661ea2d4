//! Rendering dependency fields (`Requires`, `BuildRequires`, `Recommends`,
//! `Provides`, `Obsoletes`, `Conflicts`) with `%ifarch` wrapping for
//! arch-scoped constraints (spec §4.4).

use dalec_spec::deps::{ConstraintMap, PackageConstraints};
use dalec_spec::version::format_for_rpm;
use std::fmt::Write;

/// Render every entry under `tag` (e.g. `"Requires"`), one line per
/// name/version/arch combination, wrapping arch-scoped entries in
/// `%ifarch ... %endif`.
pub fn render_field(out: &mut String, tag: &str, map: &ConstraintMap) {
    for (name, constraints) in map {
        for line in field_lines(tag, name, constraints) {
            writeln!(out, "{line}").unwrap();
        }
    }
}

fn field_lines(tag: &str, name: &str, constraints: &PackageConstraints) -> Vec<String> {
    let bodies: Vec<String> = if constraints.version.is_empty() {
        vec![format!("{tag}: {name}")]
    } else {
        constraints
            .version
            .iter()
            .map(|v| format!("{tag}: {name} {}", format_for_rpm(v)))
            .collect()
    };

    if constraints.arch.is_empty() {
        return bodies;
    }

    let mut wrapped = Vec::with_capacity(bodies.len() + 2);
    wrapped.push(format!("%ifarch {}", constraints.arch.join(" ")));
    wrapped.extend(bodies);
    wrapped.push("%endif".to_string());
    wrapped
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn bare_constraint_has_no_version() {
        let mut map: ConstraintMap = BTreeMap::new();
        map.insert("foo".to_string(), PackageConstraints::default());
        let mut out = String::new();
        render_field(&mut out, "Requires", &map);
        assert_eq!(out, "Requires: foo\n");
    }

    #[test]
    fn arch_scoped_constraint_is_wrapped() {
        let mut map: ConstraintMap = BTreeMap::new();
        map.insert(
            "foo".to_string(),
            PackageConstraints {
                version: vec!["<< 2.0".to_string()],
                arch: vec!["x86_64".to_string()],
            },
        );
        let mut out = String::new();
        render_field(&mut out, "Requires", &map);
        assert_eq!(out, "%ifarch x86_64\nRequires: foo < 2.0\n%endif\n");
    }
}
