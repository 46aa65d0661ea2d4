//! Rendering the spec file's `%changelog` section (spec §4.4).

use dalec_spec::changelog::ChangelogEntry;
use dalec_spec::Spec;
use std::fmt::Write;

pub fn render(spec: &Spec) -> String {
    let mut entries: Vec<&ChangelogEntry> = spec.changelog.iter().collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    let mut out = String::new();
    if entries.is_empty() {
        render_entry(&mut out, spec, "unspecified", "Dummy changelog", &["Initial release.".to_string()]);
        return out;
    }
    for entry in entries {
        render_entry(&mut out, spec, &entry.author, &entry.date, &entry.changes);
    }
    out
}

fn render_entry(out: &mut String, spec: &Spec, author: &str, date: &str, changes: &[String]) {
    writeln!(out, "* {date} {author} - {}-{}", spec.version, spec.revision).unwrap();
    for change in changes {
        writeln!(out, "- {change}").unwrap();
    }
    writeln!(out).unwrap();
}

#[cfg(test)]
mod test {
    use super::*;

    fn spec_with(yaml: &str) -> Spec {
        Spec::load(yaml.as_bytes()).unwrap()
    }

    #[test]
    fn missing_changelog_gets_a_dummy_entry() {
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
        assert!(render(&spec).contains("Dummy changelog"));
    }
}
