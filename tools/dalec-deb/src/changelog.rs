//! Rendering `debian/changelog` (spec §4.3).

use dalec_spec::changelog::ChangelogEntry;
use dalec_spec::Spec;
use std::fmt::Write;

pub fn render(spec: &Spec, distro: &str) -> String {
    let mut entries: Vec<&ChangelogEntry> = spec.changelog.iter().collect();
    // Newest-first by date; declared dates are opaque strings, so a
    // lexicographic sort only gives the right order for ISO-8601 dates, but
    // that's the convention Dalec specs are expected to use.
    entries.sort_by(|a, b| b.date.cmp(&a.date));

    let mut out = String::new();
    if entries.is_empty() {
        render_entry(
            &mut out,
            spec,
            distro,
            "unspecified",
            "Dummy changelog",
            &["Initial release.".to_string()],
        );
        return out;
    }

    for entry in entries {
        render_entry(&mut out, spec, distro, &entry.author, &entry.date, &entry.changes);
    }
    out
}

fn render_entry(out: &mut String, spec: &Spec, distro: &str, author: &str, date: &str, changes: &[String]) {
    writeln!(
        out,
        "{} ({}-{}) {}; urgency=medium",
        spec.name, spec.version, spec.revision, distro
    )
    .unwrap();
    writeln!(out).unwrap();
    for change in changes {
        writeln!(out, "  * {change}").unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, " -- {author}  {date}").unwrap();
    writeln!(out).unwrap();
}
