//! Version-constraint parsing shared by the deb and rpm synthesizers (spec
//! §4.4, §8 property 4). A constraint string is either a bare version (no
//! operator, meaning "equals") or an operator followed by a version.

const OPERATORS: &[&str] = &["<<", ">>", ">=", "<=", "="];

fn split_operator(raw: &str) -> (Option<&str>, &str) {
    let trimmed = raw.trim();
    for op in OPERATORS {
        if let Some(rest) = trimmed.strip_prefix(op) {
            return (Some(op), rest.trim());
        }
    }
    (None, trimmed)
}

/// Render a constraint the way Dalec's `control` file emission expects it:
/// the doubled canonical operators collapse to Debian's single-character
/// form (`<<` -> `<`, `>>` -> `>`), `=` stays `=`, and a bare version
/// defaults to `=`.
pub fn format_for_deb(raw: &str) -> String {
    let (op, version) = split_operator(raw);
    let deb_op = match op {
        None => "=",
        Some("=") => "=",
        Some("<<") => "<",
        Some(">>") => ">",
        Some(other) => other,
    };
    format!("{deb_op} {version}")
}

/// Render a constraint the way an RPM spec file expects it (spec §4.4):
/// `<<`/`>>` become `<`/`>`, `=` becomes `==`, a bare version becomes `==`,
/// everything else (`>=`, `<=`) passes through.
pub fn format_for_rpm(raw: &str) -> String {
    let (op, version) = split_operator(raw);
    let rpm_op = match op {
        None => "==",
        Some("=") => "==",
        Some("<<") => "<",
        Some(">>") => ">",
        Some(other) => other,
    };
    format!("{rpm_op} {version}")
}
