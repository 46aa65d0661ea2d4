//! Debian source-key sanitization (spec §3 invariants, §9 open question).
//!
//! Source keys are used as directory names inside the debian source tree.
//! Debian source package names only tolerate `[A-Za-z0-9+._-]`; anything else
//! in a key is percent-hex-escaped so the mapping is deterministic and, via
//! [`restore_commands`], reversible at unpack time.

/// A key is sanitized if it contains a byte outside `[A-Za-z0-9+._-]`.
pub fn sanitize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'+' | b'.' | b'_' | b'-') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

pub fn needs_sanitizing(key: &str) -> bool {
    sanitize_key(key) != key
}

/// Shell `mv` commands that restore every sanitized key back to its original
/// name, for inclusion in `dalec/fix_sources.sh`.
pub fn restore_commands<'a>(keys: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    let mut commands: Vec<String> = keys
        .into_iter()
        .filter(|k| needs_sanitizing(k))
        .map(|k| format!("mv -- '{}' '{}'", sanitize_key(k), k))
        .collect();
    commands.sort();
    commands
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn plain_keys_pass_through() {
        assert_eq!(sanitize_key("my-package_1.0"), "my-package_1.0");
        assert!(!needs_sanitizing("my-package_1.0"));
    }

    #[test]
    fn illegal_characters_are_percent_escaped() {
        assert_eq!(sanitize_key("a/b"), "a%2Fb");
        assert_eq!(sanitize_key("a b"), "a%20b");
        assert!(needs_sanitizing("a/b"));
    }

    #[test]
    fn restore_commands_are_sorted_and_only_cover_sanitized_keys() {
        let keys = vec!["plain".to_string(), "a/b".to_string(), "c d".to_string()];
        let commands = restore_commands(&keys);
        assert_eq!(
            commands,
            vec![
                "mv -- 'a%2Fb' 'a/b'".to_string(),
                "mv -- 'c%20d' 'c d'".to_string(),
            ]
        );
    }
}
