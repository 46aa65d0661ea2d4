//! The helper scripts under `debian/dalec/` that `rules` and `control`
//! reference: env/step setup, quilt patch application, and sanitized
//! source-key restoration (spec §3, §4.2, §9).

use dalec_spec::source::Generator;
use dalec_spec::Spec;
use std::collections::BTreeSet;
use std::fmt::Write;

/// `debian/dalec/build.sh`: exports `spec.build.env`, then runs each
/// declared step in order with its own step-local overrides layered on top.
pub fn build_sh(spec: &Spec) -> String {
    let mut out = String::from("#!/bin/sh\nset -eu\n\n");
    for (key, value) in &spec.build.env {
        writeln!(out, "export {key}={}", shell_quote(value)).unwrap();
    }
    for generator in generators_used(spec) {
        match generator {
            Generator::Gomod => writeln!(out, "export GOMODCACHE=\"$PWD/__gomods\"").unwrap(),
            Generator::Cargohome => writeln!(out, "export CARGO_HOME=\"$PWD/__cargohome\"").unwrap(),
            Generator::Pip => writeln!(out, "export PIP_CACHE_DIR=\"$PWD/__pipdeps\"").unwrap(),
            Generator::Node => writeln!(out, "export npm_config_cache=\"$PWD/__nodemodules\"").unwrap(),
        }
    }
    writeln!(out).unwrap();
    for step in &spec.build.steps {
        for (key, value) in &step.env {
            write!(out, "{key}={} ", shell_quote(value)).unwrap();
        }
        writeln!(out, "{}", step.command).unwrap();
    }
    out
}

/// `debian/dalec/patch.sh`: pushes every quilt patch named in the series file.
pub fn patch_sh() -> &'static str {
    "#!/bin/sh\nset -eu\nquilt push -a\n"
}

/// `debian/dalec/fix_sources.sh`: restores any source keys that had to be
/// percent-escaped to survive as a filesystem path (spec §9).
pub fn fix_sources_sh(sanitized_keys: &[String]) -> String {
    let mut out = String::from("#!/bin/sh\nset -eu\n\n");
    for command in crate::sanitize::restore_commands(sanitized_keys) {
        writeln!(out, "{command}").unwrap();
    }
    out
}

fn generators_used(spec: &Spec) -> Vec<Generator> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for source in spec.sources.values() {
        for generator in &source.generate {
            if seen.insert(format!("{generator:?}")) {
                out.push(*generator);
            }
        }
    }
    out
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(test)]
mod test {
    use super::*;

    fn spec_with(yaml: &str) -> Spec {
        Spec::load(yaml.as_bytes()).unwrap()
    }

    #[test]
    fn build_env_and_steps_are_emitted_in_order() {
        let spec = spec_with(
            r#"
name: hello
version: "1.0"
revision: "1"
description: d
license: MIT
sources: {}
build:
  env:
    FOO: bar
  steps:
    - command: "make"
    - command: "make install"
"#,
        );
        let script = build_sh(&spec);
        assert!(script.contains("export FOO='bar'"));
        let make_pos = script.find("make\n").unwrap();
        let install_pos = script.find("make install").unwrap();
        assert!(make_pos < install_pos);
    }

    #[test]
    fn fix_sources_only_restores_sanitized_keys() {
        let script = fix_sources_sh(&["plain".to_string(), "a/b".to_string()]);
        assert!(script.contains("mv -- 'a%2Fb' 'a/b'"));
        assert!(!script.contains("plain' 'plain"));
    }
}
