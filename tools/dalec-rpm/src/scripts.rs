//! The `%build` step script: env/generator setup plus declared build steps
//! (spec §3, §4.4).

use dalec_spec::source::Generator;
use dalec_spec::Spec;
use std::collections::BTreeSet;
use std::fmt::Write;

pub fn build_sh(spec: &Spec) -> String {
    let mut out = String::new();
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
    for step in &spec.build.steps {
        for (key, value) in &step.env {
            write!(out, "{key}={} ", shell_quote(value)).unwrap();
        }
        writeln!(out, "{}", step.command).unwrap();
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

    #[test]
    fn steps_are_emitted_in_declared_order() {
        let spec = Spec::load(
            br#"
name: hello
version: "1.0"
revision: "1"
description: d
license: MIT
sources: {}
build:
  steps:
    - command: "make"
    - command: "make install"
"#,
        )
        .unwrap();
        let script = build_sh(&spec);
        assert!(script.find("make\n").unwrap() < script.find("make install").unwrap());
    }
}
