//! The concrete seed scenarios from the orchestrator's testable-properties
//! section, exercised directly against the synthesizer and mux crates.

use dalec_mux::{Descriptor, Registry};
use dalec_spec::Spec;
use std::collections::BTreeMap;

fn spec_from(yaml: &str) -> Spec {
    Spec::load(yaml.as_bytes()).unwrap()
}

#[test]
fn e1_minimal_hello_package_installs_to_usr_bin() {
    let spec = spec_from(
        r#"
name: hello
version: "1.0"
revision: "1"
description: a hello package
license: MIT
sources:
  src:
    inline:
      dir:
        files:
          Makefile: { contents: "all:\n\techo hi\n" }
artifacts:
  binaries:
    src/hello: {}
build:
  steps:
    - command: "make"
targets:
  jammy: {}
"#,
    );
    let layout = dalec_deb::render(&spec, "jammy", "jammy").unwrap();
    let control = &layout.files["debian/control"];
    assert!(control.contains("Build-Depends:"));
    assert!(control.contains(&format!("debhelper-compat (= {})", dalec_deb::control::DEBHELPER_COMPAT)));

    let install = &layout.files["debian/hello.install"];
    assert_eq!(install.trim(), "src/hello /usr/bin/");
}

#[test]
fn e2_doubled_operator_collapses_to_debian_syntax() {
    let spec = spec_from(
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
    let layout = dalec_deb::render(&spec, "jammy", "jammy").unwrap();
    let control = &layout.files["debian/control"];
    let depends = control.lines().find(|l| l.starts_with("Depends:")).unwrap();
    assert!(depends.contains("foo (< 2.0)"));
}

#[test]
fn e3_patch_sources_are_numbered_after_their_dependents() {
    let spec = spec_from(
        r#"
name: hello
version: "1.0"
revision: "1"
description: a hello package
license: MIT
sources:
  a:
    inline:
      dir:
        files:
          f: { contents: "x" }
  b:
    inline:
      file:
        contents: "plain file"
  p:
    inline:
      file:
        contents: "diff content"
patches:
  a:
    - source: p
      strip: 1
"#,
    );
    let layout = dalec_rpm::render(&spec, "jammy").unwrap();
    let spec_file = &layout.files["SPECS/hello.spec"];
    assert!(spec_file.contains("Source0: a.tar.gz"));
    assert!(spec_file.contains("Source1: b"));
    assert!(spec_file.contains("Source2: p"));

    let prep = spec_file.split("%prep\n").nth(1).unwrap().split("\n%build").next().unwrap();
    assert_eq!(
        prep,
        "tar -C %{_builddir} -xzf %{_sourcedir}/a.tar.gz\n\
cp -a %{_sourcedir}/b .\n\
cp -a %{_sourcedir}/p .\n\
patch -d a -p1 --input %{_sourcedir}/p\n"
    );

    assert_eq!(layout.binary_files["SOURCES/b"], b"plain file");
    assert!(layout.binary_files.contains_key("SOURCES/a.tar.gz"));
}

#[test]
fn e4_mixed_enable_systemd_units_get_no_enable_and_override() {
    let spec = spec_from(
        r#"
name: hello
version: "1.0"
revision: "1"
description: a hello package
license: MIT
sources: {}
artifacts:
  systemd:
    units:
      foo.service: { enable: true }
      foo.socket: { enable: false }
"#,
    );
    let layout = dalec_deb::render(&spec, "jammy", "jammy").unwrap();
    let rules = &layout.files["debian/rules"];
    assert!(rules.contains("override_dh_installsystemd:"));
    assert!(rules.contains("dh_installsystemd --name=foo.service"));
    assert!(rules.contains("dh_installsystemd --name=foo.socket --no-enable"));
    assert!(layout
        .files
        .keys()
        .any(|k| k.ends_with("custom_systemd_postinst.sh.partial")));
}

#[test]
fn e5_gomod_generator_contributes_a_pseudo_source_and_env() {
    let spec = spec_from(
        r#"
name: hello
version: "1.0"
revision: "1"
description: a hello package
license: MIT
sources:
  mod:
    inline:
      dir:
        files: {}
    generate:
      - gomod
"#,
    );
    let resolved = dalec_source::resolve(&spec).unwrap();
    assert!(resolved.sources.contains_key("__gomods"));

    let layout = dalec_deb::render(&spec, "jammy", "jammy").unwrap();
    let build_sh = &layout.files["debian/dalec/build.sh"];
    assert!(build_sh.contains("export GOMODCACHE=\"$PWD/__gomods\""));
}

#[test]
fn e6_unknown_subtarget_fails_before_any_spec_work() {
    let mut registry: Registry<&'static str> = Registry::new();
    registry
        .add(
            "jammy",
            "jammy-handler",
            Descriptor {
                name: "jammy".to_string(),
                description: "".to_string(),
                default: true,
                group: None,
            },
        )
        .unwrap();

    let err = registry.handle("unknown/deb").unwrap_err();
    assert!(matches!(err, dalec_mux::Error::UnknownTarget { .. }));
}

#[test]
fn build_args_substitute_before_validation() {
    let mut args = BTreeMap::new();
    args.insert("VERSION".to_string(), "2.5".to_string());
    let spec = Spec::load_with_args(
        br#"
name: hello
version: "${VERSION}"
revision: "1"
description: a hello package
license: MIT
sources: {}
"#,
        &args,
    )
    .unwrap();
    assert_eq!(spec.version, "2.5");
}
