//! Rendering the `%prep` section (spec §4.4, §8 E3): stage every source into
//! the build tree, then apply declared patches.

use dalec_source::Resolved;

pub fn render(resolved: &Resolved) -> Vec<String> {
    let mut lines = Vec::new();

    for node in resolved.sources.values() {
        if node.is_dir {
            lines.push(format!("tar -C %{{_builddir}} -xzf %{{_sourcedir}}/{}", node.output_name()));
        } else {
            lines.push(format!("cp -a %{{_sourcedir}}/{} .", node.output_name()));
        }
    }

    for (source, steps) in &resolved.patches {
        for step in steps {
            lines.push(format!(
                "patch -d {source} -p{} --input %{{_sourcedir}}/{}",
                step.strip, step.patch_source
            ));
        }
    }

    lines
}

#[cfg(test)]
mod test {
    use super::*;
    use dalec_spec::Spec;

    #[test]
    fn e3_tars_dirs_copies_files_then_patches() {
        let spec = Spec::load(
            br#"
name: hello
version: "1.0"
revision: "1"
description: d
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
        )
        .unwrap();
        let resolved = dalec_source::resolve(&spec).unwrap();
        let lines = render(&resolved);
        assert_eq!(
            lines,
            vec![
                "tar -C %{_builddir} -xzf %{_sourcedir}/a.tar.gz".to_string(),
                "cp -a %{_sourcedir}/b .".to_string(),
                "cp -a %{_sourcedir}/p .".to_string(),
                "patch -d a -p1 --input %{_sourcedir}/p".to_string(),
            ]
        );
    }
}
