//! Rendering the `<name>.spec` file (spec §4.4).

use crate::{deps, postscripts};
use dalec_source::Resolved;
use dalec_spec::deps::PackageDependencies;
use dalec_spec::Spec;
use std::fmt::Write;

pub fn render(spec: &Spec, target: &str, resolved: &Resolved) -> String {
    let mut out = String::new();

    writeln!(out, "Name: {}", spec.name).unwrap();
    writeln!(out, "Version: {}", spec.version).unwrap();
    writeln!(out, "Release: {}%{{?dist}}", spec.revision).unwrap();
    writeln!(out, "Summary: {}", spec.description.lines().next().unwrap_or_default()).unwrap();
    writeln!(out, "License: {}", spec.license).unwrap();
    if let Some(website) = &spec.website {
        writeln!(out, "URL: {website}").unwrap();
    }
    if let Some(vendor) = &spec.vendor {
        writeln!(out, "Vendor: {vendor}").unwrap();
    }
    writeln!(out, "BuildArch: {}", if spec.noarch { "noarch" } else { "%{_arch}" }).unwrap();

    for (index, key) in resolved.sources.keys().enumerate() {
        writeln!(out, "Source{index}: {}", resolved.sources[key].output_name()).unwrap();
    }

    let empty = PackageDependencies::default();
    let dependencies = spec.get_dependencies(target).unwrap_or(&empty);
    deps::render_field(&mut out, "BuildRequires", &dependencies.build);
    deps::render_field(&mut out, "Requires", &dependencies.runtime);
    deps::render_field(&mut out, "Recommends", &dependencies.recommends);

    if let Some(provides) = spec.get_provides(target) {
        deps::render_field(&mut out, "Provides", provides);
    }
    if let Some(conflicts) = spec.get_conflicts(target) {
        deps::render_field(&mut out, "Conflicts", conflicts);
    }
    if let Some(replaces) = spec.get_replaces(target) {
        deps::render_field(&mut out, "Obsoletes", replaces);
    }

    if let Some(artifacts) = spec.get_artifacts(target) {
        for line in postscripts::order_with_requires(&artifacts.systemd) {
            writeln!(out, "{line}").unwrap();
        }
    }

    writeln!(out).unwrap();
    writeln!(out, "%description").unwrap();
    writeln!(out, "{}", spec.description).unwrap();

    writeln!(out).unwrap();
    writeln!(out, "%prep").unwrap();
    for line in crate::prep::render(resolved) {
        writeln!(out, "{line}").unwrap();
    }

    writeln!(out).unwrap();
    writeln!(out, "%build").unwrap();
    writeln!(out, "%{{_sourcedir}}/build.sh").unwrap();

    writeln!(out).unwrap();
    writeln!(out, "%install").unwrap();
    writeln!(out, "rm -rf %{{buildroot}}").unwrap();
    if let Some(artifacts) = spec.get_artifacts(target) {
        for line in crate::install::render(artifacts) {
            writeln!(out, "{line}").unwrap();
        }
    }

    if let Some(artifacts) = spec.get_artifacts(target) {
        if let Some(pre) = postscripts::pre(&artifacts.users, &artifacts.groups) {
            writeln!(out, "\n%pre\n{pre}").unwrap();
        }
        if let Some(post) = postscripts::post(&artifacts.systemd) {
            writeln!(out, "\n%post\n{post}").unwrap();
        }
        if let Some(preun) = postscripts::preun(&artifacts.systemd) {
            writeln!(out, "\n%preun\n{preun}").unwrap();
        }
        if let Some(postun) = postscripts::postun(&artifacts.systemd) {
            writeln!(out, "\n%postun\n{postun}").unwrap();
        }

        writeln!(out, "\n%files").unwrap();
        for line in crate::files::render(artifacts) {
            writeln!(out, "{line}").unwrap();
        }
    } else {
        writeln!(out, "\n%files").unwrap();
    }

    writeln!(out).unwrap();
    writeln!(out, "%changelog").unwrap();
    write!(out, "{}", crate::changelog::render(spec)).unwrap();

    out
}
