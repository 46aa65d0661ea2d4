//! The request driver (spec §6): spec loader → mux → distro handler →
//! synthesizer, with sources resolved in between.

use crate::request::BuildRequest;
use crate::registry;
use anyhow::{Context, Result};
use dalec_distro::Family;
use dalec_exec::CommandLine;
use dalec_spec::Spec;
use log::info;
use std::fs;
use std::path::Path;

pub fn run_build(spec_bytes: &[u8], request: &BuildRequest) -> Result<()> {
    let registry = registry::build();
    let dispatch = registry
        .handle(&request.target)
        .with_context(|| format!("failed to dispatch target '{}'", request.target))?;

    let spec = Spec::load_with_args(spec_bytes, &request.build_args)
        .context("failed to load and substitute spec")?;
    let target = request.effective_target(dispatch.dalec_target).to_string();
    let handler = dispatch.handler;

    handler.validate(&spec).context("distro validation failed")?;

    let output_dir = Path::new("target/dalec-out").join(&spec.name).join(&target);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output dir {}", output_dir.display()))?;

    match handler.family() {
        Family::Debian => {
            let layout = dalec_deb::render(&spec, &target, handler.distro_name())
                .context("failed to render deb packaging layout")?;
            write_layout(&output_dir, &layout.files)?;
        }
        Family::Rpm => {
            let layout = dalec_rpm::render(&spec, &target).context("failed to render rpm packaging layout")?;
            write_layout(&output_dir, &layout.files)?;
            write_binary_layout(&output_dir, &layout.binary_files)?;
        }
    }

    let docker = CommandLine::resolve("docker").context("docker is required to drive the build")?;
    let worker = handler.worker(&docker).context("failed to build worker image")?;
    info!("worker image ready: {}", worker.image_ref);

    let pkg = handler
        .build_pkg(&docker, &spec, &target)
        .context("failed to build package")?;
    let container = handler
        .build_container(&docker, &spec, &target, &pkg)
        .context("failed to assemble container")?;

    let outcome = handler
        .run_tests(&docker, &container, &spec, &target)
        .context("failed to run declared tests")?;
    if !outcome.passed {
        anyhow::bail!(
            "tests failed for target '{target}'; container '{}' retained for debugging",
            outcome.container_ref.image_ref
        );
    }

    info!("build complete: {} ({target})", spec.name);
    Ok(())
}

fn write_layout(root: &Path, files: &std::collections::BTreeMap<String, String>) -> Result<()> {
    for (path, content) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&full, content).with_context(|| format!("failed to write {}", full.display()))?;
    }
    Ok(())
}

fn write_binary_layout(root: &Path, files: &std::collections::BTreeMap<String, Vec<u8>>) -> Result<()> {
    for (path, content) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&full, content).with_context(|| format!("failed to write {}", full.display()))?;
    }
    Ok(())
}
