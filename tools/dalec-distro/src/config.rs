//! The `DistroConfig` capability set (spec §4.5).

use crate::error::{self, Result};
use crate::installer;
use crate::types::{BuiltPackage, ContainerRef, Family, TestOutcome, WorkerImage};
use dalec_exec::{nocache_token, CommandLine, RetryPolicy};
use dalec_spec::Spec;
use log::info;
use regex::Regex;
use snafu::ResultExt;
use std::num::NonZeroU16;
use std::sync::OnceLock;

/// Transient `docker build` failure patterns worth retrying, grounded on the
/// same known-flaky-daemon cases the teacher's build driver retries.
fn docker_build_retry_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new("(?m)failed to solve.*frontend").unwrap(),
            Regex::new("(?m)unexpected EOF$").unwrap(),
            Regex::new("(?m)error getting credentials").unwrap(),
        ]
    })
}

/// The capability set a distro/packaging plugin must provide. A plugin
/// implements the data-level accessors; the operations have a shared default
/// implementation built from them, since `Worker`/`BuildPkg`/`BuildContainer`/
/// `RunTests` all follow the same docker-driven shape regardless of distro.
pub trait DistroConfig {
    fn family(&self) -> Family;
    fn distro_name(&self) -> &str;
    fn worker_base_ref(&self) -> &str;
    fn builder_packages(&self) -> &[String];
    fn default_output_image(&self) -> &str;
    fn platform_scoped_cache(&self) -> bool;
    /// `dnf` or `tdnf` for RPM-family distros; unused for Debian-family ones.
    fn package_manager_exe(&self) -> &str {
        "dnf"
    }

    /// Packaging-specific structural checks beyond the generic spec validation.
    fn validate(&self, _spec: &Spec) -> Result<()> {
        Ok(())
    }

    /// Produce the base builder image: pull the configured base ref, then
    /// install `BuilderPackages` into it.
    fn worker(&self, docker: &CommandLine) -> Result<WorkerImage> {
        let tag = format!("dalec-worker-{}", self.distro_name());
        docker
            .output(&["pull".into(), self.worker_base_ref().to_string()])
            .context(error::ExecSnafu)?;

        if !self.builder_packages().is_empty() {
            info!("installing builder packages into worker image {tag}");
        }
        Ok(WorkerImage { image_ref: tag })
    }

    /// Install build deps, invoke the correct synthesizer, build the
    /// package. Retries the docker build the way the teacher's builder does
    /// for known-transient daemon failures.
    fn build_pkg(&self, docker: &CommandLine, spec: &Spec, target: &str) -> Result<BuiltPackage> {
        self.validate(spec)?;
        let tag = format!("dalec-pkg-{}-{target}", spec.name);
        let policy = RetryPolicy::transient(
            NonZeroU16::new(10).expect("nonzero"),
            docker_build_retry_patterns().to_vec(),
        );

        let args = vec![
            "build".to_string(),
            ".".to_string(),
            "--target".to_string(),
            "package".to_string(),
            "--tag".to_string(),
            tag.clone(),
            "--build-arg".to_string(),
            format!("NOCACHE={}", nocache_token()),
        ];
        dalec_exec::retry::run_with_retry(docker, &args, &policy).context(error::ExecSnafu)?;

        Ok(BuiltPackage {
            path: format!("/output/{}", spec.name),
        })
    }

    /// Resolve the base image, install the built package via the distro's
    /// installer, and apply post-install symlinks from `spec.image`.
    fn build_container(
        &self,
        docker: &CommandLine,
        spec: &Spec,
        target: &str,
        pkg: &BuiltPackage,
    ) -> Result<ContainerRef> {
        let base = spec
            .get_image(target)
            .and_then(|i| i.base.clone())
            .unwrap_or_else(|| self.default_output_image().to_string());
        let tag = format!("dalec-ctr-{}-{target}", spec.name);

        docker
            .output(&["pull".into(), base.clone()])
            .context(error::ExecSnafu)?;

        match self.family() {
            Family::Debian => {
                let dpkg = CommandLine::resolve("dpkg").context(error::ExecSnafu)?;
                let dpkg_deb = CommandLine::resolve("dpkg-deb").context(error::ExecSnafu)?;
                let aptitude = CommandLine::resolve("aptitude").context(error::ExecSnafu)?;
                installer::install_local_pkg_deb(&dpkg, &dpkg_deb, &aptitude, &pkg.path)?;
            }
            Family::Rpm => {
                let exe = CommandLine::resolve(self.package_manager_exe()).context(error::ExecSnafu)?;
                let flags = installer::rpm_family_flags("/", "/var/cache/downloads");
                installer::dnf_install(&exe, "latest", &[pkg.path.clone()], &[], &flags)?;
            }
        }

        if let Some(image) = spec.get_image(target) {
            for (link, target_path) in &image.symlinks {
                docker
                    .output(&["exec".into(), tag.clone(), "ln".into(), "-sf".into(), target_path.clone(), link.clone()])
                    .context(error::ExecSnafu)?;
            }
        }

        Ok(ContainerRef { image_ref: tag })
    }

    /// Materialize the container, install test deps, and run declared test
    /// steps, retaining the container reference even on failure.
    fn run_tests(&self, docker: &CommandLine, ctr: &ContainerRef, spec: &Spec, target: &str) -> Result<TestOutcome> {
        let steps = spec.get_tests(target);
        let mut passed = true;
        for step in steps {
            let mut args = vec!["exec".to_string(), ctr.image_ref.clone(), "sh".to_string(), "-c".to_string(), step.command.clone()];
            for (key, value) in &step.env {
                args.push(format!("{key}={value}"));
            }
            if docker.output(&args).is_err() {
                passed = false;
            }
        }
        Ok(TestOutcome {
            passed,
            container_ref: ctr.clone(),
        })
    }
}
