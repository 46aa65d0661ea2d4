//! Package installers for `BuildContainer` (spec §4.5).

use crate::error::{self, Result};
use dalec_exec::CommandLine;
use snafu::ResultExt;

/// Debian-family install: `dpkg -i --force-depends`, read the package name
/// back via `dpkg-deb -f`, then run `aptitude` with a reject hint so its
/// solver pins dependencies backward instead of uninstalling the target
/// package to satisfy an "always latest" constraint.
pub fn install_local_pkg_deb(
    dpkg: &CommandLine,
    dpkg_deb: &CommandLine,
    aptitude: &CommandLine,
    deb_path: &str,
) -> Result<()> {
    dpkg.output(&["-i".into(), "--force-depends".into(), deb_path.into()])
        .context(error::ExecSnafu)?;

    let field = dpkg_deb
        .output(&["-f".into(), deb_path.into(), "Package".into()])
        .context(error::ExecSnafu)?;
    let pkg = String::from_utf8_lossy(&field).trim().to_string();

    aptitude
        .output(&[
            "install".into(),
            "-y".into(),
            "-f".into(),
            "-o".into(),
            format!("Aptitude::ProblemResolver::Hints::=reject {pkg} :UNINST"),
        ])
        .context(error::ExecSnafu)?;
    Ok(())
}

/// RPM-family flag set shared by `dnf`/`tdnf` downloads (spec §4.5).
pub fn rpm_family_flags(installroot: &str, downloaddir: &str) -> Vec<String> {
    vec![
        "--nogpgcheck".to_string(),
        "--installroot".to_string(),
        installroot.to_string(),
        "--downloadonly".to_string(),
        "--alldeps".to_string(),
        "--downloaddir".to_string(),
        downloaddir.to_string(),
        "--setopt=tsflags=nodocs".to_string(),
    ]
}

/// Install via `dnf`/`tdnf` (the executable is the only distinguishing
/// parameter; both speak the same CLI surface for these operations).
///
/// `gpg_keys` works around tdnf not auto-importing `file:///`-sourced repo
/// keys: each is imported explicitly before refreshing the cache.
pub fn dnf_install(
    exe: &CommandLine,
    releasever: &str,
    pkgs: &[String],
    gpg_keys: &[String],
    flags: &[String],
) -> Result<()> {
    let gpg = CommandLine::resolve("gpg").context(error::ExecSnafu)?;
    for key in gpg_keys {
        gpg.output(&["--import".into(), key.clone()]).context(error::ExecSnafu)?;
    }

    exe.output(&["makecache".into(), "-y".into()]).context(error::ExecSnafu)?;

    let mut args = vec![
        "-y".to_string(),
        "--refresh".to_string(),
        "--setopt=varsdir=/etc/dnf/vars".to_string(),
        format!("--releasever={releasever}"),
    ];
    args.extend_from_slice(flags);
    args.push("install".to_string());
    args.extend(pkgs.iter().cloned());
    exe.output(&args).context(error::ExecSnafu)?;
    Ok(())
}

/// Cache mount path for a package-manager install, namespaced by distro and
/// optionally by platform (spec §4.5, §9).
pub fn cache_mount_key(exe_name: &str, distro: &str, platform: Option<&str>, platform_scoped: bool) -> String {
    match (platform_scoped, platform) {
        (true, Some(platform)) => format!("/var/cache/{exe_name}-{distro}-{platform}"),
        _ => format!("/var/cache/{exe_name}-{distro}"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cache_key_is_platform_scoped_only_when_requested() {
        assert_eq!(
            cache_mount_key("tdnf", "almalinux9", Some("linux/arm64"), true),
            "/var/cache/tdnf-almalinux9-linux/arm64"
        );
        assert_eq!(
            cache_mount_key("dnf", "fedora39", Some("linux/arm64"), false),
            "/var/cache/dnf-fedora39"
        );
    }

    #[test]
    fn rpm_flags_include_nodocs_and_downloadonly() {
        let flags = rpm_family_flags("/installroot", "/downloads");
        assert!(flags.contains(&"--setopt=tsflags=nodocs".to_string()));
        assert!(flags.contains(&"--downloadonly".to_string()));
    }
}
