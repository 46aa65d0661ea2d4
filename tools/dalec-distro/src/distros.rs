//! Concrete `DistroConfig` implementations (spec §4.5, §9).

use crate::config::DistroConfig;
use crate::types::Family;

/// Debian-family distro: `apt`/`dpkg`-based install, the `deb` synthesizer.
pub struct DebianFamily {
    pub name: &'static str,
    pub worker_base_ref: &'static str,
    pub builder_packages: Vec<String>,
    pub default_output_image: &'static str,
}

impl DistroConfig for DebianFamily {
    fn family(&self) -> Family {
        Family::Debian
    }
    fn distro_name(&self) -> &str {
        self.name
    }
    fn worker_base_ref(&self) -> &str {
        self.worker_base_ref
    }
    fn builder_packages(&self) -> &[String] {
        &self.builder_packages
    }
    fn default_output_image(&self) -> &str {
        self.default_output_image
    }
    fn platform_scoped_cache(&self) -> bool {
        false
    }
}

pub fn jammy() -> DebianFamily {
    DebianFamily {
        name: "jammy",
        worker_base_ref: "docker.io/library/ubuntu:22.04",
        builder_packages: vec![
            "build-essential".to_string(),
            "debhelper".to_string(),
            "devscripts".to_string(),
            "dh-exec".to_string(),
            "quilt".to_string(),
        ],
        default_output_image: "docker.io/library/ubuntu:22.04",
    }
}

/// RPM-family distro. `platform_scoped_cache` is set per the §9 rule:
/// AlmaLinux's mirrorlist URL omits `$basearch`, so its package-manager
/// cache must be keyed by platform as well as distro to avoid cross-arch
/// corruption; Fedora/Azure Linux mirrors include `$basearch` and don't need it.
pub struct RpmFamily {
    pub name: &'static str,
    pub exe: &'static str,
    pub worker_base_ref: &'static str,
    pub builder_packages: Vec<String>,
    pub default_output_image: &'static str,
    pub platform_scoped_cache: bool,
}

impl DistroConfig for RpmFamily {
    fn family(&self) -> Family {
        Family::Rpm
    }
    fn distro_name(&self) -> &str {
        self.name
    }
    fn worker_base_ref(&self) -> &str {
        self.worker_base_ref
    }
    fn builder_packages(&self) -> &[String] {
        &self.builder_packages
    }
    fn default_output_image(&self) -> &str {
        self.default_output_image
    }
    fn platform_scoped_cache(&self) -> bool {
        self.platform_scoped_cache
    }
    fn package_manager_exe(&self) -> &str {
        self.exe
    }
}

pub fn almalinux9() -> RpmFamily {
    RpmFamily {
        name: "almalinux9",
        exe: "dnf",
        worker_base_ref: "docker.io/library/almalinux:9",
        builder_packages: vec!["rpm-build".to_string(), "rpmdevtools".to_string()],
        default_output_image: "docker.io/library/almalinux:9",
        platform_scoped_cache: true,
    }
}

pub fn azlinux3() -> RpmFamily {
    RpmFamily {
        name: "azlinux3",
        exe: "tdnf",
        worker_base_ref: "mcr.microsoft.com/azurelinux/base/core:3.0",
        builder_packages: vec!["rpm-build".to_string(), "build-essential".to_string()],
        default_output_image: "mcr.microsoft.com/azurelinux/base/core:3.0",
        platform_scoped_cache: false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn almalinux_is_platform_scoped_azlinux_is_not() {
        assert!(almalinux9().platform_scoped_cache());
        assert!(!azlinux3().platform_scoped_cache());
    }

    #[test]
    fn jammy_is_debian_family() {
        assert_eq!(jammy().family(), Family::Debian);
    }
}
