//! Explicit registry construction (spec §4.6, §9): handlers are built here
//! at request-driver setup time rather than registered by init-time side
//! effect, and injected into the mux as an immutable value.

use dalec_distro::DistroConfig;
use dalec_mux::{Descriptor, Registry};

pub fn build() -> Registry<Box<dyn DistroConfig>> {
    let mut registry = Registry::new();

    registry
        .add(
            "jammy",
            Box::new(dalec_distro::distros::jammy()) as Box<dyn DistroConfig>,
            Descriptor {
                name: "jammy".to_string(),
                description: "Ubuntu 22.04 (deb)".to_string(),
                default: true,
                group: Some("deb".to_string()),
            },
        )
        .expect("jammy is the first registration");

    registry
        .add(
            "almalinux9",
            Box::new(dalec_distro::distros::almalinux9()) as Box<dyn DistroConfig>,
            Descriptor {
                name: "almalinux9".to_string(),
                description: "AlmaLinux 9 (rpm)".to_string(),
                default: false,
                group: Some("rpm".to_string()),
            },
        )
        .expect("almalinux9 does not collide with jammy");

    registry
        .add(
            "azlinux3",
            Box::new(dalec_distro::distros::azlinux3()) as Box<dyn DistroConfig>,
            Descriptor {
                name: "azlinux3".to_string(),
                description: "Azure Linux 3 (rpm)".to_string(),
                default: false,
                group: Some("rpm".to_string()),
            },
        )
        .expect("azlinux3 does not collide with jammy or almalinux9");

    registry
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn jammy_is_the_default() {
        let registry = build();
        let dispatch = registry.handle("").unwrap();
        assert_eq!(dispatch.handler.distro_name(), "jammy");
    }

    #[test]
    fn unknown_subtarget_is_rejected() {
        let registry = build();
        assert!(registry.handle("unknown/deb").is_err());
    }
}
