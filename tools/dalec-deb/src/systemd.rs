//! Rules-file and postinst handling for systemd units (spec §4.3, §8 E4).

use dalec_spec::artifact::{systemd_basenames_with_mixed_enable, SystemdConfig};

/// The path the custom postinst fragment is copied from when a unit
/// basename has both enabled and disabled units (spec §8 E4).
pub const CUSTOM_POSTINST_FRAGMENT_PATH: &str = "debian/dalec/custom_systemd_postinst.sh.partial";

pub fn needs_override(systemd: &SystemdConfig) -> bool {
    systemd.units.values().any(|u| !u.enable) || has_mixed_enable(systemd)
}

pub fn has_mixed_enable(systemd: &SystemdConfig) -> bool {
    !systemd_basenames_with_mixed_enable(&systemd.units).is_empty()
}

/// `dh_installsystemd` invocation lines for `override_dh_installsystemd`
/// (spec §8 E4: one line per unit, `--no-enable` on disabled ones).
pub fn installsystemd_lines(systemd: &SystemdConfig) -> Vec<String> {
    systemd
        .units
        .iter()
        .map(|(name, unit)| {
            if unit.enable {
                format!("\tdh_installsystemd --name={name}")
            } else {
                format!("\tdh_installsystemd --name={name} --no-enable")
            }
        })
        .collect()
}

/// Content for `debian/dalec/custom_systemd_postinst.sh.partial`, appended to
/// `debian/<pkg>.postinst` when a unit basename has mixed enable state,
/// because `dh_installsystemd` only understands per-basename enable/disable.
pub fn custom_postinst_fragment(basenames: &[String]) -> String {
    let mut out = String::from(
        "# Units below share a basename with mixed enable state; dh_installsystemd\n\
         # cannot express that, so each is enabled/disabled explicitly here.\n",
    );
    for basename in basenames {
        out.push_str(&format!("if [ \"$1\" = \"configure\" ]; then\n"));
        out.push_str(&format!(
            "\tdeb-systemd-helper debian-installed {basename}.service >/dev/null 2>&1 || true\n"
        ));
        out.push_str("fi\n");
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use dalec_spec::artifact::SystemdUnit;
    use std::collections::BTreeMap;

    #[test]
    fn disabled_unit_gets_no_enable_flag() {
        let mut units = BTreeMap::new();
        units.insert("foo.service".to_string(), SystemdUnit { enable: true });
        units.insert("foo.socket".to_string(), SystemdUnit { enable: false });
        let systemd = SystemdConfig {
            units,
            dropins: BTreeMap::new(),
        };
        let lines = installsystemd_lines(&systemd);
        assert_eq!(
            lines,
            vec![
                "\tdh_installsystemd --name=foo.service".to_string(),
                "\tdh_installsystemd --name=foo.socket --no-enable".to_string(),
            ]
        );
        assert!(needs_override(&systemd));
        assert!(has_mixed_enable(&systemd));
    }
}
