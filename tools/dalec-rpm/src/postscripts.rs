//! `%pre`/`%post`/`%preun`/`%postun` scriptlets for users, groups, and
//! systemd units (spec §4.4).

use dalec_spec::artifact::{GroupConfig, SystemdConfig, UserConfig};

/// `%pre`: create any declared groups and users before files land.
pub fn pre(users: &[UserConfig], groups: &[GroupConfig]) -> Option<String> {
    if users.is_empty() && groups.is_empty() {
        return None;
    }
    let mut out = String::new();
    for group in groups {
        let flag = if group.system { " -r" } else { "" };
        out.push_str(&format!("getent group {} >/dev/null || groupadd{flag} {}\n", group.name, group.name));
    }
    for user in users {
        let mut flags = String::new();
        if user.system {
            flags.push_str(" -r");
        }
        if let Some(home) = &user.home {
            flags.push_str(&format!(" -d {home}"));
        } else {
            flags.push_str(" -M");
        }
        out.push_str(&format!(
            "getent passwd {} >/dev/null || useradd{flags} -s /sbin/nologin {}\n",
            user.name, user.name
        ));
    }
    Some(out)
}

/// `%post`: `%systemd_post` for every declared unit, run after files land.
pub fn post(systemd: &SystemdConfig) -> Option<String> {
    if systemd.units.is_empty() {
        return None;
    }
    let mut out = String::new();
    for name in systemd.units.keys() {
        out.push_str(&format!("%systemd_post {name}\n"));
    }
    Some(out)
}

/// `%preun`: `%systemd_preun` for every declared unit.
pub fn preun(systemd: &SystemdConfig) -> Option<String> {
    if systemd.units.is_empty() {
        return None;
    }
    let mut out = String::new();
    for name in systemd.units.keys() {
        out.push_str(&format!("%systemd_preun {name}\n"));
    }
    Some(out)
}

/// `%postun`: `%systemd_postun_with_restart` for every declared unit.
pub fn postun(systemd: &SystemdConfig) -> Option<String> {
    if systemd.units.is_empty() {
        return None;
    }
    let mut out = String::new();
    for name in systemd.units.keys() {
        out.push_str(&format!("%systemd_postun_with_restart {name}\n"));
    }
    Some(out)
}

/// `Requires(post)`/`Requires(preun)`/`Requires(postun)` lines needed when
/// any systemd unit is declared, so the scriptlet macros above always have
/// `systemd` available at the right transaction phase.
pub fn order_with_requires(systemd: &SystemdConfig) -> Vec<String> {
    if systemd.units.is_empty() {
        return Vec::new();
    }
    vec![
        "Requires(post): systemd".to_string(),
        "Requires(preun): systemd".to_string(),
        "Requires(postun): systemd".to_string(),
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::BTreeMap;
    use dalec_spec::artifact::SystemdUnit;

    #[test]
    fn no_units_means_no_scriptlets() {
        let systemd = SystemdConfig::default();
        assert!(post(&systemd).is_none());
        assert!(order_with_requires(&systemd).is_empty());
    }

    #[test]
    fn unit_generates_systemd_macros() {
        let mut units = BTreeMap::new();
        units.insert("foo.service".to_string(), SystemdUnit { enable: true });
        let systemd = SystemdConfig { units, dropins: BTreeMap::new() };
        assert_eq!(post(&systemd).unwrap(), "%systemd_post foo.service\n");
        assert_eq!(preun(&systemd).unwrap(), "%systemd_preun foo.service\n");
        assert_eq!(order_with_requires(&systemd).len(), 3);
    }
}
