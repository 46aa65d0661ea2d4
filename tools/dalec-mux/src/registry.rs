//! The build target dispatch multiplexer (spec §4.6).

use crate::error::{self, Result};
use snafu::{ensure, OptionExt};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub name: String,
    pub description: String,
    pub default: bool,
    pub group: Option<String>,
}

/// A parsed dispatch target: which registered subtarget handles the
/// request, and the remaining (possibly empty) Dalec-target string to pass
/// on to that handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch<'a, H> {
    pub handler: &'a H,
    pub dalec_target: &'a str,
}

/// An explicitly-constructed registry of target handlers (spec §9: "plugin
/// registry as explicit construction" rather than init-time side effects).
pub struct Registry<H> {
    handlers: BTreeMap<String, (H, Descriptor)>,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self { handlers: BTreeMap::new() }
    }
}

impl<H> Registry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a subtarget key. At most one registered
    /// descriptor may declare `default: true`.
    pub fn add(&mut self, subtarget: impl Into<String>, handler: H, descriptor: Descriptor) -> Result<()> {
        let name = subtarget.into();
        ensure!(
            !self.handlers.contains_key(&name),
            error::DuplicateSubtargetSnafu { name: name.clone() }
        );
        ensure!(
            !(descriptor.default && self.handlers.values().any(|(_, d)| d.default)),
            error::MultipleDefaultsSnafu
        );
        self.handlers.insert(name, (handler, descriptor));
        Ok(())
    }

    /// Parse `request` as `"<subtarget>/<dalecTarget>"` or a bare target. An
    /// exact bare match on a registered subtarget wins before any `/` split
    /// is attempted; an empty request dispatches to the default subtarget.
    pub fn handle<'a>(&'a self, request: &'a str) -> Result<Dispatch<'a, H>> {
        if request.is_empty() {
            let (_, (handler, _)) = self
                .handlers
                .iter()
                .find(|(_, (_, d))| d.default)
                .context(error::NoDefaultSnafu)?;
            return Ok(Dispatch { handler, dalec_target: "" });
        }

        if let Some((handler, _)) = self.handlers.get(request) {
            return Ok(Dispatch { handler, dalec_target: "" });
        }

        if let Some((sub, rest)) = request.split_once('/') {
            if let Some((handler, _)) = self.handlers.get(sub) {
                return Ok(Dispatch { handler, dalec_target: rest });
            }
        }

        error::UnknownTargetSnafu { target: request.to_string() }.fail()
    }

    /// All registered descriptors, sorted by subtarget name, optionally
    /// filtered to one group.
    pub fn list_targets(&self, group: Option<&str>) -> Vec<&Descriptor> {
        self.handlers
            .values()
            .map(|(_, d)| d)
            .filter(|d| group.map_or(true, |g| d.group.as_deref() == Some(g)))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn registry() -> Registry<&'static str> {
        let mut r = Registry::new();
        r.add(
            "deb",
            "deb-handler",
            Descriptor { name: "deb".into(), description: "".into(), default: true, group: None },
        )
        .unwrap();
        r.add(
            "rpm",
            "rpm-handler",
            Descriptor { name: "rpm".into(), description: "".into(), default: false, group: None },
        )
        .unwrap();
        r
    }

    #[test]
    fn bare_subtarget_dispatches_with_no_remainder() {
        let r = registry();
        let dispatch = r.handle("rpm").unwrap();
        assert_eq!(*dispatch.handler, "rpm-handler");
        assert_eq!(dispatch.dalec_target, "");
    }

    #[test]
    fn slash_form_splits_subtarget_and_dalec_target() {
        let r = registry();
        let dispatch = r.handle("rpm/azlinux3").unwrap();
        assert_eq!(*dispatch.handler, "rpm-handler");
        assert_eq!(dispatch.dalec_target, "azlinux3");
    }

    #[test]
    fn empty_request_uses_default() {
        let r = registry();
        let dispatch = r.handle("").unwrap();
        assert_eq!(*dispatch.handler, "deb-handler");
    }

    #[test]
    fn unknown_subtarget_fails_before_any_spec_work() {
        let r = registry();
        let err = r.handle("unknown/deb").unwrap_err();
        assert!(matches!(err, crate::Error::UnknownTarget { .. }));
    }

    #[test]
    fn second_default_is_rejected() {
        let mut r: Registry<&'static str> = Registry::new();
        r.add("deb", "a", Descriptor { name: "deb".into(), description: "".into(), default: true, group: None })
            .unwrap();
        let err = r
            .add("rpm", "b", Descriptor { name: "rpm".into(), description: "".into(), default: true, group: None })
            .unwrap_err();
        assert!(matches!(err, crate::Error::MultipleDefaults));
    }
}
