//! The build request model (spec §6): the `{option -> value}` pairs a
//! frontend driver passes in, normalized into a typed request.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildRequest {
    /// `"<subtarget>/<dalecTarget>"` or a bare registered alias. Empty uses
    /// the mux's default.
    pub target: String,
    /// `build-arg:<NAME>` contributions, collected for spec substitution.
    pub build_args: BTreeMap<String, String>,
    /// `build-arg:DALEC_DISABLE_DIFF_MERGE=1`.
    pub disable_diff_merge: bool,
    pub filename: Option<String>,
    pub dockerfilekey: Option<String>,
    /// `dalec.target`: per-spec target override when the mux is nested.
    pub dalec_target: Option<String>,
    pub requestid: Option<String>,
}

impl BuildRequest {
    /// The spec-level target to resolve `Spec::get_*` against: the nested
    /// override when present, otherwise the Dalec-target half of `target`.
    pub fn effective_target<'a>(&'a self, mux_dalec_target: &'a str) -> &'a str {
        self.dalec_target.as_deref().unwrap_or(mux_dalec_target)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dalec_target_override_takes_precedence() {
        let mut req = BuildRequest::default();
        req.dalec_target = Some("nested".to_string());
        assert_eq!(req.effective_target("from-mux"), "nested");

        let bare = BuildRequest::default();
        assert_eq!(bare.effective_target("from-mux"), "from-mux");
    }
}
