//! Quilt patch series generation (spec §4.2: "patches are additionally
//! collated into a single quilt-format series/dalec-changes.patch pair").

use dalec_source::PatchStep;
use std::collections::BTreeMap;

/// Collated quilt output: one combined patch plus the series file that
/// names it, regardless of how many individual patches were declared.
pub struct QuiltSeries {
    pub series: String,
    pub collated_patch_name: &'static str,
}

pub const COLLATED_PATCH_NAME: &str = "dalec-changes.patch";

/// Build the `debian/patches/series` contents for a resolved patch map. Every
/// declared patch, across every patched source key, collapses into the one
/// collated patch file; quilt only ever sees a single entry.
pub fn series(patches: &BTreeMap<String, Vec<PatchStep>>) -> Option<QuiltSeries> {
    if patches.values().all(Vec::is_empty) {
        return None;
    }
    Some(QuiltSeries {
        series: format!("{COLLATED_PATCH_NAME}\n"),
        collated_patch_name: COLLATED_PATCH_NAME,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_patch_map_yields_no_series() {
        assert!(series(&BTreeMap::new()).is_none());
    }

    #[test]
    fn declared_patches_collapse_to_one_series_entry() {
        let mut patches = BTreeMap::new();
        patches.insert(
            "foo".to_string(),
            vec![PatchStep {
                patch_source: "p1".to_string(),
                strip: 1,
                path: None,
            }],
        );
        let s = series(&patches).unwrap();
        assert_eq!(s.series, "dalec-changes.patch\n");
    }
}
