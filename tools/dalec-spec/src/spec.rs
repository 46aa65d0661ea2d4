//! The top-level `Spec` entity (spec §3) and its loader.
//!
//! Deserialization follows the same two-phase shape the teacher's own
//! project loader uses: an `UnvalidatedSpec` captures exactly what's on the
//! wire (required fields stay optional so we can name the one that's
//! missing), then [`UnvalidatedSpec::validate`] produces the real [`Spec`].

use crate::build::BuildConfig;
use crate::changelog::{ChangelogEntry, RepoConfig};
use crate::deps::{ConstraintMap, PackageDependencies};
use crate::error::{self, Result};
use crate::image::ImageConfig;
use crate::source::{PatchRef, Source};
use crate::artifact::Artifacts;
use crate::test_step::TestStep;
use regex::Regex;
use serde::{Deserialize, Serialize};
use snafu::{ensure, ResultExt};
use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    pub name: String,
    pub version: String,
    pub revision: String,
    pub description: String,
    pub license: String,

    pub packager: Option<String>,
    pub vendor: Option<String>,
    pub website: Option<String>,
    pub noarch: bool,

    pub sources: BTreeMap<String, Source>,
    pub patches: BTreeMap<String, Vec<PatchRef>>,
    pub dependencies: Option<PackageDependencies>,
    pub build: BuildConfig,
    pub artifacts: Option<Artifacts>,
    pub targets: BTreeMap<String, TargetOverride>,
    pub changelog: Vec<ChangelogEntry>,
    pub image: Option<ImageConfig>,
    pub tests: Vec<TestStep>,
}

/// Per-target overrides (spec §3). Every field is `Option`: `None` means
/// inherit the root value, `Some` (even an empty collection) means this
/// target's value fully replaces the root's (spec §3 invariants, §8.3).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TargetOverride {
    #[serde(default)]
    pub dependencies: Option<PackageDependencies>,
    #[serde(default)]
    pub artifacts: Option<Artifacts>,
    #[serde(default)]
    pub image: Option<ImageConfig>,
    #[serde(default)]
    pub tests: Option<Vec<TestStep>>,
    #[serde(default)]
    pub repos: Option<Vec<RepoConfig>>,
    #[serde(default)]
    pub replaces: Option<ConstraintMap>,
    #[serde(default)]
    pub provides: Option<ConstraintMap>,
    #[serde(default)]
    pub conflicts: Option<ConstraintMap>,
    #[serde(default)]
    pub package_files: Option<BTreeMap<String, Source>>,
}

impl Spec {
    /// Parse and validate a spec from its YAML bytes (spec §4.1 `Load`).
    pub fn load(bytes: &[u8]) -> Result<Spec> {
        let unvalidated: UnvalidatedSpec =
            serde_yaml::from_slice(bytes).context(error::ParseSnafu)?;
        unvalidated.validate()
    }

    /// Parse a spec after substituting `${VAR}` / `${VAR:-default}`
    /// references against `build_args` (spec §6 "build-arg:<NAME>").
    ///
    /// Substitution happens on the raw YAML tree, before the required-field
    /// validation that [`Spec::load`] performs, so a variable can supply any
    /// string-valued field including ones that are otherwise required.
    pub fn load_with_args(bytes: &[u8], build_args: &BTreeMap<String, String>) -> Result<Spec> {
        let mut value: serde_yaml::Value =
            serde_yaml::from_slice(bytes).context(error::ParseSnafu)?;
        substitute_value(&mut value, build_args)?;
        let unvalidated: UnvalidatedSpec =
            serde_yaml::from_value(value).context(error::ParseSnafu)?;
        unvalidated.validate()
    }

    /// Target-scoped getter for `dependencies`: spec §4.1 "an empty map in a
    /// target is an explicit override; absence is inheritance".
    pub fn get_dependencies(&self, target: &str) -> Option<&PackageDependencies> {
        self.targets
            .get(target)
            .and_then(|t| t.dependencies.as_ref())
            .or(self.dependencies.as_ref())
    }

    pub fn get_artifacts(&self, target: &str) -> Option<&Artifacts> {
        self.targets
            .get(target)
            .and_then(|t| t.artifacts.as_ref())
            .or(self.artifacts.as_ref())
    }

    pub fn get_image(&self, target: &str) -> Option<&ImageConfig> {
        self.targets
            .get(target)
            .and_then(|t| t.image.as_ref())
            .or(self.image.as_ref())
    }

    pub fn get_tests(&self, target: &str) -> &[TestStep] {
        self.targets
            .get(target)
            .and_then(|t| t.tests.as_deref())
            .unwrap_or(&self.tests)
    }

    pub fn get_repos(&self, target: &str) -> &[RepoConfig] {
        self.targets
            .get(target)
            .and_then(|t| t.repos.as_deref())
            .unwrap_or(&[])
    }

    pub fn get_replaces(&self, target: &str) -> Option<&ConstraintMap> {
        self.targets.get(target).and_then(|t| t.replaces.as_ref())
    }

    pub fn get_provides(&self, target: &str) -> Option<&ConstraintMap> {
        self.targets.get(target).and_then(|t| t.provides.as_ref())
    }

    pub fn get_conflicts(&self, target: &str) -> Option<&ConstraintMap> {
        self.targets.get(target).and_then(|t| t.conflicts.as_ref())
    }

    pub fn get_package_files(&self, target: &str) -> Option<&BTreeMap<String, Source>> {
        self.targets
            .get(target)
            .and_then(|t| t.package_files.as_ref())
    }

    /// Validate the invariant that every `PatchRef.source` names a real
    /// source key (spec §3 invariants, §8.2).
    pub fn validate_patch_sources(&self) -> Result<()> {
        for (key, patches) in &self.patches {
            for patch in patches {
                ensure!(
                    self.sources.contains_key(&patch.source),
                    error::UnknownPatchSourceSnafu {
                        key: key.clone(),
                        patch: patch.source.clone(),
                        referenced: patch.source.clone(),
                    }
                );
            }
        }
        Ok(())
    }
}

fn var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}").expect("static pattern")
    })
}

/// Replace every `${VAR}` / `${VAR:-default}` occurrence in every string leaf
/// of `value`, recursing through sequences and mappings.
fn substitute_value(value: &mut serde_yaml::Value, args: &BTreeMap<String, String>) -> Result<()> {
    match value {
        serde_yaml::Value::String(s) => {
            *s = substitute_string(s, args)?;
        }
        serde_yaml::Value::Sequence(seq) => {
            for item in seq {
                substitute_value(item, args)?;
            }
        }
        serde_yaml::Value::Mapping(map) => {
            for (_, v) in map.iter_mut() {
                substitute_value(v, args)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn substitute_string(input: &str, args: &BTreeMap<String, String>) -> Result<String> {
    let mut err = None;
    let replaced = var_pattern().replace_all(input, |caps: &regex::Captures| {
        let name = &caps[1];
        if let Some(value) = args.get(name) {
            return value.clone();
        }
        if let Some(default) = caps.get(3) {
            return default.as_str().to_string();
        }
        err.get_or_insert_with(|| error::Error::UnknownVariable {
            name: name.to_string(),
        });
        String::new()
    });
    if let Some(e) = err {
        return Err(e);
    }
    Ok(replaced.into_owned())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct UnvalidatedSpec {
    name: Option<String>,
    version: Option<String>,
    revision: Option<String>,
    description: Option<String>,
    license: Option<String>,

    #[serde(default)]
    packager: Option<String>,
    #[serde(default)]
    vendor: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    noarch: bool,

    #[serde(default)]
    sources: BTreeMap<String, Source>,
    #[serde(default)]
    patches: BTreeMap<String, Vec<PatchRef>>,
    #[serde(default)]
    dependencies: Option<PackageDependencies>,
    #[serde(default)]
    build: BuildConfig,
    #[serde(default)]
    artifacts: Option<Artifacts>,
    #[serde(default)]
    targets: BTreeMap<String, TargetOverride>,
    #[serde(default)]
    changelog: Vec<ChangelogEntry>,
    #[serde(default)]
    image: Option<ImageConfig>,
    #[serde(default)]
    tests: Vec<TestStep>,
}

impl UnvalidatedSpec {
    fn validate(self) -> Result<Spec> {
        let name = self
            .name
            .ok_or(error::Error::MissingRequiredField { field: "name" })?;
        let version = self
            .version
            .ok_or(error::Error::MissingRequiredField { field: "version" })?;
        let revision = self
            .revision
            .ok_or(error::Error::MissingRequiredField { field: "revision" })?;
        let description = self.description.ok_or(error::Error::MissingRequiredField {
            field: "description",
        })?;
        let license = self
            .license
            .ok_or(error::Error::MissingRequiredField { field: "license" })?;

        let spec = Spec {
            name,
            version,
            revision,
            description,
            license,
            packager: self.packager,
            vendor: self.vendor,
            website: self.website,
            noarch: self.noarch,
            sources: self.sources,
            patches: self.patches,
            dependencies: self.dependencies,
            build: self.build,
            artifacts: self.artifacts,
            targets: self.targets,
            changelog: self.changelog,
            image: self.image,
            tests: self.tests,
        };
        spec.validate_patch_sources()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn minimal_yaml() -> &'static str {
        r#"
name: hello
version: "1.0"
revision: "1"
description: a hello package
license: MIT
sources:
  src:
    inline:
      dir:
        files: {}
artifacts:
  binaries:
    src/hello: {}
build:
  steps:
    - command: make
targets:
  jammy: {}
"#
    }

    #[test]
    fn loads_minimal_spec() {
        let spec = Spec::load(minimal_yaml().as_bytes()).unwrap();
        assert_eq!(spec.name, "hello");
        assert_eq!(spec.version, "1.0");
        assert!(spec.targets.contains_key("jammy"));
    }

    #[test]
    fn missing_required_field_is_named() {
        let yaml = r#"
version: "1.0"
revision: "1"
description: a hello package
license: MIT
"#;
        let err = Spec::load(yaml.as_bytes()).unwrap_err();
        match err {
            error::Error::MissingRequiredField { field } => assert_eq!(field, "name"),
            other => panic!("expected MissingRequiredField, got {other:?}"),
        }
    }

    #[test]
    fn unknown_top_level_key_is_an_error() {
        let yaml = format!("{}\nbogus_key: true\n", minimal_yaml());
        assert!(Spec::load(yaml.as_bytes()).is_err());
    }

    #[test]
    fn target_override_present_empty_wins_over_root() {
        let yaml = r#"
name: hello
version: "1.0"
revision: "1"
description: a hello package
license: MIT
sources: {}
artifacts:
  binaries:
    src/hello: {}
targets:
  jammy:
    artifacts: {}
"#;
        let spec = Spec::load(yaml.as_bytes()).unwrap();
        let artifacts = spec.get_artifacts("jammy").unwrap();
        assert!(artifacts.binaries.is_empty());

        // An unrelated target still inherits root.
        let root_artifacts = spec.get_artifacts("unrelated").unwrap();
        assert_eq!(root_artifacts.binaries.len(), 1);
    }

    #[test]
    fn patch_must_reference_known_source() {
        let yaml = r#"
name: hello
version: "1.0"
revision: "1"
description: a hello package
license: MIT
sources:
  a:
    inline:
      dir:
        files: {}
patches:
  a:
    - source: missing-patch
"#;
        assert!(Spec::load(yaml.as_bytes()).is_err());
    }

    #[test]
    fn substitutes_build_arg_with_and_without_default() {
        let yaml = r#"
name: hello
version: "${VERSION}"
revision: "${REVISION:-1}"
description: a hello package
license: MIT
sources: {}
"#;
        let mut args = BTreeMap::new();
        args.insert("VERSION".to_string(), "2.3".to_string());
        let spec = Spec::load_with_args(yaml.as_bytes(), &args).unwrap();
        assert_eq!(spec.version, "2.3");
        assert_eq!(spec.revision, "1");
    }

    #[test]
    fn unresolved_variable_with_no_default_is_an_error() {
        let yaml = r#"
name: hello
version: "${VERSION}"
revision: "1"
description: a hello package
license: MIT
sources: {}
"#;
        let err = Spec::load_with_args(yaml.as_bytes(), &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, error::Error::UnknownVariable { .. }));
    }
}
