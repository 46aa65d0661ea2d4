//! Shared value types passed between `DistroConfig` operations (spec §4.5).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Debian,
    Rpm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerImage {
    pub image_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltPackage {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRef {
    pub image_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub passed: bool,
    /// Retained even on failure so the caller can inspect the container
    /// that ran the failing test (spec §7 `TestFailure`).
    pub container_ref: ContainerRef,
}
