use serde::Serialize;

use crate::report::UNLEARNED_MARKER;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEntry {
    pub name: String,
    /// Neither learned nor predeclared: still needs review before it can be trusted
    pub unlearned: bool,
}

impl DependencyEntry {
    /// The name as printed in the report, marked when unlearned
    pub fn label(&self) -> String {
        if self.unlearned { format!("{} {}", self.name, UNLEARNED_MARKER) } else { self.name.clone() }
    }
}

/// One reported package with its dependencies, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    pub name: String,
    pub depth: i32,
    pub imported: bool,
    pub dependencies: Vec<DependencyEntry>,
}

impl PackageRecord {
    pub fn imported_flag(&self) -> &'static str {
        if self.imported { "imported" } else { "unimported" }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayerReport {
    /// Grouped by ascending depth, ordered by name within a depth
    pub records: Vec<PackageRecord>,
    /// Learned and predeclared packages left out of the report
    pub settled: usize,
    /// Internal packages no public package reaches, left out of the report
    pub suppressed: usize,
}

#[derive(Debug, Clone)]
pub struct AuditResult {
    pub report: LayerReport,
    pub packages_analyzed: usize,
    pub learned_packages: usize,
    /// Source files whose imports were recorded
    pub files_scanned: usize,
}
