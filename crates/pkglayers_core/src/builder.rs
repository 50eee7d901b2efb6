use log::{debug, trace};
use std::path::Path;

use crate::{
    config::{TreeLayout, clean_path},
    constants::PSEUDO_PACKAGES,
    error::GraphError,
    graph::PackageGraph,
    resolver::ImportResolver,
    types::PackageId,
};

/// Construction phase of the package graph.
///
/// The builder is the only writer: it registers packages, turns raw import
/// paths into edges and flags learned packages. `finish` hands back the graph
/// for the read-only analysis phase.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: PackageGraph,
    resolver: ImportResolver,
}

impl GraphBuilder {
    pub fn new(layout: TreeLayout) -> Self {
        let resolver = ImportResolver::new(layout.clone());
        Self { graph: PackageGraph::new(layout), resolver }
    }

    pub fn layout(&self) -> &TreeLayout {
        self.graph.layout()
    }

    pub fn graph(&self) -> &PackageGraph {
        &self.graph
    }

    /// Register the pseudo-packages that have no directory in the tree (`C`).
    pub fn prime_pseudo_packages(&mut self) -> Result<(), GraphError> {
        for name in PSEUDO_PACKAGES {
            let identity = self.graph.layout().root.join(name);
            self.graph.register(&identity)?;
            debug!("Primed pseudo-package '{}'", name);
        }
        Ok(())
    }

    /// Register the package whose directory is `dir`.
    pub fn register(&mut self, dir: &Path) -> Result<PackageId, GraphError> {
        self.graph.register(&clean_path(dir))
    }

    pub fn lookup(&self, dir: &Path) -> Option<PackageId> {
        self.graph.lookup(&clean_path(dir))
    }

    pub fn resolve_import(&self, import_path: &str) -> Option<PackageId> {
        self.resolver.resolve(&self.graph, import_path)
    }

    pub fn add_dependency(&mut self, owner: PackageId, imported: PackageId) {
        self.graph.add_dependency(owner, imported);
    }

    /// Turn the raw imports of one source file of `owner` into edges.
    ///
    /// Imports that do not resolve to a package of the tree are skipped.
    /// Returns the number of imports that resolved.
    pub fn record_imports<I, S>(&mut self, owner: PackageId, imports: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = 0;
        for import_path in imports {
            let import_path = import_path.as_ref();
            match self.resolve_import(import_path) {
                Some(imported) => {
                    self.add_dependency(owner, imported);
                    resolved += 1;
                }
                None => trace!(
                    "Ignoring import '{}' of '{}'",
                    import_path,
                    self.graph.package(owner).name()
                ),
            }
        }
        resolved
    }

    /// Flag the packages named by `import_paths` as learned. Unknown paths are ignored.
    /// Returns the number of packages flagged.
    pub fn mark_learned<I, S>(&mut self, import_paths: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flagged = 0;
        for import_path in import_paths {
            let import_path = import_path.as_ref();
            match self.resolve_import(import_path) {
                Some(id) => {
                    self.graph.mark_learned(id);
                    flagged += 1;
                }
                None => debug!("Learned package '{}' is not part of the tree", import_path),
            }
        }
        flagged
    }

    pub fn finish(self) -> PackageGraph {
        debug!("Graph construction finished with {} packages", self.graph.len());
        self.graph
    }
}
