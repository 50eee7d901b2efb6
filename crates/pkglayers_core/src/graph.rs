use log::trace;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{
    config::TreeLayout,
    error::GraphError,
    types::{Package, PackageId},
};

/// The package registry and the dependency graph over it.
///
/// Every package is registered exactly once under its identity (the full
/// path of its directory), and everything else refers to packages through
/// the `PackageId` handed out at registration. Edges are kept on both ends:
/// `dependencies` on the importer and `dependents` on the imported package,
/// each sorted by display name and unique by identity.
#[derive(Debug, Clone)]
pub struct PackageGraph {
    layout: TreeLayout,
    packages: Vec<Package>,
    by_identity: HashMap<PathBuf, PackageId>,
}

impl PackageGraph {
    pub fn new(layout: TreeLayout) -> Self {
        Self { layout, packages: Vec::new(), by_identity: HashMap::new() }
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    /// Register the package living at `identity`. Fails if it is already registered.
    pub fn register(&mut self, identity: &Path) -> Result<PackageId, GraphError> {
        if self.by_identity.contains_key(identity) {
            return Err(GraphError::DuplicatePackage(identity.to_path_buf()));
        }

        let pkg = Package::new(identity, &self.layout)?;
        let id = PackageId(self.packages.len());
        trace!("Registered package '{}' at {}", pkg.name(), identity.display());
        self.packages.push(pkg);
        self.by_identity.insert(identity.to_path_buf(), id);
        Ok(id)
    }

    pub fn lookup(&self, identity: &Path) -> Option<PackageId> {
        self.by_identity.get(identity).copied()
    }

    /// Panics if `id` was issued by another graph.
    pub fn package(&self, id: PackageId) -> &Package {
        &self.packages[id.0]
    }

    pub fn packages(&self) -> impl Iterator<Item = (PackageId, &Package)> {
        self.packages.iter().enumerate().map(|(idx, pkg)| (PackageId(idx), pkg))
    }

    /// Package ids ordered by identity, independent of registration order
    pub fn ids_by_identity(&self) -> Vec<PackageId> {
        let mut ids: Vec<PackageId> = self.packages().map(|(id, _)| id).collect();
        ids.sort_by(|a, b| self.package(*a).identity().cmp(self.package(*b).identity()));
        ids
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Record that `owner` imports `imported`, on both ends of the edge.
    pub(crate) fn add_dependency(&mut self, owner: PackageId, imported: PackageId) {
        let mut dependencies = std::mem::take(&mut self.packages[owner.0].dependencies);
        let added = insert_sorted(&mut dependencies, imported, &self.packages);
        self.packages[owner.0].dependencies = dependencies;

        if added {
            let mut dependents = std::mem::take(&mut self.packages[imported.0].dependents);
            insert_sorted(&mut dependents, owner, &self.packages);
            self.packages[imported.0].dependents = dependents;
            trace!(
                "Edge {} -> {}",
                self.packages[owner.0].name(),
                self.packages[imported.0].name()
            );
        }
    }

    pub(crate) fn mark_learned(&mut self, id: PackageId) {
        self.packages[id.0].mark_learned();
    }
}

/// Insert `id` keeping `list` sorted by (name, identity). Identity makes the key
/// unique, so an equal key means the same package is already present.
fn insert_sorted(list: &mut Vec<PackageId>, id: PackageId, packages: &[Package]) -> bool {
    let key = move |p: PackageId| {
        let pkg = &packages[p.0];
        (pkg.name(), pkg.identity())
    };
    let target = key(id);
    match list.binary_search_by(|probe| key(*probe).cmp(&target)) {
        Ok(_) => false,
        Err(pos) => {
            list.insert(pos, id);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> PackageGraph {
        PackageGraph::new(TreeLayout::new("/go/src", "vendor"))
    }

    fn names(graph: &PackageGraph, ids: &[PackageId]) -> Vec<String> {
        ids.iter().map(|id| graph.package(*id).name().to_string()).collect()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut g = graph();
        let fmt = g.register(Path::new("/go/src/fmt")).unwrap();
        assert_eq!(g.lookup(Path::new("/go/src/fmt")), Some(fmt));
        assert_eq!(g.lookup(Path::new("/go/src/io")), None);
        assert_eq!(g.package(fmt).name(), "fmt");
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut g = graph();
        let first = g.register(Path::new("/go/src/fmt")).unwrap();
        let err = g.register(Path::new("/go/src/fmt")).unwrap_err();
        assert!(matches!(err, GraphError::DuplicatePackage(ref p) if p == Path::new("/go/src/fmt")));
        // The original registration is untouched
        assert_eq!(g.lookup(Path::new("/go/src/fmt")), Some(first));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn test_dependencies_sorted_and_unique() {
        let mut g = graph();
        let owner = g.register(Path::new("/go/src/net/http")).unwrap();
        let sort = g.register(Path::new("/go/src/sort")).unwrap();
        let bufio = g.register(Path::new("/go/src/bufio")).unwrap();
        let io = g.register(Path::new("/go/src/io")).unwrap();

        for dep in [sort, io, bufio, io, sort, sort] {
            g.add_dependency(owner, dep);
        }

        assert_eq!(names(&g, g.package(owner).dependencies()), vec!["bufio", "io", "sort"]);
        assert_eq!(g.package(io).dependents(), &[owner]);
        assert_eq!(g.package(sort).dependents(), &[owner]);
    }

    #[test]
    fn test_dependents_sorted_and_unique() {
        let mut g = graph();
        let errors = g.register(Path::new("/go/src/errors")).unwrap();
        let os = g.register(Path::new("/go/src/os")).unwrap();
        let fmt = g.register(Path::new("/go/src/fmt")).unwrap();
        let io = g.register(Path::new("/go/src/io")).unwrap();

        g.add_dependency(os, errors);
        g.add_dependency(io, errors);
        g.add_dependency(fmt, errors);
        g.add_dependency(os, errors);

        assert_eq!(names(&g, g.package(errors).dependents()), vec!["fmt", "io", "os"]);
    }

    #[test]
    fn test_same_name_distinct_packages_both_kept() {
        let mut g = graph();
        let owner = g.register(Path::new("/go/src/net/http")).unwrap();
        // Vendored copy shares its display name with a top-level package of the same path
        let vendored = g.register(Path::new("/go/src/vendor/golang_org/x/text")).unwrap();
        let plain = g.register(Path::new("/go/src/golang_org/x/text")).unwrap();
        assert_eq!(g.package(vendored).name(), g.package(plain).name());

        g.add_dependency(owner, vendored);
        g.add_dependency(owner, plain);
        g.add_dependency(owner, vendored);

        let deps = g.package(owner).dependencies();
        assert_eq!(deps.len(), 2);
        assert!(deps.contains(&vendored));
        assert!(deps.contains(&plain));
    }

    #[test]
    fn test_ids_by_identity() {
        let mut g = graph();
        let os = g.register(Path::new("/go/src/os")).unwrap();
        let bufio = g.register(Path::new("/go/src/bufio")).unwrap();
        assert_eq!(g.ids_by_identity(), vec![bufio, os]);
    }

    #[test]
    fn test_mark_learned() {
        let mut g = graph();
        let io = g.register(Path::new("/go/src/io")).unwrap();
        g.mark_learned(io);
        assert!(g.package(io).is_learned());
    }
}
