use log::trace;
use std::collections::{HashMap, HashSet};

use pkglayers_core::{GraphError, PackageGraph, PackageId};

/// Depth of learned and predeclared packages: they sit below every layer.
pub const SETTLED_DEPTH: i32 = -1;

/// Computes the dependency depth of packages.
///
/// The depth of a package is:
/// - `-1` if it is learned or predeclared
/// - `0` if it has no dependencies
/// - one more than the deepest of its dependencies otherwise
///
/// Depths are memoized, so shared sub-graphs are only walked once. A package
/// reached again while its own depth is still being computed means the graph
/// has a cycle, which is reported as an error.
pub struct DepthAnalyzer<'g> {
    graph: &'g PackageGraph,
    depth_cache: HashMap<PackageId, i32>,
    visiting: HashSet<PackageId>,
}

impl<'g> DepthAnalyzer<'g> {
    pub fn new(graph: &'g PackageGraph) -> Self {
        Self { graph, depth_cache: HashMap::new(), visiting: HashSet::new() }
    }

    pub fn dependency_depth(&mut self, id: PackageId) -> Result<i32, GraphError> {
        if let Some(cached) = self.depth_cache.get(&id) {
            return Ok(*cached);
        }

        let graph = self.graph;
        let pkg = graph.package(id);
        if pkg.is_settled() {
            trace!("Package '{}' is learned or predeclared", pkg.name());
            self.depth_cache.insert(id, SETTLED_DEPTH);
            return Ok(SETTLED_DEPTH);
        }

        if !self.visiting.insert(id) {
            return Err(GraphError::Cycle(pkg.name().to_string()));
        }

        let mut depth = 0;
        for &dependency in pkg.dependencies() {
            let dependency_depth = self.dependency_depth(dependency)?;
            depth = depth.max(dependency_depth + 1);
        }

        self.visiting.remove(&id);
        trace!("Computed depth {} for '{}'", depth, pkg.name());
        self.depth_cache.insert(id, depth);
        Ok(depth)
    }
}
