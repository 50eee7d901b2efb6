use log::trace;
use std::collections::{HashMap, HashSet, VecDeque};

use pkglayers_core::{PackageGraph, PackageId};

/// Answers whether a package is imported from outside the internal boundary.
///
/// A package is imported when following its dependents, directly or
/// transitively, reaches a package that is not internal. Internal packages
/// used only by other internal packages are not.
pub struct ReachabilityAnalyzer<'g> {
    graph: &'g PackageGraph,
    imported_cache: HashMap<PackageId, bool>,
}

impl<'g> ReachabilityAnalyzer<'g> {
    pub fn new(graph: &'g PackageGraph) -> Self {
        Self { graph, imported_cache: HashMap::new() }
    }

    pub fn is_imported(&mut self, id: PackageId) -> bool {
        if let Some(cached) = self.imported_cache.get(&id) {
            return *cached;
        }

        // Breadth-first over dependents, so direct dependents are checked first
        let mut visited: HashSet<PackageId> = HashSet::from([id]);
        let mut queue: VecDeque<PackageId> = VecDeque::from([id]);
        let mut imported = false;

        'search: while let Some(current) = queue.pop_front() {
            for &dependent in self.graph.package(current).dependents() {
                if !self.graph.package(dependent).is_internal() {
                    imported = true;
                    break 'search;
                }
                match self.imported_cache.get(&dependent) {
                    Some(true) => {
                        imported = true;
                        break 'search;
                    }
                    // Everything above it is internal
                    Some(false) => {}
                    None => {
                        if visited.insert(dependent) {
                            queue.push_back(dependent);
                        }
                    }
                }
            }
        }

        if imported {
            self.imported_cache.insert(id, true);
        } else {
            // The whole dependent closure was walked and is internal-only
            for pkg in visited {
                self.imported_cache.insert(pkg, false);
            }
        }

        trace!("Package '{}' imported: {}", self.graph.package(id).name(), imported);
        imported
    }
}
