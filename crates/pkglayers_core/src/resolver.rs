use log::trace;
use regex::Regex;
use std::path::PathBuf;

use crate::{
    config::{TreeLayout, clean_path},
    constants::VENDOR_NAMESPACE_PATTERN,
    graph::PackageGraph,
    types::PackageId,
};

/// Maps raw import paths, as written in source files, to package identities.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    layout: TreeLayout,
    vendor_namespace: Regex,
}

impl ImportResolver {
    pub fn new(layout: TreeLayout) -> Self {
        let vendor_namespace =
            Regex::new(VENDOR_NAMESPACE_PATTERN).expect("vendor namespace pattern is valid");
        Self { layout, vendor_namespace }
    }

    /// The identity an import path would have if it names a package of this tree.
    pub fn identity_for(&self, import_path: &str) -> PathBuf {
        let joined = if self.vendor_namespace.is_match(import_path) {
            self.layout.root.join(&self.layout.vendor_segment).join(import_path)
        } else {
            self.layout.root.join(import_path)
        };
        clean_path(&joined)
    }

    /// Resolve an import path to a registered package.
    ///
    /// `None` means the import points outside the analyzed tree (or at a
    /// directory that is not a package); callers ignore such imports.
    pub fn resolve(&self, graph: &PackageGraph, import_path: &str) -> Option<PackageId> {
        let identity = self.identity_for(import_path);
        let resolved = graph.lookup(&identity);
        if resolved.is_none() {
            trace!("Import '{}' is not a package of the tree ({})", import_path, identity.display());
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn layout() -> TreeLayout {
        TreeLayout::new("/go/src", "vendor")
    }

    #[test]
    fn test_identity_for_plain_import() {
        let resolver = ImportResolver::new(layout());
        assert_eq!(resolver.identity_for("net/http"), PathBuf::from("/go/src/net/http"));
    }

    #[test]
    fn test_identity_for_vendor_namespace() {
        let resolver = ImportResolver::new(layout());
        assert_eq!(
            resolver.identity_for("golang_org/x/net/http2/hpack"),
            PathBuf::from("/go/src/vendor/golang_org/x/net/http2/hpack")
        );
        assert_eq!(
            resolver.identity_for("golang.org/x/crypto/cryptobyte"),
            PathBuf::from("/go/src/vendor/golang.org/x/crypto/cryptobyte")
        );
    }

    #[test]
    fn test_identity_for_uses_configured_vendor_segment() {
        let resolver = ImportResolver::new(TreeLayout::new("/go/src", "third_party"));
        assert_eq!(
            resolver.identity_for("golang_org/x/text"),
            PathBuf::from("/go/src/third_party/golang_org/x/text")
        );
    }

    #[test]
    fn test_identity_for_is_cleaned() {
        let resolver = ImportResolver::new(layout());
        assert_eq!(resolver.identity_for("./fmt/"), PathBuf::from("/go/src/fmt"));
    }

    #[test]
    fn test_resolve_registered_and_unknown() {
        let mut graph = PackageGraph::new(layout());
        let fmt = graph.register(Path::new("/go/src/fmt")).unwrap();
        let hpack =
            graph.register(Path::new("/go/src/vendor/golang_org/x/net/http2/hpack")).unwrap();
        let resolver = ImportResolver::new(layout());

        assert_eq!(resolver.resolve(&graph, "fmt"), Some(fmt));
        assert_eq!(resolver.resolve(&graph, "golang_org/x/net/http2/hpack"), Some(hpack));
        assert_eq!(resolver.resolve(&graph, "github.com/pkg/errors"), None);
        assert_eq!(resolver.resolve(&graph, "io"), None);
    }
}
