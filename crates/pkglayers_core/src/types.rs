use std::path::{Component, Path, PathBuf};

use crate::{
    config::TreeLayout,
    constants::{INTERNAL_SEGMENT, PREDECLARED_PACKAGES},
    error::GraphError,
};

/// Handle to a package issued by the registry. Only valid for the graph that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(pub(crate) usize);

/// A package of the analyzed tree together with its edges.
#[derive(Debug, Clone)]
pub struct Package {
    identity: PathBuf,
    relative: String,
    /// Byte offset of the display name within `relative`; non-zero for vendored packages
    name_start: usize,
    internal: bool,
    learned: bool,
    /// Sorted by display name, unique by identity
    pub(crate) dependencies: Vec<PackageId>,
    /// Sorted by display name, unique by identity
    pub(crate) dependents: Vec<PackageId>,
}

impl Package {
    pub(crate) fn new(identity: &Path, layout: &TreeLayout) -> Result<Self, GraphError> {
        let outside_root =
            || GraphError::OutsideRoot { path: identity.to_path_buf(), root: layout.root.clone() };

        let rel = identity.strip_prefix(&layout.root).map_err(|_| outside_root())?;
        let segments: Vec<String> = rel
            .components()
            .map(|c| match c {
                Component::Normal(s) => Ok(s.to_string_lossy().to_string()),
                _ => Err(outside_root()),
            })
            .collect::<Result<_, _>>()?;
        if segments.is_empty() {
            return Err(outside_root());
        }

        let relative = segments.join("/");
        let name_start = if segments.len() > 1 && segments[0] == layout.vendor_segment {
            layout.vendor_segment.len() + 1
        } else {
            0
        };
        let internal = segments.iter().any(|s| s == INTERNAL_SEGMENT);

        Ok(Self {
            identity: identity.to_path_buf(),
            relative,
            name_start,
            internal,
            learned: false,
            dependencies: Vec::new(),
            dependents: Vec::new(),
        })
    }

    /// Full path of the package directory; the registry key
    pub fn identity(&self) -> &Path {
        &self.identity
    }

    /// Slash-separated path relative to the tree root
    pub fn relative_path(&self) -> &str {
        &self.relative
    }

    /// The import path of the package: its relative path without any vendor prefix
    pub fn name(&self) -> &str {
        &self.relative[self.name_start..]
    }

    pub fn is_vendored(&self) -> bool {
        self.name_start > 0
    }

    pub fn is_internal(&self) -> bool {
        self.internal
    }

    pub fn is_learned(&self) -> bool {
        self.learned
    }

    pub(crate) fn mark_learned(&mut self) {
        self.learned = true;
    }

    pub fn is_predeclared(&self) -> bool {
        PREDECLARED_PACKAGES.contains(&self.name())
    }

    /// Learned and predeclared packages are settled: they need no further review
    pub fn is_settled(&self) -> bool {
        self.learned || self.is_predeclared()
    }

    pub fn dependencies(&self) -> &[PackageId] {
        &self.dependencies
    }

    pub fn dependents(&self) -> &[PackageId] {
        &self.dependents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TreeLayout {
        TreeLayout::new("/go/src", "vendor")
    }

    #[test]
    fn test_plain_package_name_is_relative_path() {
        let pkg = Package::new(Path::new("/go/src/crypto/tls"), &layout()).unwrap();
        assert_eq!(pkg.relative_path(), "crypto/tls");
        assert_eq!(pkg.name(), "crypto/tls");
        assert!(!pkg.is_vendored());
        assert!(!pkg.is_internal());
        assert!(!pkg.is_learned());
    }

    #[test]
    fn test_vendored_package_name_drops_vendor_segment() {
        let pkg =
            Package::new(Path::new("/go/src/vendor/golang_org/x/net/http2/hpack"), &layout())
                .unwrap();
        assert!(pkg.is_vendored());
        assert_eq!(pkg.relative_path(), "vendor/golang_org/x/net/http2/hpack");
        assert_eq!(pkg.name(), "golang_org/x/net/http2/hpack");
    }

    #[test]
    fn test_vendor_segment_only_counts_as_first_segment() {
        let pkg = Package::new(Path::new("/go/src/net/vendor/x"), &layout()).unwrap();
        assert!(!pkg.is_vendored());
        assert_eq!(pkg.name(), "net/vendor/x");
    }

    #[test]
    fn test_internal_is_a_whole_segment() {
        let internal = Package::new(Path::new("/go/src/internal/poll"), &layout()).unwrap();
        assert!(internal.is_internal());

        let nested = Package::new(Path::new("/go/src/crypto/internal/boring"), &layout()).unwrap();
        assert!(nested.is_internal());

        let lookalike = Package::new(Path::new("/go/src/internals/x"), &layout()).unwrap();
        assert!(!lookalike.is_internal());
    }

    #[test]
    fn test_predeclared_packages() {
        for name in ["builtin", "C", "unsafe"] {
            let pkg = Package::new(&Path::new("/go/src").join(name), &layout()).unwrap();
            assert!(pkg.is_predeclared(), "{} should be predeclared", name);
            assert!(pkg.is_settled());
        }
        let pkg = Package::new(Path::new("/go/src/fmt"), &layout()).unwrap();
        assert!(!pkg.is_predeclared());
        assert!(!pkg.is_settled());
    }

    #[test]
    fn test_outside_root_rejected() {
        let err = Package::new(Path::new("/elsewhere/fmt"), &layout()).unwrap_err();
        assert!(matches!(err, GraphError::OutsideRoot { .. }));
    }

    #[test]
    fn test_root_itself_rejected() {
        let err = Package::new(Path::new("/go/src"), &layout()).unwrap_err();
        assert!(matches!(err, GraphError::OutsideRoot { .. }));
    }
}
