//! Constants describing the layout of a Go package tree.
//!
//! These are fixed by the Go toolchain conventions rather than by the tree
//! being audited, so they are not part of the configuration file.

/// Extension of the source files that make up a package
pub const GO_EXTENSION: &str = "go";

/// Suffix of test files, which never contribute to a package's imports
pub const TEST_FILE_SUFFIX: &str = "_test.go";

/// Path segment marking packages that are not importable from outside their parent tree
pub const INTERNAL_SEGMENT: &str = "internal";

/// Pseudo-packages and language-level packages exempt from dependency analysis
pub const PREDECLARED_PACKAGES: &[&str] = &["builtin", "C", "unsafe"];

/// Pseudo-packages registered up front because they have no directory of their own
pub const PSEUDO_PACKAGES: &[&str] = &["C"];

/// Directories pruned from the walk: commands and test fixtures are not library packages
pub const SKIPPED_DIRS: &[&str] = &["cmd", "testdata"];

/// Import paths matching this pattern live under the vendor segment of the tree
pub const VENDOR_NAMESPACE_PATTERN: &str = r"golang(_org|\.org)/x/\w*";

/// Vendor segment used when the configuration does not name one
pub const DEFAULT_VENDOR_SEGMENT: &str = "vendor";
