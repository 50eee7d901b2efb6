use std::path::PathBuf;
use thiserror::Error;

/// Errors that compromise the integrity of the package graph.
///
/// Any of these aborts the run: a report is only produced from a fully
/// built, acyclic graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A second package was registered under an identity already in the registry
    #[error("package already loaded: {}", .0.display())]
    DuplicatePackage(PathBuf),

    /// The identity does not name a directory strictly below the tree root
    #[error("{} is not a package path below {}", .path.display(), .root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// A package transitively depends on itself
    #[error("import cycle detected through package '{0}'")]
    Cycle(String),
}
