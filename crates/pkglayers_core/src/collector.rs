use anyhow::{Context, Result};
use ignore::{DirEntry, WalkBuilder};
use log::{debug, trace, warn};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    builder::GraphBuilder,
    constants::{GO_EXTENSION, PSEUDO_PACKAGES, SKIPPED_DIRS, TEST_FILE_SUFFIX},
    parser::{read_go_source, read_package_clause},
};

/// A non-test Go source file
fn is_package_source(path: &Path) -> bool {
    let is_go = path.extension().and_then(|e| e.to_str()) == Some(GO_EXTENSION);
    let is_test = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(TEST_FILE_SUFFIX));
    is_go && !is_test
}

fn is_skipped_dir(dent: &DirEntry) -> bool {
    dent.depth() > 0
        && dent.file_type().is_some_and(|ft| ft.is_dir())
        && dent.file_name().to_str().is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn dir_name(dir: &Path) -> Option<&str> {
    dir.file_name().and_then(|n| n.to_str())
}

/// Walk the tree and register every directory that is a genuine package.
///
/// A directory is a package when the first non-test Go file in it that
/// parses declares a package named after the directory. Once a directory is
/// registered its remaining files are not looked at again here.
/// Returns the number of packages registered.
pub fn discover_packages(builder: &mut GraphBuilder) -> Result<usize> {
    let root = builder.layout().root.clone();
    debug!("Walking directory tree from root: {}", root.display());

    let walker = WalkBuilder::new(&root)
        // Hidden entries and paths listed in ignore files are part of the tree
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|dent| !is_skipped_dir(dent))
        .build();

    let mut registered = 0;
    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !dent.file_type().is_some_and(|ft| ft.is_file()) || !is_package_source(p) {
            continue;
        }

        let Some(dir) = p.parent() else {
            continue;
        };
        // Files directly in the root do not form a package of the tree
        if dir == root.as_path() || builder.lookup(dir).is_some() {
            continue;
        }

        let package_name = match read_package_clause(p) {
            Ok(name) => name,
            Err(e) => {
                debug!("Skipping unparsable file {}: {:#}", p.display(), e);
                continue;
            }
        };

        if dir_name(dir) == Some(package_name.as_str()) {
            builder.register(dir)?;
            registered += 1;
        } else {
            trace!(
                "File {} declares package '{}', not a package of its directory",
                p.display(),
                package_name
            );
        }
    }

    debug!("Discovered {} packages", registered);
    Ok(registered)
}

/// Record the imports of every registered package as graph edges.
///
/// Every non-test Go file of a package directory whose package clause names
/// the package contributes its imports. An unreadable package directory is
/// fatal; a file that fails to parse is skipped.
/// Returns the number of files whose imports were recorded.
pub fn scan_dependencies(builder: &mut GraphBuilder) -> Result<usize> {
    let mut scanned = 0;

    for id in builder.graph().ids_by_identity() {
        let pkg = builder.graph().package(id);
        if PSEUDO_PACKAGES.contains(&pkg.relative_path()) {
            continue;
        }

        let dir = pkg.identity().to_path_buf();
        let Some(expected) = dir_name(&dir).map(str::to_string) else {
            continue;
        };
        trace!("Scanning package '{}' in {}", pkg.name(), dir.display());

        let mut files: Vec<PathBuf> = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read package directory {}", dir.display()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()
            .with_context(|| format!("Failed to list package directory {}", dir.display()))?;
        files.sort();

        for file in files {
            if !file.is_file() || !is_package_source(&file) {
                continue;
            }

            let source = match read_go_source(&file) {
                Ok(source) => source,
                Err(e) => {
                    warn!("Skipping {}: {:#}", file.display(), e);
                    continue;
                }
            };
            if source.package_name != expected {
                trace!("Ignoring {}: package '{}'", file.display(), source.package_name);
                continue;
            }

            builder.record_imports(id, &source.imports);
            scanned += 1;
        }
    }

    debug!("Recorded imports of {} source files", scanned);
    Ok(scanned)
}
