use anyhow::{Context, Result, anyhow, bail};
use log::{debug, trace, warn};
use path_clean::clean;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::constants::DEFAULT_VENDOR_SEGMENT;

/// Where the package tree lives and how vendored packages are laid out in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLayout {
    pub root: PathBuf,
    pub vendor_segment: String,
}

impl TreeLayout {
    /// An existing `root` is canonicalized (so `.` works); otherwise it is only
    /// cleaned lexically.
    pub fn new(root: impl AsRef<Path>, vendor_segment: impl Into<String>) -> Self {
        let root = root.as_ref();
        let root = root.canonicalize().unwrap_or_else(|_| clean_path(root));
        Self { root, vendor_segment: vendor_segment.into() }
    }
}

/// Settings read from the tree configuration file. Either value may be
/// overridden on the command line, so both are optional here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeConfig {
    pub root: Option<PathBuf>,
    pub vendor_segment: Option<String>,
}

impl TreeConfig {
    /// Build the layout, failing if no root was configured anywhere
    pub fn into_layout(self) -> Result<TreeLayout> {
        let root = self.root.ok_or_else(|| anyhow!("standardLibraryPath is not configured"))?;
        let vendor = self.vendor_segment.unwrap_or_else(|| DEFAULT_VENDOR_SEGMENT.to_string());
        Ok(TreeLayout::new(root, vendor))
    }
}

/// Lexically clean a path (`a/./b/../c` -> `a/c`) without touching the filesystem.
pub(crate) fn clean_path(path: &Path) -> PathBuf {
    PathBuf::from(clean(path.to_string_lossy().to_string()))
}

pub fn read_tree_config(path: &Path) -> Result<TreeConfig> {
    debug!("Reading tree config from: {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_tree_config(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

pub fn parse_tree_config(content: &str) -> Result<TreeConfig> {
    let mut cfg = TreeConfig::default();

    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Split at the first ':' only, so Windows drive letters survive in values
        let Some((key, value)) = line.split_once(':') else {
            bail!("Error parsing line {}: expected 'key: value'", line_number);
        };
        let value = value.trim();
        trace!("Config line {}: {} = {}", line_number, key.trim(), value);

        match key.trim() {
            "standardLibraryPath" => cfg.root = Some(PathBuf::from(value)),
            "vendorRelPath" => cfg.vendor_segment = Some(value.to_string()),
            other => bail!("Invalid config key on line {}: {}", line_number, other),
        }
    }

    Ok(cfg)
}

/// Read the import paths of packages that have already been learned.
///
/// A missing or unreadable file is not an error: the run simply starts with
/// nothing flagged as learned.
pub fn read_learned_packages(path: &Path) -> Vec<String> {
    debug!("Reading learned packages from: {}", path.display());
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Could not read learned packages from {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let learned: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    debug!("Loaded {} learned import paths", learned.len());
    learned
}
