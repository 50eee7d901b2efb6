use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

use pkglayers_core::{TreeConfig, TreeLayout, read_tree_config};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "layers")]
#[command(about = "Group the packages of a Go source tree into dependency layers")]
pub struct Config {
    /// Tree configuration file with standardLibraryPath and vendorRelPath
    #[arg(long, default_value = "config.txt")]
    pub config_file: PathBuf,

    /// Import paths of packages already learned, one per line
    #[arg(long, default_value = "input.txt")]
    pub input_file: PathBuf,

    /// Root of the package tree (overrides standardLibraryPath)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Vendor directory below the root (overrides vendorRelPath)
    #[arg(long)]
    pub vendor: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl Config {
    /// Resolve the tree layout from the config file and command-line overrides.
    ///
    /// The config file may be missing when `--root` is given.
    pub fn tree_layout(&self) -> Result<TreeLayout> {
        let mut tree = if self.root.is_some() && !self.config_file.exists() {
            debug!("No config file at {}, using command line", self.config_file.display());
            TreeConfig::default()
        } else {
            read_tree_config(&self.config_file)?
        };

        if let Some(root) = &self.root {
            debug!("Using provided root directory: {:?}", root);
            tree.root = Some(root.clone());
        }
        if let Some(vendor) = &self.vendor {
            tree.vendor_segment = Some(vendor.clone());
        }

        let layout = tree.into_layout()?;
        info!("Using root directory: {}", layout.root.display());
        Ok(layout)
    }
}
