//! Dependency layer audit for Go package trees.
//!
//! This crate walks a Go source tree, builds the graph of its packages and
//! groups them into layers by dependency depth, so that packages can be
//! learned bottom-up: every package in a layer only depends on packages in
//! lower layers or on packages already learned.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use pkglayers_audit::{Config, OutputFormat, run_layer_audit};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     config_file: "config.txt".into(),
//!     input_file: "input.txt".into(),
//!     root: Some(std::path::PathBuf::from("/usr/local/go/src")),
//!     vendor: None,
//!     format: OutputFormat::Table,
//! };
//!
//! let result = run_layer_audit(&cfg)?;
//!
//! // Use buffered output for better performance
//! let mut stdout = BufWriter::new(std::io::stdout());
//! pkglayers_audit::print_layer_table(&mut stdout, &result.report)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod checker;
mod config;
mod depth;
mod reach;
mod report;
mod types;

// Re-export public API
pub use checker::run_layer_audit;
pub use config::{Config, OutputFormat};
pub use depth::{DepthAnalyzer, SETTLED_DEPTH};
pub use reach::ReachabilityAnalyzer;
pub use report::{
    UNLEARNED_MARKER, assemble_report, format_table, print_layer_json, print_layer_table,
    print_nothing_to_review_message,
};
pub use types::{AuditResult, DependencyEntry, LayerReport, PackageRecord};
