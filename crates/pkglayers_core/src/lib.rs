//! Core model for auditing the layering of a Go package tree.
//!
//! This crate provides:
//! - The package registry and dependency graph (`PackageGraph`)
//! - Graph construction from raw import paths (`GraphBuilder`, `ImportResolver`)
//! - Reading package clauses and imports from Go sources
//! - Discovering the packages of a tree and scanning their imports
//! - Reading the tree configuration and the list of learned packages

mod builder;
mod collector;
mod config;
mod constants;
mod error;
mod graph;
mod parser;
mod resolver;
mod types;

// Re-export public API
pub use builder::GraphBuilder;
pub use collector::{discover_packages, scan_dependencies};
pub use config::{
    TreeConfig, TreeLayout, parse_tree_config, read_learned_packages, read_tree_config,
};
pub use constants::{
    DEFAULT_VENDOR_SEGMENT, GO_EXTENSION, INTERNAL_SEGMENT, PREDECLARED_PACKAGES,
    PSEUDO_PACKAGES, SKIPPED_DIRS, TEST_FILE_SUFFIX, VENDOR_NAMESPACE_PATTERN,
};
pub use error::GraphError;
pub use graph::PackageGraph;
pub use parser::{GoSource, parse_go_source, read_go_source, read_package_clause};
pub use resolver::ImportResolver;
pub use types::{Package, PackageId};
