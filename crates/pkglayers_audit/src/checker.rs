use anyhow::{Result, anyhow};
use log::{debug, info, warn};

use pkglayers_core::{GraphBuilder, discover_packages, read_learned_packages, scan_dependencies};

use crate::{config::Config, report::assemble_report, types::AuditResult};

/// Build the package graph of the configured tree and assemble its layer report.
///
/// Packages are discovered first, then the learned list is applied, then every
/// package's imports are scanned into edges. The graph is only read after that.
pub fn run_layer_audit(cfg: &Config) -> Result<AuditResult> {
    info!("Starting layer audit");

    let layout = cfg.tree_layout()?;
    let root = layout.root.clone();
    let mut builder = GraphBuilder::new(layout);
    builder.prime_pseudo_packages()?;

    let discovered = discover_packages(&mut builder)?;
    if discovered == 0 {
        warn!("No packages found under {}", root.display());
        return Err(anyhow!("No packages found under {}", root.display()));
    }
    info!("Found {} packages", discovered);

    let learned = read_learned_packages(&cfg.input_file);
    let flagged = builder.mark_learned(&learned);
    debug!("Flagged {} of {} learned import paths", flagged, learned.len());

    let files_scanned = scan_dependencies(&mut builder)?;
    let graph = builder.finish();

    let report = assemble_report(&graph)?;
    let learned_packages = graph.packages().filter(|(_, pkg)| pkg.is_learned()).count();

    info!("Layer audit complete. Reporting {} packages", report.records.len());
    Ok(AuditResult { report, packages_analyzed: graph.len(), learned_packages, files_scanned })
}
