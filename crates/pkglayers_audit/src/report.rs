use std::{
    collections::BTreeMap,
    io::{self, Write},
};

use colored::Colorize;
use log::{debug, trace};
use pkglayers_core::{GraphError, PackageGraph, PackageId};

use crate::{
    depth::DepthAnalyzer,
    reach::ReachabilityAnalyzer,
    types::{DependencyEntry, LayerReport, PackageRecord},
};

/// Appended to dependencies that are neither learned nor predeclared
pub const UNLEARNED_MARKER: &str = "*";

/// Spaces between table columns
const COLUMN_PADDING: usize = 2;

/// Group the packages of `graph` by dependency depth and build one record per
/// reported package.
///
/// Learned and predeclared packages (depth -1) are left out, as are internal
/// packages that no public package reaches.
pub fn assemble_report(graph: &PackageGraph) -> Result<LayerReport, GraphError> {
    let mut depths = DepthAnalyzer::new(graph);
    let mut reach = ReachabilityAnalyzer::new(graph);

    let mut by_depth: BTreeMap<i32, Vec<PackageId>> = BTreeMap::new();
    for (id, _) in graph.packages() {
        let depth = depths.dependency_depth(id)?;
        by_depth.entry(depth).or_default().push(id);
    }
    debug!("Grouped {} packages into {} depths", graph.len(), by_depth.len());

    let mut report = LayerReport::default();
    for (&depth, ids) in &mut by_depth {
        if depth < 0 {
            report.settled += ids.len();
            continue;
        }

        ids.sort_by(|a, b| {
            let (a, b) = (graph.package(*a), graph.package(*b));
            (a.name(), a.identity()).cmp(&(b.name(), b.identity()))
        });

        for &id in ids.iter() {
            let pkg = graph.package(id);
            let imported = reach.is_imported(id);
            if pkg.is_internal() && !imported {
                trace!("Suppressing unimported internal package '{}'", pkg.name());
                report.suppressed += 1;
                continue;
            }

            let dependencies = pkg
                .dependencies()
                .iter()
                .map(|dep| {
                    let dep = graph.package(*dep);
                    DependencyEntry { name: dep.name().to_string(), unlearned: !dep.is_settled() }
                })
                .collect();

            report.records.push(PackageRecord {
                name: pkg.name().to_string(),
                depth,
                imported,
                dependencies,
            });
        }
    }

    debug!(
        "Report has {} packages ({} settled, {} suppressed)",
        report.records.len(),
        report.settled,
        report.suppressed
    );
    Ok(report)
}

impl LayerReport {
    /// The report as table rows: name, depth, imported flag, dependency.
    ///
    /// A package's first row carries its first dependency; every further
    /// dependency gets a continuation row with only the dependency column set.
    pub fn rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::new();
        for record in &self.records {
            let header =
                [record.name.clone(), record.depth.to_string(), record.imported_flag().to_string()];

            let Some((first, rest)) = record.dependencies.split_first() else {
                rows.push(header.to_vec());
                continue;
            };

            let mut row = header.to_vec();
            row.push(first.label());
            rows.push(row);

            for dependency in rest {
                rows.push(vec![String::new(), String::new(), String::new(), dependency.label()]);
            }
        }
        rows
    }
}

/// Lay rows out as aligned columns. Every column is as wide as its widest cell
/// plus padding; trailing whitespace is trimmed.
pub fn format_table(rows: &[Vec<String>]) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (idx, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if idx + 1 < row.len() {
                    let pad = widths[idx] - cell.chars().count() + COLUMN_PADDING;
                    line.extend(std::iter::repeat_n(' ', pad));
                }
            }
            line.trim_end().to_string()
        })
        .collect()
}

pub fn print_layer_table<W: Write>(writer: &mut W, report: &LayerReport) -> io::Result<()> {
    debug!("Printing table for {} packages", report.records.len());
    for line in format_table(&report.rows()) {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn print_layer_json<W: Write>(writer: &mut W, report: &LayerReport) -> io::Result<()> {
    debug!("Printing JSON for {} packages", report.records.len());
    serde_json::to_writer_pretty(&mut *writer, &report.records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn print_nothing_to_review_message<W: Write>(
    writer: &mut W,
    report: &LayerReport,
) -> io::Result<()> {
    debug!("Nothing left to review");
    writeln!(
        writer,
        "{} Nothing left to review ({} packages learned or predeclared)",
        "✓".green().bold(),
        report.settled
    )?;
    writer.flush()?;
    Ok(())
}
