use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use pkglayers_audit::{Config, OutputFormat};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "pkglayers")]
#[command(about = "Tools for learning a Go source tree bottom-up", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Group the packages of a Go source tree into dependency layers
    Layers(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Layers(cfg) => {
            info!("Running layer audit with format: {:?}", cfg.format);
            debug!(
                "Config: config_file={:?}, input_file={:?}, root={:?}, vendor={:?}",
                cfg.config_file, cfg.input_file, cfg.root, cfg.vendor
            );

            let result = pkglayers_audit::run_layer_audit(&cfg)?;
            debug!("Reporting {} packages", result.report.records.len());

            match cfg.format {
                OutputFormat::Json => {
                    pkglayers_audit::print_layer_json(&mut stdout, &result.report)?
                }
                OutputFormat::Table if result.report.records.is_empty() => {
                    info!("Every package is learned");
                    pkglayers_audit::print_nothing_to_review_message(
                        &mut std::io::stderr(),
                        &result.report,
                    )?
                }
                OutputFormat::Table => {
                    pkglayers_audit::print_layer_table(&mut stdout, &result.report)?
                }
            }
            stdout.flush()?;

            let elapsed_ms = start.elapsed().as_millis();
            eprintln!(
                "\n{} Finished in {}ms on {} packages ({} learned, {} reported).",
                "●".bright_blue(),
                elapsed_ms.to_string().cyan(),
                result.packages_analyzed.to_string().cyan(),
                result.learned_packages.to_string().cyan(),
                result.report.records.len().to_string().cyan()
            );

            Ok(())
        }
    }
}
