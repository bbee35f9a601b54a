//! doxograph CLI: dataset integrity checks and graph analytics.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;

use doxograph::dataset::DatasetManifest;
use doxograph::pipeline;
use doxograph::report::ValidationReport;
use doxograph::validate::Severity;

#[derive(Parser)]
#[command(name = "doxograph", version, about = "Knowledge-graph dataset validator")]
struct Cli {
    /// Path to a dataset manifest (doxograph.toml).
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    /// Data directory for the conventional five-file layout.
    /// A `doxograph.toml` inside it takes precedence.
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the dataset and print the full report.
    Check {
        /// Treat advisory warnings as failures (for CI gates).
        #[arg(long)]
        strict: bool,
    },

    /// Print analytics only: distribution, orphans, connectivity ranking.
    Stats,

    /// Export the full structured report as JSON.
    Export,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let manifest = resolve_manifest(&cli)?;

    match cli.command {
        Commands::Check { strict } => {
            let report = pipeline::run(&manifest);
            print_findings(&report);
            print_summary(&report);
            print_analytics(&report);

            println!("\nOutcome: {}", report.outcome);
            let failed = report.outcome.is_failure() || (strict && report.warnings > 0);
            if failed {
                std::process::exit(1);
            }
        }

        Commands::Stats => {
            let report = pipeline::run(&manifest);
            print_summary(&report);
            print_analytics(&report);
        }

        Commands::Export => {
            let report = pipeline::run(&manifest);
            println!("{}", report.to_json()?);
        }
    }

    Ok(())
}

/// Pick the manifest: explicit flag, then `doxograph.toml` in the data
/// directory, then the conventional layout.
fn resolve_manifest(cli: &Cli) -> Result<DatasetManifest> {
    if let Some(path) = &cli.manifest {
        return Ok(DatasetManifest::load(path).map_err(doxograph::error::DoxaError::from)?);
    }
    let candidate = cli.data_dir.join("doxograph.toml");
    if candidate.exists() {
        return Ok(DatasetManifest::load(&candidate).map_err(doxograph::error::DoxaError::from)?);
    }
    Ok(DatasetManifest::conventional(&cli.data_dir))
}

fn print_findings(report: &ValidationReport) {
    if report.findings.is_empty() {
        println!("No findings.");
        return;
    }
    println!("Findings ({}):", report.findings.len());
    for finding in &report.findings {
        let marker = match finding.severity {
            Severity::Error => "error  ",
            Severity::Warning => "warning",
        };
        match &finding.subject {
            Some(subject) => println!("  {marker} [{}] {}: {}", finding.category, subject, finding.message),
            None => println!("  {marker} [{}] {}", finding.category, finding.message),
        }
    }
}

fn print_summary(report: &ValidationReport) {
    println!("\nDataset:");
    println!("  persons:       {}", report.persons);
    println!("  entities:      {}", report.entities);
    println!("  unique nodes:  {}", report.unique_nodes);
    println!("  relationships: {}", report.relationships);
    for (kind, count) in &report.relationships_by_kind {
        println!("    {kind}: {count}");
    }
    println!("  collections:");
    for collection in &report.collections {
        println!(
            "    {} [{}]: {} records",
            collection.name, collection.kind, collection.records
        );
    }
}

fn print_analytics(report: &ValidationReport) {
    println!("\nDegree distribution:");
    for bucket in &report.degree_distribution {
        println!("  degree {:>3}: {} node(s)", bucket.degree, bucket.nodes);
    }

    println!(
        "\nDegree summary: mean {:.1}, median {}, max {}",
        report.degree_summary.mean, report.degree_summary.median, report.degree_summary.max
    );
    println!(
        "Components: {} (largest: {})",
        report.components.count, report.components.largest
    );

    print_orphans("persons", &report.orphan_persons);
    print_orphans("entities", &report.orphan_entities);

    if !report.top_connected.is_empty() {
        println!("\nMost connected (top {}):", report.top_connected.len());
        for (i, entry) in report.top_connected.iter().enumerate() {
            println!(
                "  {}. \"{}\" / {} [{}] ({} relationship(s))",
                i + 1,
                entry.display,
                entry.id,
                entry.kind,
                entry.degree
            );
        }
    }
}

fn print_orphans(label: &str, orphans: &doxograph::report::OrphanList) {
    if orphans.total == 0 {
        println!("\nOrphan {label}: none");
        return;
    }
    println!("\nOrphan {label} ({}):", orphans.total);
    for id in &orphans.preview {
        println!("  {id}");
    }
    if orphans.total > orphans.preview.len() {
        println!("  ... and {} more", orphans.total - orphans.preview.len());
    }
}
