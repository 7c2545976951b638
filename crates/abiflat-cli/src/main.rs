//! abiflat CLI
//!
//! Flatten contract build artifacts into per-contract ABI files.

use abiflat_exporter::{
    ExportOptions, ExportReport, Exporter, FailurePolicy, Manifest, MANIFEST_FILE_NAME,
};
use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// Environment variable holding a tracing filter, e.g. `abiflat_exporter=debug`
const LOG_ENV_VAR: &str = "ABIFLAT_LOG";

#[derive(Parser)]
#[command(name = "abiflat")]
#[command(about = "Extract contract ABIs from build artifacts into flat JSON files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write `<out-dir>/<key>.json` for every manifest entry (default)
    Export(ExportArgs),

    /// Show where each ABI is read from and written to, without touching files
    Plan(SourceArgs),
}

#[derive(Args, Debug, Default, Clone)]
struct SourceArgs {
    /// Directory that source roots and the output directory are relative to
    /// [default: current directory]
    #[arg(short, long)]
    base_dir: Option<PathBuf>,

    /// TOML manifest listing sources and contracts
    /// [default: <base-dir>/abiflat.toml if present, built-in mappings otherwise]
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Output directory, overriding the manifest (must already exist)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default, Clone)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Keep going after a failed entry and report every failure at the end
    #[arg(short, long)]
    keep_going: bool,
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::filter::{EnvFilter, LevelFilter};

    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .with_env_var(LOG_ENV_VAR)
                .from_env_lossy(),
        )
        .init();
}

fn build_exporter(args: &SourceArgs, policy: FailurePolicy) -> Result<Exporter> {
    let base_dir = match &args.base_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let manifest = match &args.manifest {
        Some(path) => {
            let path = base_dir.join(path);
            Manifest::load(&path)
                .with_context(|| format!("Failed to load manifest {:?}", path))?
        }
        None => Manifest::discover(&base_dir).with_context(|| {
            format!("Failed to load {:?}", base_dir.join(MANIFEST_FILE_NAME))
        })?,
    };

    debug!(base = %base_dir.display(), entries = manifest.entries().len(), "manifest ready");

    let options = ExportOptions { base_dir, output_dir: args.out_dir.clone(), policy };
    Ok(Exporter::with_options(manifest, options))
}

fn run_export(args: &ExportArgs) -> Result<ExportReport> {
    let policy = if args.keep_going { FailurePolicy::CollectAll } else { FailurePolicy::FailFast };
    let exporter = build_exporter(&args.source, policy)?;

    println!("🚀 abiflat");
    println!("   Base: {:?}", exporter.options().base_dir);
    println!("   Output: {:?}", exporter.output_dir());
    println!();

    let report = exporter.export_with_progress(|entry| {
        println!("📦 {} {}", entry.key(), entry.artifact());
    });

    print_summary(&report);

    let total = report.written.len() + report.failures.len() + report.skipped.len();
    let failed = report.failures.len();
    report.into_result().with_context(|| format!("{} of {} entries failed", failed, total))
}

fn print_summary(report: &ExportReport) {
    println!();
    if report.is_success() {
        println!("✅ Wrote {} ABI files", report.written.len());
        return;
    }

    println!("⚠️  Wrote {} ABI files before failing", report.written.len());
    for failure in &report.failures {
        eprintln!("❌ {}: {}", failure.entry.key(), failure.error);
    }
    if !report.skipped.is_empty() {
        eprintln!("   Skipped {} remaining entries", report.skipped.len());
    }
}

fn show_plan(args: &SourceArgs) -> Result<()> {
    let exporter = build_exporter(args, FailurePolicy::default())?;

    println!("📋 Output: {:?}", exporter.output_dir());
    for planned in exporter.plan() {
        println!("   {} ({})", planned.entry.key(), planned.entry.artifact());
        println!("      from {:?}", planned.artifact_path);
        println!("      to   {:?}", planned.output_path);
    }

    let collisions = exporter.manifest().colliding_keys();
    if !collisions.is_empty() {
        println!();
        println!("⚠️  Keys declared by several sources (last wins): {}", collisions.join(", "));
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Export(args)) => {
            run_export(&args)?;
        }
        Some(Commands::Plan(args)) => show_plan(&args)?,
        None => {
            run_export(&ExportArgs::default())?;
        }
    }

    Ok(())
}
