//! # phpp2csv
//!
//! Command-line front end: reads a PHPP workbook and writes the report CSV
//! files into a directory.

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use phpp_core::{
    is_supported_upload, load_dataset, Co2eMethod, FactorCache, ReportConfig, TemplateVersion,
};
use phpp_report::ReportAssembler;
use phpp_sheet::Workbook;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// phpp2csv - PHPP workbook to CSV report files
#[derive(Parser)]
#[command(name = "phpp2csv")]
#[command(author, version, about = "Generate CSV reports from a PHPP workbook", long_about = None)]
struct Cli {
    /// PHPP workbook (.xlsx)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Directory the CSV files are written to
    #[arg(short, long, default_value = "out")]
    out: PathBuf,

    /// CO2e reference factor file
    #[arg(long, default_value = "data/co2e_region_factors.json")]
    factors: PathBuf,

    /// Grid region used for CO2e factors
    #[arg(short, long, default_value = "CAMX")]
    region: String,

    /// Template version of the workbook
    #[arg(long, default_value = "phpp-10")]
    template: TemplateVersion,

    /// YAML report configuration; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Annual CO2e limit in tons
    #[arg(long)]
    co2e_limit: Option<f64>,

    /// Envelope assembly to leave out of the variant inputs (repeatable)
    #[arg(long = "omit", value_name = "ASSEMBLY")]
    omit: Vec<String>,

    /// Use the workbook's own CO2e block instead of the fuel rollup
    #[arg(long)]
    precomputed_co2e: bool,

    /// Credit solar PV against net source energy
    #[arg(long)]
    solar_credit: bool,

    /// List the report views and exit
    #[arg(long)]
    list_views: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let assembler = ReportAssembler::new();
    if cli.list_views {
        for name in assembler.views().names() {
            println!("{name}");
        }
        return Ok(());
    }

    if let Err(e) = run(&cli, &assembler) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
    Ok(())
}

/// Configuration file, then command-line overrides.
fn report_config(cli: &Cli) -> Result<ReportConfig> {
    let mut config = match &cli.config {
        Some(path) => ReportConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?,
        None => ReportConfig::default(),
    };
    if let Some(limit) = cli.co2e_limit {
        config = config.with_co2e_limit(limit);
    }
    if !cli.omit.is_empty() {
        config = config.with_omitted_assemblies(cli.omit.clone());
    }
    if cli.precomputed_co2e {
        config.co2e_method = Co2eMethod::Precomputed;
    }
    if cli.solar_credit {
        config.solar_credit = true;
    }
    Ok(config)
}

fn run(cli: &Cli, assembler: &ReportAssembler) -> Result<()> {
    let file_name = cli
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if !is_supported_upload(file_name) {
        bail!(
            "Unsupported file type: '{}'. Only .xlsx workbooks are accepted",
            cli.file.display()
        );
    }

    let config = report_config(cli)?;
    let factors = FactorCache::new(&cli.factors)
        .region(&cli.region)
        .with_context(|| format!("Failed to load CO2e factors for region {}", cli.region))?;

    let mut workbook = Workbook::open(&cli.file)
        .with_context(|| format!("Failed to open workbook: {}", cli.file.display()))?;
    let dataset = load_dataset(&mut workbook, cli.template.schema())
        .with_context(|| format!("Failed to read workbook: {}", cli.file.display()))?;
    for diagnostic in dataset.diagnostics() {
        warn!("{diagnostic}");
        eprintln!("{} {diagnostic}", "Warning:".yellow().bold());
    }

    let files = assembler.build(&dataset, &config, &factors)?;
    write_files(&cli.out, &files)?;

    println!(
        "{} {} files written to {}",
        "Done:".green().bold(),
        files.len(),
        cli.out.display()
    );
    Ok(())
}

fn write_files(dir: &Path, files: &[phpp_report::ReportFile]) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    for file in files {
        let path = dir.join(file.file_name());
        std::fs::write(&path, &file.csv)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote report file");
    }
    Ok(())
}
