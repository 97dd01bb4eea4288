//! Command-line interface for the KPI pipeline
//!
//! Defines the `ops-kpi` arguments with the clap derive API, applies them on
//! top of the configuration file, and reports run results on stdout.

use crate::config::PipelineConfig;
use crate::processor::{Pipeline, RunSummary, parse_run_date};
use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::debug;

/// CLI arguments for the operations KPI pipeline
///
/// Validates raw sensor readings into a clean set and a quarantine, then
/// aggregates the clean set into per-asset health and per-plant KPIs.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ops-kpi",
    version,
    about = "Validate industrial sensor readings and publish daily asset and plant KPIs"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Root of the data lake (bronze, silver, quarantine and gold zones)
    #[arg(long = "lake-root", value_name = "PATH", global = true)]
    pub lake_root: Option<PathBuf>,

    /// Directory for data quality reports
    #[arg(long = "reports-dir", value_name = "PATH", global = true)]
    pub reports_dir: Option<PathBuf>,

    /// Directory for exported plant KPI copies
    #[arg(long = "exports-dir", value_name = "PATH", global = true)]
    pub exports_dir: Option<PathBuf>,

    /// Path to configuration file (TOML format)
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Show progress bars while processing
    #[arg(long = "progress", global = true)]
    pub progress: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Pipeline stages
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Bronze to silver: deduplicate, validate, quarantine and report
    Silver(DateArgs),
    /// Silver to gold: per-asset health and per-plant KPIs
    Gold(DateArgs),
    /// Both stages, published together
    Run(DateArgs),
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DateArgs {
    /// Processing date (YYYY-MM-DD)
    #[arg(short = 'd', long = "date", value_name = "YYYY-MM-DD")]
    pub date: String,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn date(&self) -> &str {
        match &self.command {
            Commands::Silver(a) | Commands::Gold(a) | Commands::Run(a) => &a.date,
        }
    }

    pub fn stage_name(&self) -> &'static str {
        match self.command {
            Commands::Silver(_) => "silver",
            Commands::Gold(_) => "gold",
            Commands::Run(_) => "run",
        }
    }
}

/// Set up structured logging based on CLI arguments
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ops_kpi_pipeline={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Load configuration from file (if given) and apply CLI overrides
pub fn load_configuration(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config_file {
        Some(path) => PipelineConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(path) = &args.lake_root {
        config = config.with_lake_root(path.clone());
    }
    if let Some(path) = &args.reports_dir {
        config = config.with_reports_dir(path.clone());
    }
    if let Some(path) = &args.exports_dir {
        config = config.with_exports_dir(path.clone());
    }
    if args.progress {
        config = config.with_progress();
    }

    Ok(config)
}

/// Execute the selected stage
pub fn run(args: &Args) -> Result<RunSummary> {
    let date = parse_run_date(args.date())?;
    let config = load_configuration(args)?;
    let pipeline = Pipeline::new(config);

    let summary = match &args.command {
        Commands::Silver(_) => pipeline.run_silver(date)?,
        Commands::Gold(_) => pipeline.run_gold(date)?,
        Commands::Run(_) => pipeline.run_all(date)?,
    };

    if !args.quiet {
        print_summary(args.stage_name(), &summary);
    }
    Ok(summary)
}

/// Human-readable run report on stdout
pub fn print_summary(stage: &str, summary: &RunSummary) {
    println!();
    println!(
        "{} {} for {}",
        "✔".bright_green().bold(),
        format!("ops-kpi {}", stage).bright_white().bold(),
        summary.date.bright_cyan()
    );

    if let Some(report) = &summary.quality {
        println!("  {}", "Quality".bright_yellow().bold());
        println!("    Total rows read:   {}", report.total);
        println!(
            "    Clean:             {} ({:.1}%)",
            report.clean.to_string().bright_green(),
            report.clean_rate()
        );
        println!(
            "    Quarantined:       {} ({:.1}%)",
            report.rejects.to_string().bright_red(),
            report.reject_rate()
        );
        println!("    Duplicates:        {}", report.dup_rejects);
        for bucket in report.reasons.iter().take(5) {
            let count = format!("{:>6}", bucket.count);
            println!("      {} {}", count.bright_black(), bucket.reason);
        }
    }

    if summary.assets > 0 || summary.plants > 0 {
        println!("  {}", "Aggregates".bright_yellow().bold());
        println!("    Clean readings:    {}", summary.clean_readings);
        println!("    Assets:            {}", summary.assets);
        println!("    Plants:            {}", summary.plants);
    }

    println!("  {}", "Outputs".bright_yellow().bold());
    for path in &summary.outputs {
        println!("    {}", path.display().to_string().bright_black());
    }
    println!("  Completed in {} ms", summary.processing_time_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommand_with_globals() {
        let args = Args::try_parse_from([
            "ops-kpi",
            "--lake-root",
            "/data/lake",
            "run",
            "--date",
            "2026-02-02",
            "-vv",
        ])
        .unwrap();

        assert!(matches!(args.command, Commands::Run(_)));
        assert_eq!(args.date(), "2026-02-02");
        assert_eq!(args.lake_root, Some(PathBuf::from("/data/lake")));
        assert_eq!(args.get_log_level(), "debug");
        assert_eq!(args.stage_name(), "run");
    }

    #[test]
    fn test_date_is_required() {
        assert!(Args::try_parse_from(["ops-kpi", "silver"]).is_err());
        assert!(Args::try_parse_from(["ops-kpi"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let both = ["ops-kpi", "-q", "-v", "gold", "--date", "2026-02-02"];
        assert!(Args::try_parse_from(both).is_err());

        let args = Args::try_parse_from(["ops-kpi", "-q", "gold", "--date", "2026-02-02"]).unwrap();
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_cli_overrides_apply() {
        let args = Args::try_parse_from([
            "ops-kpi",
            "silver",
            "--date",
            "2026-02-02",
            "--reports-dir",
            "out/reports",
            "--exports-dir",
            "out/exports",
            "--progress",
        ])
        .unwrap();

        let config = load_configuration(&args).unwrap();
        assert_eq!(config.layout.reports_dir, PathBuf::from("out/reports"));
        assert_eq!(config.layout.exports_dir, PathBuf::from("out/exports"));
        assert_eq!(config.layout.lake_root, PathBuf::from("lake"));
        assert!(config.show_progress);
    }
}
