#![forbid(unsafe_code)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use pqcviz_core::{ImageFormat, ReportConfig};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod chart;
mod inspect;
mod report;

const DEFAULT_CONFIG_FILE: &str = "pqcviz.toml";

#[derive(Debug, Parser)]
#[command(name = "pqcviz", version, about = "Render PQC benchmark comparison charts from BenchmarkDotNet logs")]
struct Cli {
	/// Config file (default: $PQCVIZ_CONFIG, then ./pqcviz.toml when present)
	#[arg(long, global = true)]
	config: Option<PathBuf>,
	/// Directory holding the benchmark logs and artifact listing
	#[arg(long, global = true)]
	results_dir: Option<PathBuf>,
	/// Directory the charts are written to
	#[arg(long, global = true)]
	output_dir: Option<PathBuf>,
	/// Image format: svg or png
	#[arg(long, global = true)]
	format: Option<ImageFormat>,
	/// Output resolution in dots per inch
	#[arg(long, global = true)]
	dpi: Option<u32>,

	#[command(subcommand)]
	command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
	/// Render every chart (default)
	Render,
	/// Print the parsed records without rendering
	Inspect,
	/// Config helpers
	Config {
		#[command(subcommand)]
		action: ConfigCmd,
	},
}

#[derive(Debug, Subcommand)]
enum ConfigCmd {
	/// Show effective config (resolved from file, env and flags)
	Show,
	/// Write a pqcviz.toml template
	WriteTemplate {
		/// Destination path (default: ./pqcviz.toml)
		#[arg(long)]
		path: Option<PathBuf>,
		/// Overwrite if file exists
		#[arg(long)]
		force: bool,
	},
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	if let Some(Commands::Config { action: ConfigCmd::WriteTemplate { path, force } }) = &cli.command {
		return write_template(path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)), *force);
	}

	let cfg = resolve_config(&cli)?;
	init_tracing(&cfg.log_level);

	match cli.command.unwrap_or(Commands::Render) {
		Commands::Render => {
			let written = report::run(&cfg)?;
			tracing::info!(charts = written.len(), "report complete");
			Ok(())
		}
		Commands::Inspect => inspect::run(&cfg),
		Commands::Config { action: ConfigCmd::Show } => {
			println!("{}", serde_json::to_string_pretty(&cfg)?);
			Ok(())
		}
		Commands::Config { action: ConfigCmd::WriteTemplate { .. } } => Ok(()),
	}
}

/// Defaults, then the config file, then `PQCVIZ_*` env, then command line flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<ReportConfig> {
	let file = match &cli.config {
		Some(path) => Some(path.clone()),
		None => std::env::var("PQCVIZ_CONFIG")
			.ok()
			.map(|p| p.trim().to_string())
			.filter(|p| !p.is_empty())
			.map(PathBuf::from)
			.or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists())),
	};

	let mut cfg = match file {
		Some(path) => ReportConfig::load_from_file(&path)
			.with_context(|| format!("failed to load config {}", path.display()))?,
		None => ReportConfig::default(),
	};
	cfg.apply_env()?;
	apply_flags(cli, &mut cfg);
	cfg.validate()?;
	Ok(cfg)
}

fn apply_flags(cli: &Cli, cfg: &mut ReportConfig) {
	if let Some(dir) = &cli.results_dir { cfg.results_dir = dir.clone(); }
	if let Some(dir) = &cli.output_dir { cfg.output_dir = dir.clone(); }
	if let Some(format) = cli.format { cfg.format = format; }
	if let Some(dpi) = cli.dpi { cfg.dpi = dpi; }
}

fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(std::io::stderr().is_terminal())
		.with_target(false)
		.try_init();
}

fn write_template(path: PathBuf, force: bool) -> anyhow::Result<()> {
	if path.exists() && !force {
		eprintln!("refusing to overwrite existing file: {} (use --force)", path.display());
		std::process::exit(2);
	}
	std::fs::write(&path, TEMPLATE_PQCVIZ_TOML).with_context(|| format!("failed to write {}", path.display()))?;
	eprintln!("wrote {}", path.display());
	Ok(())
}

const TEMPLATE_PQCVIZ_TOML: &str = r#"# pqcviz configuration (template)

# trace | debug | info | warn | error (RUST_LOG takes precedence)
log_level = "info"

# Inputs, resolved against results_dir
results_dir = "./results"
kem_log = "PqcResearchApp.Benchmarks.KemBenchmarks.log"
sig_log = "PqcResearchApp.Benchmarks.SignatureBenchmarks.log"
artifact_file = "artifact_sizes.txt"

# Charts
output_dir = "."
# svg, or png when built with the `png` feature
format = "svg"
dpi = 300
figure_width_in = 12.0
figure_height_in = 7.0
font_scale = 1.1
"#;
