use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{
	fmt, fs,
	path::{Path, PathBuf},
	str::FromStr,
};

/// Default log names written by the benchmark harness.
pub const DEFAULT_KEM_LOG: &str = "PqcResearchApp.Benchmarks.KemBenchmarks.log";
pub const DEFAULT_SIG_LOG: &str = "PqcResearchApp.Benchmarks.SignatureBenchmarks.log";
pub const DEFAULT_ARTIFACT_FILE: &str = "artifact_sizes.txt";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const DPI_RANGE: std::ops::RangeInclusive<u32> = 50..=1200;

/// Image encoding of the rendered charts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
	#[default]
	Svg,
	Png,
}

impl ImageFormat {
	pub fn extension(self) -> &'static str {
		match self {
			Self::Svg => "svg",
			Self::Png => "png",
		}
	}
}

impl fmt::Display for ImageFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.extension()) }
}

impl FromStr for ImageFormat {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"svg" => Ok(Self::Svg),
			"png" => Ok(Self::Png),
			other => Err(format!("unknown image format: {other} (expected svg or png)")),
		}
	}
}

/// Everything a run needs, resolved once at startup and passed down explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
	pub log_level: String,
	pub results_dir: PathBuf,
	pub output_dir: PathBuf,
	pub kem_log: String,
	pub sig_log: String,
	pub artifact_file: String,
	pub format: ImageFormat,
	pub dpi: u32,
	/// Figure size in inches; the canvas is this times `dpi`.
	pub figure_width_in: f64,
	pub figure_height_in: f64,
	pub font_scale: f64,
}

impl Default for ReportConfig {
	fn default() -> Self {
		Self {
			log_level: "info".into(),
			results_dir: PathBuf::from("./results"),
			output_dir: PathBuf::from("."),
			kem_log: DEFAULT_KEM_LOG.into(),
			sig_log: DEFAULT_SIG_LOG.into(),
			artifact_file: DEFAULT_ARTIFACT_FILE.into(),
			format: ImageFormat::Svg,
			dpi: 300,
			figure_width_in: 12.0,
			figure_height_in: 7.0,
			font_scale: 1.1,
		}
	}
}

impl ReportConfig {
	pub fn builder() -> ReportConfigBuilder { ReportConfigBuilder::default() }

	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
		let data = fs::read_to_string(path)?;
		let cfg: Self = toml::from_str(&data)?;
		cfg.validate()?;
		Ok(cfg)
	}

	pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
		let data = toml::to_string_pretty(self).map_err(|e| Error::config(format!("toml encode error: {e}")))?;
		fs::write(path, data)?;
		Ok(())
	}

	pub fn from_env() -> Result<Self> {
		let mut cfg = Self::default();
		cfg.apply_env()?;
		cfg.validate()?;
		Ok(cfg)
	}

	/// Overlay `PQCVIZ_*` environment variables onto this config. Blank values are ignored.
	pub fn apply_env(&mut self) -> Result<()> {
		if let Some(v) = env_value("PQCVIZ_LOG_LEVEL") { self.log_level = v; }
		if let Some(v) = env_value("PQCVIZ_RESULTS_DIR") { self.results_dir = PathBuf::from(v); }
		if let Some(v) = env_value("PQCVIZ_OUTPUT_DIR") { self.output_dir = PathBuf::from(v); }
		if let Some(v) = env_value("PQCVIZ_FORMAT") { self.format = v.parse().map_err(Error::Config)?; }
		if let Some(v) = env_value("PQCVIZ_DPI") {
			self.dpi = v.parse().map_err(|_| Error::config(format!("invalid PQCVIZ_DPI: {v}")))?;
		}
		Ok(())
	}

	pub fn validate(&self) -> Result<()> {
		if !LOG_LEVELS.contains(&self.log_level.as_str()) {
			return Err(Error::config(format!("invalid log_level: {}", self.log_level)));
		}
		if !DPI_RANGE.contains(&self.dpi) {
			return Err(Error::config(format!(
				"invalid dpi: {} (allowed {}..={})",
				self.dpi,
				DPI_RANGE.start(),
				DPI_RANGE.end()
			)));
		}
		if !(self.figure_width_in > 0.0 && self.figure_height_in > 0.0) {
			return Err(Error::config("figure size must be positive"));
		}
		if !(self.font_scale > 0.0) {
			return Err(Error::config(format!("invalid font_scale: {}", self.font_scale)));
		}
		for (key, name) in [("kem_log", &self.kem_log), ("sig_log", &self.sig_log), ("artifact_file", &self.artifact_file)] {
			if name.trim().is_empty() {
				return Err(Error::config(format!("{key} must not be empty")));
			}
		}
		Ok(())
	}

	pub fn kem_log_path(&self) -> PathBuf { self.results_dir.join(&self.kem_log) }
	pub fn sig_log_path(&self) -> PathBuf { self.results_dir.join(&self.sig_log) }
	pub fn artifact_path(&self) -> PathBuf { self.results_dir.join(&self.artifact_file) }

	/// Canvas size in pixels.
	pub fn canvas_size(&self) -> (u32, u32) {
		let dpi = f64::from(self.dpi);
		((self.figure_width_in * dpi).round() as u32, (self.figure_height_in * dpi).round() as u32)
	}

	/// Font size multiplier relative to a 100 dpi canvas.
	pub fn text_scale(&self) -> f64 { f64::from(self.dpi) / 100.0 * self.font_scale }
}

fn env_value(key: &str) -> Option<String> {
	std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Builder for [`ReportConfig`]; `build` validates.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
	cfg: ReportConfig,
}

impl ReportConfigBuilder {
	pub fn log_level(mut self, level: impl Into<String>) -> Self { self.cfg.log_level = level.into(); self }
	pub fn results_dir(mut self, dir: impl Into<PathBuf>) -> Self { self.cfg.results_dir = dir.into(); self }
	pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self { self.cfg.output_dir = dir.into(); self }
	pub fn format(mut self, format: ImageFormat) -> Self { self.cfg.format = format; self }
	pub fn dpi(mut self, dpi: u32) -> Self { self.cfg.dpi = dpi; self }
	pub fn figure_size(mut self, width_in: f64, height_in: f64) -> Self {
		self.cfg.figure_width_in = width_in;
		self.cfg.figure_height_in = height_in;
		self
	}
	pub fn font_scale(mut self, scale: f64) -> Self { self.cfg.font_scale = scale; self }

	pub fn build(self) -> Result<ReportConfig> {
		self.cfg.validate()?;
		Ok(self.cfg)
	}
}
