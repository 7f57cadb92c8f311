//! Fixed chart sequence over one result set.

use crate::chart::{self, render_chart, ChartSpec};
use anyhow::Result;
use pqcviz_core::{
	read_artifact_sizes, read_benchmark_log, ArtifactRecord, BenchmarkRecord, ChartKind, Error, Field, ReportConfig,
};
use std::path::PathBuf;
use tracing::info;

/// Signature memory chart leaves out operations that allocate almost nothing (verification).
pub const SIG_MEMORY_FLOOR_BYTES: f64 = 10.0;

const TIME_Y_LABEL: &str = "Time (Microseconds) - Log Scale";
const MEMORY_Y_LABEL: &str = "Allocated Memory (Bytes)";

pub const KEM_TIME: ChartSpec<'static> = ChartSpec {
	kind: ChartKind::Kem,
	title: "KEM Performance: Execution Time (Log Scale)",
	file_stem: "kem_execution_time",
	y_label: TIME_Y_LABEL,
	x: Field::Operation,
	y: Field::MeanMicros,
	hue: Field::Algorithm,
	log_scale: true,
	show_mtu: false,
};

pub const KEM_MEMORY: ChartSpec<'static> = ChartSpec {
	kind: ChartKind::Kem,
	title: "KEM Memory Allocation",
	file_stem: "kem_memory",
	y_label: MEMORY_Y_LABEL,
	x: Field::Operation,
	y: Field::AllocatedBytes,
	hue: Field::Algorithm,
	log_scale: false,
	show_mtu: false,
};

pub const SIG_TIME: ChartSpec<'static> = ChartSpec {
	kind: ChartKind::Signature,
	title: "Digital Signature Performance (Log Scale)",
	file_stem: "sig_execution_time",
	y_label: TIME_Y_LABEL,
	x: Field::Operation,
	y: Field::MeanMicros,
	hue: Field::Algorithm,
	log_scale: true,
	show_mtu: false,
};

pub const SIG_MEMORY: ChartSpec<'static> = ChartSpec {
	kind: ChartKind::Signature,
	title: "Digital Signature Memory Allocation",
	file_stem: "sig_memory",
	y_label: MEMORY_Y_LABEL,
	x: Field::Operation,
	y: Field::AllocatedBytes,
	hue: Field::Algorithm,
	log_scale: false,
	show_mtu: false,
};

pub const ARTIFACT_SIZES: ChartSpec<'static> = ChartSpec {
	kind: ChartKind::Artifact,
	title: "Cryptographic Artifact Sizes (Log Scale)",
	file_stem: "artifact_sizes",
	y_label: "Size (Bytes) - Log Scale",
	x: Field::ArtifactType,
	y: Field::SizeBytes,
	hue: Field::Algorithm,
	log_scale: true,
	show_mtu: true,
};

/// The three inputs of a run. Missing files load as empty sets.
#[derive(Debug, Default)]
pub struct ReportInputs {
	pub kem: Vec<BenchmarkRecord>,
	pub sig: Vec<BenchmarkRecord>,
	pub artifacts: Vec<ArtifactRecord>,
}

impl ReportInputs {
	pub fn load(cfg: &ReportConfig) -> pqcviz_core::Result<Self> {
		Ok(Self {
			kem: read_benchmark_log(cfg.kem_log_path())?,
			sig: read_benchmark_log(cfg.sig_log_path())?,
			artifacts: read_artifact_sizes(cfg.artifact_path())?,
		})
	}
}

/// Load inputs and render every chart. Nothing is written unless both benchmark logs parsed.
pub fn run(cfg: &ReportConfig) -> Result<Vec<PathBuf>> {
	chart::ensure_supported(cfg.format)?;
	let inputs = ReportInputs::load(cfg)?;
	info!(kem = inputs.kem.len(), sig = inputs.sig.len(), artifacts = inputs.artifacts.len(), "inputs loaded");

	if inputs.kem.is_empty() || inputs.sig.is_empty() {
		return Err(Error::missing_data("Could not parse benchmark logs. Check file paths.").into());
	}

	let mut written = Vec::with_capacity(5);
	written.push(render_chart(&inputs.kem, &KEM_TIME, cfg)?);
	written.push(render_chart(&inputs.kem, &KEM_MEMORY, cfg)?);
	written.push(render_chart(&inputs.sig, &SIG_TIME, cfg)?);

	let sig_memory: Vec<BenchmarkRecord> =
		inputs.sig.iter().filter(|r| r.allocated_bytes > SIG_MEMORY_FLOOR_BYTES).cloned().collect();
	written.push(render_chart(&sig_memory, &SIG_MEMORY, cfg)?);

	if !inputs.artifacts.is_empty() {
		written.push(render_chart(&inputs.artifacts, &ARTIFACT_SIZES, cfg)?);
	}
	Ok(written)
}
