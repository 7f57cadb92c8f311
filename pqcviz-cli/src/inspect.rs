use crate::report::ReportInputs;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use pqcviz_core::{ArtifactRecord, BenchmarkRecord, ReportConfig};

fn benchmark_table(records: &[BenchmarkRecord]) -> Table {
	let mut table = Table::new();
	table
		.load_preset(UTF8_FULL)
		.set_content_arrangement(ContentArrangement::Dynamic)
		.set_header(vec!["Algorithm", "Operation", "Mean (μs)", "Allocated (B)"]);
	for r in records {
		table.add_row(vec![
			Cell::new(&r.algorithm),
			Cell::new(&r.operation),
			Cell::new(format!("{:.2}", r.mean_us)).set_alignment(CellAlignment::Right),
			Cell::new(format!("{:.0}", r.allocated_bytes)).set_alignment(CellAlignment::Right),
		]);
	}
	table
}

fn artifact_table(records: &[ArtifactRecord]) -> Table {
	let mut table = Table::new();
	table
		.load_preset(UTF8_FULL)
		.set_content_arrangement(ContentArrangement::Dynamic)
		.set_header(vec!["Algorithm", "Type", "Size (B)"]);
	for r in records {
		table.add_row(vec![
			Cell::new(&r.algorithm),
			Cell::new(r.kind.label()),
			Cell::new(r.size_bytes).set_alignment(CellAlignment::Right),
		]);
	}
	table
}

fn print_section(title: &str, count: usize, table: Table) {
	println!("{title} ({count} records)");
	if count == 0 {
		println!("  (no data)");
	} else {
		println!("{table}");
	}
	println!();
}

/// Print what the parsers extracted, without rendering anything.
pub fn run(cfg: &ReportConfig) -> anyhow::Result<()> {
	let inputs = ReportInputs::load(cfg)?;
	print_section(&format!("KEM benchmarks: {}", cfg.kem_log_path().display()), inputs.kem.len(), benchmark_table(&inputs.kem));
	print_section(
		&format!("Signature benchmarks: {}", cfg.sig_log_path().display()),
		inputs.sig.len(),
		benchmark_table(&inputs.sig),
	);
	print_section(
		&format!("Artifact sizes: {}", cfg.artifact_path().display()),
		inputs.artifacts.len(),
		artifact_table(&inputs.artifacts),
	);
	Ok(())
}
