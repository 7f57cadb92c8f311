//! BenchmarkDotNet summary logs → [`BenchmarkRecord`]s.

use crate::{
	error::Result,
	magnitude::parse_magnitude,
	table::{extract_table, read_table, Table},
	types::BenchmarkRecord,
};
use std::path::Path;
use tracing::{debug, warn};

pub const METHOD_COLUMN: &str = "Method";
pub const MEAN_COLUMN: &str = "Mean";
pub const ALLOCATED_COLUMN: &str = "Allocated";

/// `SignatureBenchmarks.'RSA-4096 KeyGen'` → `RSA-4096 KeyGen`.
pub fn clean_method_label(raw: &str) -> String {
	let tail = raw.rsplit('.').next().unwrap_or(raw);
	tail.replace('\'', "").trim().to_string()
}

/// Split a cleaned label on its last whitespace run into (algorithm, operation).
///
/// Labels without whitespace keep the whole label as the algorithm and an empty operation.
pub fn split_method_label(label: &str) -> (String, String) {
	match label.trim().rsplit_once(char::is_whitespace) {
		Some((algorithm, operation)) => (algorithm.trim_end().to_string(), operation.to_string()),
		None => {
			warn!(label, "method label has no algorithm/operation separator; operation left empty");
			(label.trim().to_string(), String::new())
		}
	}
}

fn records_from_table(table: &Table) -> Vec<BenchmarkRecord> {
	if !table.is_empty() && !table.has_column(MEAN_COLUMN) {
		debug!("benchmark table has no {MEAN_COLUMN} column; mean defaults to zero");
	}
	table
		.rows()
		.iter()
		.map(|row| {
			let method = clean_method_label(row.get(METHOD_COLUMN).unwrap_or_default());
			let (algorithm, operation) = split_method_label(&method);
			BenchmarkRecord {
				algorithm,
				operation,
				mean_us: row.get(MEAN_COLUMN).map(parse_magnitude).unwrap_or(0.0),
				allocated_bytes: row.get(ALLOCATED_COLUMN).map(parse_magnitude).unwrap_or(0.0),
				method,
			}
		})
		.collect()
}

pub fn parse_benchmark_log(text: &str) -> Vec<BenchmarkRecord> {
	records_from_table(&extract_table(text, METHOD_COLUMN))
}

/// Missing file → warning and no records.
pub fn read_benchmark_log(path: impl AsRef<Path>) -> Result<Vec<BenchmarkRecord>> {
	let table = read_table(path.as_ref(), METHOD_COLUMN)?;
	let records = records_from_table(&table);
	debug!(path = %path.as_ref().display(), records = records.len(), "loaded benchmark log");
	Ok(records)
}
