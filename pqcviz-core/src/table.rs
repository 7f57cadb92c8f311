//! Extraction of a pipe-delimited table embedded in free-form log text.

use crate::error::Result;
use regex::Regex;
use std::{collections::BTreeMap, fs, io, path::Path};
use tracing::{debug, warn};

/// One data row, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
	values: BTreeMap<String, String>,
}

impl Row {
	pub fn get(&self, column: &str) -> Option<&str> { self.values.get(column).map(String::as_str) }
	pub fn len(&self) -> usize { self.values.len() }
	pub fn is_empty(&self) -> bool { self.values.is_empty() }
}

/// Column names in header order plus the accepted rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
	columns: Vec<String>,
	rows: Vec<Row>,
}

impl Table {
	pub fn columns(&self) -> &[String] { &self.columns }
	pub fn rows(&self) -> &[Row] { &self.rows }
	pub fn has_column(&self, name: &str) -> bool { self.columns.iter().any(|c| c == name) }
	pub fn len(&self) -> usize { self.rows.len() }
	pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

fn split_cells(line: &str) -> Vec<String> {
	line.trim_matches('|').split('|').map(|c| c.trim().to_string()).collect()
}

/// Pull the first table whose header row contains `| <header_token> |` out of `text`.
///
/// Collection starts at the header line and stops at the first blank or non-pipe line.
/// Separator rows (`---`) are skipped; rows whose cell count differs from the header's
/// are dropped.
pub fn extract_table(text: &str, header_token: &str) -> Table {
	let pattern = format!(r"\|\s*{}\s*\|", regex::escape(header_token));
	let Ok(header_re) = Regex::new(&pattern) else { return Table::default() };

	let mut lines: Vec<&str> = Vec::new();
	for line in text.lines() {
		let line = line.trim();
		if lines.is_empty() {
			if line.starts_with('|') && header_re.is_match(line) {
				lines.push(line);
			}
			continue;
		}
		if line.is_empty() || !line.starts_with('|') {
			break;
		}
		if line.contains("---") {
			continue;
		}
		lines.push(line);
	}

	let Some((header, body)) = lines.split_first() else { return Table::default() };
	let columns = split_cells(header);
	let mut rows = Vec::with_capacity(body.len());
	for line in body {
		let cells = split_cells(line);
		if cells.len() != columns.len() {
			debug!(expected = columns.len(), found = cells.len(), row = *line, "dropping table row with mismatched field count");
			continue;
		}
		rows.push(Row { values: columns.iter().cloned().zip(cells).collect() });
	}
	Table { columns, rows }
}

/// Read `path` and extract its table. A missing file is a warning and yields an empty table.
pub fn read_table(path: impl AsRef<Path>, header_token: &str) -> Result<Table> {
	let path = path.as_ref();
	match fs::read_to_string(path) {
		Ok(text) => Ok(extract_table(&text, header_token)),
		Err(e) if e.kind() == io::ErrorKind::NotFound => {
			warn!("File not found: {}", path.display());
			Ok(Table::default())
		}
		Err(e) => Err(e.into()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const LOG: &str = "\
// * Summary *
BenchmarkDotNet v0.13.12, Ubuntu 22.04

| Method | Mean | Allocated |
|------- |-----:|----------:|
| 'ML-KEM-768 KeyGen' | 41.20 μs | 1.2 KB |
| 'ML-KEM-768 Encaps' | 52.87 μs | 1.56 KB |

// * Legends *
  Mean      : Arithmetic mean of all measurements
";

	#[test]
	fn extracts_rows_after_header() {
		let table = extract_table(LOG, "Method");
		assert_eq!(table.columns(), ["Method", "Mean", "Allocated"]);
		assert_eq!(table.len(), 2);
		let first = &table.rows()[0];
		assert_eq!(first.len(), 3);
		assert_eq!(first.get("Method"), Some("'ML-KEM-768 KeyGen'"));
		assert_eq!(first.get("Mean"), Some("41.20 μs"));
		assert_eq!(table.rows()[1].get("Allocated"), Some("1.56 KB"));
	}

	#[test]
	fn drops_rows_with_wrong_field_count() {
		let text = "| Method | Mean | Allocated |\n|---|---|---|\n| A KeyGen | 1 ns | 2 B |\n| B KeyGen | 1 ns |\n| C KeyGen | 3 ns | 4 B |\n";
		let table = extract_table(text, "Method");
		let methods: Vec<_> = table.rows().iter().filter_map(|r| r.get("Method")).collect();
		assert_eq!(methods, ["A KeyGen", "C KeyGen"]);
	}

	#[test]
	fn no_header_means_empty() {
		assert!(extract_table("just some text\n| a | b |\n", "Method").is_empty());
		assert!(extract_table("", "Method").columns().is_empty());
	}

	#[test]
	fn stops_at_first_non_table_line() {
		let text = "| Method | Mean |\n| X Sign | 1 ms |\n\n| Y Sign | 2 ms |\n";
		assert_eq!(extract_table(text, "Method").len(), 1);
		let text = "| Method | Mean |\n| X Sign | 1 ms |\nfooter\n| Y Sign | 2 ms |\n";
		assert_eq!(extract_table(text, "Method").len(), 1);
	}

	#[test]
	fn header_token_must_be_a_whole_cell() {
		let text = "| MethodName | Mean |\n| X Sign | 1 ms |\n";
		assert!(extract_table(text, "Method").is_empty());
		let indented = "   | Method | Mean |\n   | X Sign | 1 ms |\n";
		assert_eq!(extract_table(indented, "Method").len(), 1);
	}

	#[test]
	fn missing_file_is_empty() {
		let dir = tempfile::tempdir().unwrap();
		let table = read_table(dir.path().join("absent.log"), "Method").unwrap();
		assert!(table.is_empty());
	}

	#[test]
	fn other_read_failures_are_io_errors() {
		let dir = tempfile::tempdir().unwrap();
		assert!(matches!(read_table(dir.path(), "Method"), Err(crate::Error::Io(_))));

		let binary = dir.path().join("binary.log");
		fs::write(&binary, [0xff, 0xfe, b'|', 0x80]).unwrap();
		assert!(matches!(read_table(&binary, "Method"), Err(crate::Error::Io(_))));
	}
}
