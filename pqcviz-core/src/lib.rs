#![forbid(unsafe_code)]

//! Parsing and normalization for PQC benchmark reports.
//!
//! Reads BenchmarkDotNet summary logs and artifact-size listings into typed records that
//! the chart renderer consumes.

pub mod artifact;
pub mod bench_log;
pub mod config;
pub mod error;
pub mod magnitude;
pub mod table;
pub mod types;

pub use artifact::{parse_artifact_sizes, read_artifact_sizes};
pub use bench_log::{parse_benchmark_log, read_benchmark_log};
pub use config::{ImageFormat, ReportConfig};
pub use error::{Error, Result};
pub use magnitude::{parse_magnitude, try_parse_magnitude};
pub use table::{extract_table, read_table, Table};
pub use types::{ArtifactKind, ArtifactRecord, BenchmarkRecord, ChartKind, Field, FieldValue, Record};
