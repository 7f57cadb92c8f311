#![forbid(unsafe_code)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::{fs, path::Path, process::Command};
use tempfile::tempdir;

const KEM_LOG: &str = "\
// * Summary *

| Method                          | Mean          | Error     | Allocated |
|-------------------------------- |--------------:|----------:|----------:|
| KemBenchmarks.'ML-KEM-512 KeyGen' |      28.41 μs |  0.210 μs |     800 B |
| KemBenchmarks.'ML-KEM-768 KeyGen' |      41.20 μs |  0.310 μs |    1.2 KB |
| KemBenchmarks.'RSA-3072 KeyGen'   | 312,004.10 μs | 90.100 μs |   18.4 KB |

// * Legends *
";

const SIG_LOG: &str = "\
| Method                                 | Mean      | Allocated |
|--------------------------------------- |----------:|----------:|
| SignatureBenchmarks.'ML-DSA-65 Sign'   | 412.30 μs |   24.5 KB |
| SignatureBenchmarks.'ML-DSA-65 Verify' |  98.00 μs |         - |
| SignatureBenchmarks.'Falcon-512 Sign'  | 151.25 μs |    4.0 KB |
";

fn pqcviz(dir: &Path) -> Command {
	let mut cmd = Command::cargo_bin("pqcviz").unwrap();
	cmd.current_dir(dir)
		.env_remove("RUST_LOG")
		.env_remove("PQCVIZ_CONFIG")
		.env_remove("PQCVIZ_RESULTS_DIR")
		.env_remove("PQCVIZ_OUTPUT_DIR")
		.env_remove("PQCVIZ_FORMAT")
		.env_remove("PQCVIZ_DPI")
		.env_remove("PQCVIZ_LOG_LEVEL");
	cmd
}

fn seed_results(dir: &Path) {
	let results = dir.join("results");
	fs::create_dir_all(&results).unwrap();
	fs::write(results.join("PqcResearchApp.Benchmarks.KemBenchmarks.log"), KEM_LOG).unwrap();
	fs::write(results.join("PqcResearchApp.Benchmarks.SignatureBenchmarks.log"), SIG_LOG).unwrap();
}

fn svg_count(dir: &Path) -> usize {
	fs::read_dir(dir)
		.unwrap()
		.filter_map(|e| e.ok())
		.filter(|e| e.path().extension().is_some_and(|x| x == "svg"))
		.count()
}

#[test]
fn renders_four_charts_when_artifact_listing_is_absent() {
	let dir = tempdir().unwrap();
	seed_results(dir.path());

	pqcviz(dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Generated:"))
		.stdout(predicate::str::contains("kem_execution_time.svg"))
		.stderr(predicate::str::contains("File not found"));

	assert_eq!(svg_count(dir.path()), 4);
	assert!(!dir.path().join("artifact_sizes.svg").exists());
}

#[test]
fn renders_artifact_chart_into_output_dir() {
	let dir = tempdir().unwrap();
	seed_results(dir.path());
	fs::write(
		dir.path().join("results/artifact_sizes.txt"),
		"[ML-KEM] ML-KEM-768 | PubKey: 1184 B | PrivKey: 2400 B | Ciphertext: 1088 B\n\
		 ---------------------------------------------\n\
		 [SIG] Dilithium2 | PubKey: 1312 B | Signature: 2420 B\n",
	)
	.unwrap();

	pqcviz(dir.path()).args(["render", "--output-dir", "charts"]).assert().success();

	let charts = dir.path().join("charts");
	assert_eq!(svg_count(&charts), 5);
	let svg = fs::read_to_string(charts.join("artifact_sizes.svg")).unwrap();
	assert!(svg.contains("Ethernet MTU"));
	assert!(svg.contains("Dilithium2"));
}

#[test]
fn missing_benchmark_log_fails_without_writing_charts() {
	let dir = tempdir().unwrap();
	seed_results(dir.path());
	fs::remove_file(dir.path().join("results/PqcResearchApp.Benchmarks.KemBenchmarks.log")).unwrap();

	pqcviz(dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Could not parse benchmark logs"));
	assert_eq!(svg_count(dir.path()), 0);
}

#[test]
fn inspect_lists_parsed_records() {
	let dir = tempdir().unwrap();
	seed_results(dir.path());

	pqcviz(dir.path())
		.arg("inspect")
		.assert()
		.success()
		.stdout(predicate::str::contains("ML-KEM-768"))
		.stdout(predicate::str::contains("Falcon-512"))
		.stdout(predicate::str::contains("(no data)"));
	assert_eq!(svg_count(dir.path()), 0);
}
