//! Artifact size listings, one algorithm per line:
//!
//! ```text
//! [NIST L3] ML-KEM-768 | PubKey: "1184 B" | PrivKey: "2400 B" | Ciphertext: "1088 B"
//! ```

use crate::{
	error::Result,
	types::{ArtifactKind, ArtifactRecord},
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs, io, path::Path};
use tracing::{debug, warn};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]\s*").expect("tag pattern is valid"));
static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("digits pattern is valid"));

/// Records for a single line. Blank and `-`-prefixed lines produce nothing.
pub fn parse_artifact_line(line: &str) -> Vec<ArtifactRecord> {
	if line.trim().is_empty() || line.starts_with('-') {
		return Vec::new();
	}
	let cleaned = TAG_RE.replace_all(line, "");
	let mut parts = cleaned.trim().split('|');
	let algorithm = parts.next().unwrap_or_default().trim().to_string();

	parts
		.filter_map(|segment| {
			let Some((label, value)) = segment.split_once(':') else {
				debug!(segment, "skipping artifact segment without a colon");
				return None;
			};
			let size_bytes = DIGITS_RE.find(value)?.as_str().parse::<u64>().ok()?;
			Some(ArtifactRecord { algorithm: algorithm.clone(), kind: ArtifactKind::from_label(label), size_bytes })
		})
		.collect()
}

pub fn parse_artifact_sizes(text: &str) -> Vec<ArtifactRecord> {
	text.lines().flat_map(parse_artifact_line).collect()
}

/// Missing file → warning and no records.
pub fn read_artifact_sizes(path: impl AsRef<Path>) -> Result<Vec<ArtifactRecord>> {
	let path = path.as_ref();
	match fs::read_to_string(path) {
		Ok(text) => Ok(parse_artifact_sizes(&text)),
		Err(e) if e.kind() == io::ErrorKind::NotFound => {
			warn!("File not found: {}", path.display());
			Ok(Vec::new())
		}
		Err(e) => Err(e.into()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rec(algorithm: &str, kind: ArtifactKind, size_bytes: u64) -> ArtifactRecord {
		ArtifactRecord { algorithm: algorithm.into(), kind, size_bytes }
	}

	#[test]
	fn parses_key_pairs() {
		let records = parse_artifact_line("Dilithium2 | PubKey: 1312 B | PrivKey: 2528 B");
		assert_eq!(
			records,
			vec![
				rec("Dilithium2", ArtifactKind::PublicKey, 1312),
				rec("Dilithium2", ArtifactKind::PrivateKey, 2528),
			]
		);
	}

	#[test]
	fn strips_bracketed_tags_anywhere() {
		let records = parse_artifact_line("[PQC] ML-KEM-768 [NIST L3] | Ciphertext: \"1088 B\" [fits MTU]");
		assert_eq!(records, vec![rec("ML-KEM-768", ArtifactKind::Ciphertext, 1088)]);
	}

	#[test]
	fn skips_invalid_segments_and_lines() {
		assert!(parse_artifact_line("---------------------").is_empty());
		assert!(parse_artifact_line("   ").is_empty());
		let records = parse_artifact_line("RSA-2048 | no colon here | Signature: n/a | Sig: 256 B | Handshake: 42 B");
		assert_eq!(
			records,
			vec![
				rec("RSA-2048", ArtifactKind::Signature, 256),
				rec("RSA-2048", ArtifactKind::Other("Handshake".into()), 42),
			]
		);
	}

	#[test]
	fn parses_whole_listing() {
		let text = "Algorithm sizes\n----------------\nFalcon-512 | PubKey: 897 B | Sig: 666 B\n\nRSA-3072 | PubKey: 398 B\n";
		let records = parse_artifact_sizes(text);
		// the header line has no pipe segments and yields nothing
		assert_eq!(records.len(), 3);
		assert_eq!(records[2], rec("RSA-3072", ArtifactKind::PublicKey, 398));
	}
}
