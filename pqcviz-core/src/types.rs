use std::fmt;

/// One row of a benchmark summary table, normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
	/// Method label after namespace and quote cleanup, e.g. `RSA-4096 KeyGen`.
	pub method: String,
	pub algorithm: String,
	pub operation: String,
	/// Mean duration in microseconds.
	pub mean_us: f64,
	/// Allocated memory per invocation in bytes.
	pub allocated_bytes: f64,
}

/// Category of a cryptographic output whose size is compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
	PublicKey,
	PrivateKey,
	Signature,
	Ciphertext,
	/// A label matching none of the known categories, kept verbatim (trimmed).
	Other(String),
}

impl ArtifactKind {
	/// Normalize a free-form label. Checked in order, case-sensitive.
	pub fn from_label(label: &str) -> Self {
		let label = label.trim();
		if label.contains("Pub") {
			Self::PublicKey
		} else if label.contains("Priv") {
			Self::PrivateKey
		} else if label.contains("Sig") {
			Self::Signature
		} else if label.contains("Cipher") {
			Self::Ciphertext
		} else {
			Self::Other(label.to_string())
		}
	}

	pub fn label(&self) -> &str {
		match self {
			Self::PublicKey => "Public Key",
			Self::PrivateKey => "Private Key",
			Self::Signature => "Signature",
			Self::Ciphertext => "Ciphertext",
			Self::Other(s) => s,
		}
	}
}

impl fmt::Display for ArtifactKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRecord {
	pub algorithm: String,
	pub kind: ArtifactKind,
	pub size_bytes: u64,
}

/// Column selector used to pick chart axes and series out of a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
	Method,
	Algorithm,
	Operation,
	MeanMicros,
	AllocatedBytes,
	ArtifactType,
	SizeBytes,
}

impl Field {
	pub fn name(self) -> &'static str {
		match self {
			Self::Method => "Method",
			Self::Algorithm => "Algorithm",
			Self::Operation => "Operation",
			Self::MeanMicros => "Mean_us",
			Self::AllocatedBytes => "Allocated_B",
			Self::ArtifactType => "Type",
			Self::SizeBytes => "Size (Bytes)",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
	Text(&'a str),
	Number(f64),
}

impl FieldValue<'_> {
	/// Category key for grouping. Numbers print with their shortest exact form.
	pub fn to_key(self) -> String {
		match self {
			Self::Text(s) => s.to_string(),
			Self::Number(n) => n.to_string(),
		}
	}

	pub fn as_number(self) -> Option<f64> {
		match self {
			Self::Number(n) => Some(n),
			Self::Text(s) => s.trim().parse().ok(),
		}
	}
}

/// Field access over a parsed record. Fields a record does not carry return `None`.
pub trait Record {
	fn field(&self, field: Field) -> Option<FieldValue<'_>>;
}

impl Record for BenchmarkRecord {
	fn field(&self, field: Field) -> Option<FieldValue<'_>> {
		match field {
			Field::Method => Some(FieldValue::Text(&self.method)),
			Field::Algorithm => Some(FieldValue::Text(&self.algorithm)),
			Field::Operation => Some(FieldValue::Text(&self.operation)),
			Field::MeanMicros => Some(FieldValue::Number(self.mean_us)),
			Field::AllocatedBytes => Some(FieldValue::Number(self.allocated_bytes)),
			Field::ArtifactType | Field::SizeBytes => None,
		}
	}
}

impl Record for ArtifactRecord {
	fn field(&self, field: Field) -> Option<FieldValue<'_>> {
		match field {
			Field::Algorithm => Some(FieldValue::Text(&self.algorithm)),
			Field::ArtifactType => Some(FieldValue::Text(self.kind.label())),
			Field::SizeBytes => Some(FieldValue::Number(self.size_bytes as f64)),
			_ => None,
		}
	}
}

/// Which family of results a chart shows; drives palette selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
	Kem,
	Signature,
	Artifact,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn artifact_kind_matches_in_order() {
		assert_eq!(ArtifactKind::from_label("PubKey"), ArtifactKind::PublicKey);
		assert_eq!(ArtifactKind::from_label(" PrivKey "), ArtifactKind::PrivateKey);
		assert_eq!(ArtifactKind::from_label("Sig"), ArtifactKind::Signature);
		assert_eq!(ArtifactKind::from_label("CipherText"), ArtifactKind::Ciphertext);
		// case-sensitive: lowercase labels are kept as-is
		assert_eq!(ArtifactKind::from_label(" pubkey "), ArtifactKind::Other("pubkey".into()));
	}

	#[test]
	fn records_expose_only_their_fields() {
		let art = ArtifactRecord { algorithm: "Falcon-512".into(), kind: ArtifactKind::Signature, size_bytes: 666 };
		assert_eq!(art.field(Field::ArtifactType), Some(FieldValue::Text("Signature")));
		assert_eq!(art.field(Field::SizeBytes).and_then(FieldValue::as_number), Some(666.0));
		assert_eq!(art.field(Field::MeanMicros), None);
	}
}
