//! Unit-suffixed magnitude parsing ("524,049.09 μs", "1.2 KB").
//!
//! Time normalizes to microseconds, memory to bytes. Unknown units pass the number through.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static MAGNITUDE_RE: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^([0-9.]+)\s*([a-zA-Zμµ]+)").expect("magnitude pattern is valid"));

/// What the unit suffix says about the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitClass {
	/// Normalized to microseconds.
	Time,
	/// Normalized to bytes.
	Memory,
	/// Unrecognized suffix; the number is returned as written.
	Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnitude {
	pub value: f64,
	pub class: UnitClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MagnitudeError {
	#[error("no value")]
	Missing,
	#[error("no number followed by a unit in {0:?}")]
	NoMatch(String),
	#[error("invalid number {0:?}")]
	InvalidNumber(String),
}

/// Strict parse: either a normalized value with its unit class, or the reason it failed.
pub fn try_parse_magnitude(raw: &str) -> Result<Magnitude, MagnitudeError> {
	let trimmed = raw.trim();
	if trimmed.is_empty() || trimmed == "-" {
		return Err(MagnitudeError::Missing);
	}
	let cleaned = trimmed.replace(',', "");
	let caps = MAGNITUDE_RE
		.captures(&cleaned)
		.ok_or_else(|| MagnitudeError::NoMatch(raw.to_string()))?;
	let number = &caps[1];
	let num: f64 = number.parse().map_err(|_| MagnitudeError::InvalidNumber(number.to_string()))?;

	let (value, class) = match &caps[2] {
		"ns" => (num / 1000.0, UnitClass::Time),
		"μs" | "µs" | "us" => (num, UnitClass::Time),
		"ms" => (num * 1000.0, UnitClass::Time),
		"s" => (num * 1_000_000.0, UnitClass::Time),
		"B" => (num, UnitClass::Memory),
		"KB" => (num * 1024.0, UnitClass::Memory),
		"MB" => (num * 1024.0 * 1024.0, UnitClass::Memory),
		_ => (num, UnitClass::Unknown),
	};
	Ok(Magnitude { value, class })
}

/// Best-effort parse: anything unparsable is 0.0. Never fails.
pub fn parse_magnitude(raw: &str) -> f64 {
	match try_parse_magnitude(raw) {
		Ok(m) => m.value,
		Err(MagnitudeError::Missing) => 0.0,
		Err(e) => {
			tracing::trace!(value = raw, error = %e, "magnitude defaulted to zero");
			0.0
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn time_units_normalize_to_micros() {
		assert_eq!(parse_magnitude("1,234.5 μs"), 1234.5);
		assert_eq!(parse_magnitude("500 ns"), 0.5);
		assert_eq!(parse_magnitude("2 ms"), 2000.0);
		assert_eq!(parse_magnitude("3 s"), 3_000_000.0);
		assert_eq!(parse_magnitude("524,049.09 us"), 524_049.09);
		assert_eq!(parse_magnitude("7 µs"), 7.0);
	}

	#[test]
	fn memory_units_normalize_to_bytes() {
		assert_eq!(parse_magnitude("1 KB"), 1024.0);
		assert_eq!(parse_magnitude("1.5 MB"), 1.5 * 1024.0 * 1024.0);
		assert_eq!(parse_magnitude("96 B"), 96.0);
		assert_eq!(parse_magnitude("12KB"), 12.0 * 1024.0);
	}

	#[test]
	fn missing_and_garbage_are_zero() {
		assert_eq!(parse_magnitude("-"), 0.0);
		assert_eq!(parse_magnitude(""), 0.0);
		assert_eq!(parse_magnitude("   "), 0.0);
		assert_eq!(parse_magnitude("NA"), 0.0);
		assert_eq!(parse_magnitude("42"), 0.0);
		assert_eq!(parse_magnitude("1.2.3 ms"), 0.0);
	}

	#[test]
	fn units_are_case_sensitive() {
		// `Kb` is not a known unit: number passes through unconverted
		let m = try_parse_magnitude("4 Kb").unwrap();
		assert_eq!(m, Magnitude { value: 4.0, class: UnitClass::Unknown });
		assert_eq!(parse_magnitude("4 MS"), 4.0);
	}

	#[test]
	fn strict_form_reports_failures() {
		assert_eq!(try_parse_magnitude("-"), Err(MagnitudeError::Missing));
		assert!(matches!(try_parse_magnitude("n/a"), Err(MagnitudeError::NoMatch(_))));
		assert!(matches!(try_parse_magnitude("1..2 ns"), Err(MagnitudeError::InvalidNumber(_))));
		assert_eq!(try_parse_magnitude("2 ms").unwrap().class, UnitClass::Time);
	}
}
