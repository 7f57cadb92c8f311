use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors surfaced by the loaders and the configuration layer.
#[derive(Debug, Error)]
pub enum Error {
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	#[error("toml: {0}")]
	Toml(#[from] toml::de::Error),
	#[error("config: {0}")]
	Config(String),
	#[error("missing data: {0}")]
	MissingData(String),
}

impl Error {
	pub fn config(msg: impl Into<String>) -> Self { Self::Config(msg.into()) }
	pub fn missing_data(msg: impl Into<String>) -> Self { Self::MissingData(msg.into()) }
}
