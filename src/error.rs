//! Crate error type.
//!
//! Nothing here ever reaches the page: the browser glue logs these and falls
//! back to defaults or an inert canvas.

use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or mounting the particle field.
#[derive(Debug, Error)]
pub enum Error {
	/// The configuration JSON could not be decoded.
	#[error("config decode failed: {0}")]
	Config(#[from] serde_json::Error),

	/// A configuration value is out of its accepted domain.
	#[error("invalid config: {0}")]
	InvalidConfig(String),

	/// A CSS color string could not be parsed.
	#[error("invalid color: {0:?}")]
	InvalidColor(String),

	/// The canvas or its 2D context is not available.
	#[error("surface unavailable: {0}")]
	Surface(&'static str),
}
