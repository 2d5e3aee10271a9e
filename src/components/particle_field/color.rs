//! RGBA colors for particles and connection lines.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in [0, 1].
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same channels, alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Multiply the base alpha by `factor`, clamped to [0, 1].
	pub fn fade(self, factor: f64) -> Self {
		self.with_alpha(self.a * factor.clamp(0.0, 1.0))
	}

	/// CSS string: `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_css())
	}
}

/// Parses hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
impl FromStr for Color {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let invalid = || Error::InvalidColor(s.to_string());

		if let Some(hex) = s.strip_prefix('#') {
			if hex.len() != 6 || !hex.is_ascii() {
				return Err(invalid());
			}
			let channel =
				|i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
			return Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?));
		}

		let (body, expect_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
			(rest, true)
		} else if let Some(rest) = s.strip_prefix("rgb(") {
			(rest, false)
		} else {
			return Err(invalid());
		};
		let nums: Vec<&str> = body
			.strip_suffix(')')
			.ok_or_else(invalid)?
			.split(',')
			.map(str::trim)
			.collect();
		let expected = if expect_alpha { 4 } else { 3 };
		if nums.len() != expected {
			return Err(invalid());
		}

		let channel = |i: usize| nums[i].parse::<u8>().map_err(|_| invalid());
		let a = match nums.get(3) {
			Some(a) => a.parse::<f64>().map_err(|_| invalid())?,
			None => 1.0,
		};
		if !(0.0..=1.0).contains(&a) {
			return Err(invalid());
		}
		Ok(Color::rgba(channel(0)?, channel(1)?, channel(2)?, a))
	}
}

impl TryFrom<String> for Color {
	type Error = Error;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}
