//! Particle field configuration.
//!
//! Every option has a default, so a config document only needs to name what
//! it changes. Keys are camelCase to match the JSON embedded in the page:
//!
//! ```json
//! {
//!   "particleCount": { "perArea": 9000 },
//!   "connectionDistance": 150,
//!   "lineColor": "rgba(4, 120, 87, 0.3)",
//!   "velocityRange": [-0.25, 0.25]
//! }
//! ```

use rand::Rng;
use serde::Deserialize;

use super::color::Color;
use crate::error::{Error, Result};

/// Upper bound on the particle population of one field.
///
/// Connection search is quadratic in the count, so anything near this is
/// already far past what a frame budget allows.
pub const MAX_PARTICLES: usize = 5_000;

/// How many particles to allocate for a surface.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParticleCount {
	/// Always this many, whatever the surface size.
	Fixed(usize),
	/// One particle per this many square pixels, so density survives resizes.
	PerArea(f64),
}

impl ParticleCount {
	/// Number of particles for a `width` x `height` surface, at most
	/// [`MAX_PARTICLES`].
	pub fn for_surface(self, width: f64, height: f64) -> usize {
		let count = match self {
			ParticleCount::Fixed(n) => n,
			ParticleCount::PerArea(area) => ((width * height) / area).floor().max(0.0) as usize,
		};
		count.min(MAX_PARTICLES)
	}
}

/// Closed interval sampled uniformly, written as `[min, max]` in JSON.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct ValueRange {
	/// Lower bound, inclusive.
	pub min: f64,
	/// Upper bound, inclusive.
	pub max: f64,
}

impl ValueRange {
	/// Range from `min` to `max`.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Width of the range. Infinite when `max - min` overflows.
	pub fn span(&self) -> f64 {
		self.max - self.min
	}

	/// Draw a uniform value from the range.
	///
	/// Empty, degenerate and unrepresentable ranges yield `min`.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
		if self.max > self.min && self.span().is_finite() {
			rng.random_range(self.min..=self.max)
		} else {
			self.min
		}
	}

	/// Whether `value` lies inside the range.
	pub fn contains(&self, value: f64) -> bool {
		(self.min..=self.max).contains(&value)
	}
}

impl From<[f64; 2]> for ValueRange {
	fn from([min, max]: [f64; 2]) -> Self {
		Self { min, max }
	}
}

/// Which particle pairs are tested for a connection line.
///
/// Sampling only trades visual density for speed; every reported connection
/// is still a real pair closer than the connection distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ConnectionSampling {
	/// Every unordered pair, exactly once.
	#[default]
	AllPairs,
	/// From every `source_stride`-th particle to every `target_stride`-th
	/// particle after it.
	Strided {
		/// Step between source particles.
		source_stride: usize,
		/// Step between targets after each source.
		target_stride: usize,
	},
}

/// Complete configuration for a particle field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldConfig {
	/// Population, fixed or scaled to the surface area.
	pub particle_count: ParticleCount,
	/// Maximum distance at which two particles are linked by a line.
	pub connection_distance: f64,
	/// Radius around the pointer inside which particles are repelled. Zero disables repulsion.
	pub mouse_influence_distance: f64,
	/// Velocity change at zero distance from the pointer.
	pub mouse_repel_strength: f64,
	/// Fill color of every particle.
	pub particle_color: Color,
	/// Line color at zero distance; alpha fades linearly to 0 at `connection_distance`.
	pub line_color: Color,
	/// Connection line width in pixels.
	pub line_width: f64,
	/// Initial velocity per axis, in pixels per frame.
	pub velocity_range: ValueRange,
	/// Particle radius, in pixels.
	pub radius_range: ValueRange,
	/// Which pairs are tested for connections.
	pub connections: ConnectionSampling,
	/// Draw on every n-th frame. Physics runs on every frame regardless.
	pub draw_interval: u32,
	/// Fixed RNG seed; the host picks one when absent.
	pub seed: Option<u64>,
}

impl Default for FieldConfig {
	/// The interactive page background: density-scaled, pointer-reactive.
	fn default() -> Self {
		Self {
			particle_count: ParticleCount::PerArea(9000.0),
			connection_distance: 150.0,
			mouse_influence_distance: 200.0,
			mouse_repel_strength: 2.0,
			particle_color: Color::rgba(4, 120, 87, 0.6),
			line_color: Color::rgba(4, 120, 87, 0.3),
			line_width: 1.0,
			velocity_range: ValueRange::new(-0.25, 0.25),
			radius_range: ValueRange::new(2.0, 4.0),
			connections: ConnectionSampling::AllPairs,
			draw_interval: 1,
			seed: None,
		}
	}
}

impl FieldConfig {
	/// The hero banner network: fixed population, thinned connections, drawn at half rate.
	pub fn hero() -> Self {
		Self {
			particle_count: ParticleCount::Fixed(60),
			mouse_influence_distance: 0.0,
			particle_color: Color::rgba(76, 175, 80, 0.4),
			line_color: Color::rgba(76, 175, 80, 0.2),
			line_width: 0.5,
			radius_range: ValueRange::new(1.0, 3.0),
			connections: ConnectionSampling::Strided {
				source_stride: 5,
				target_stride: 3,
			},
			draw_interval: 2,
			..Self::default()
		}
	}

	/// Decode a JSON config document and validate it.
	pub fn from_json(text: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Reject values the simulation cannot run with.
	pub fn validate(&self) -> Result<()> {
		fn invalid(msg: impl Into<String>) -> Result<()> {
			Err(Error::InvalidConfig(msg.into()))
		}

		match self.particle_count {
			ParticleCount::PerArea(area) if !area.is_finite() || area <= 0.0 => {
				return invalid("particleCount.perArea must be finite and > 0");
			}
			ParticleCount::Fixed(n) if n > MAX_PARTICLES => {
				return invalid(format!("particleCount.fixed must be <= {MAX_PARTICLES}"));
			}
			_ => {}
		}
		for (name, value) in [
			("connectionDistance", self.connection_distance),
			("mouseInfluenceDistance", self.mouse_influence_distance),
			("lineWidth", self.line_width),
		] {
			if !value.is_finite() || value < 0.0 {
				return invalid(format!("{name} must be finite and >= 0"));
			}
		}
		if !self.mouse_repel_strength.is_finite() {
			return invalid("mouseRepelStrength must be finite");
		}
		for (name, range) in [
			("velocityRange", self.velocity_range),
			("radiusRange", self.radius_range),
		] {
			if !range.span().is_finite() || range.min > range.max {
				return invalid(format!("{name} must be finite with min <= max"));
			}
		}
		if self.radius_range.min < 0.0 {
			return invalid("radiusRange must not be negative");
		}
		if let ConnectionSampling::Strided {
			source_stride,
			target_stride,
		} = self.connections
		{
			if source_stride == 0 || target_stride == 0 {
				return invalid("connection strides must be >= 1");
			}
		}
		if self.draw_interval == 0 {
			return invalid("drawInterval must be >= 1");
		}
		Ok(())
	}
}
