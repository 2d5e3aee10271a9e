//! Particle simulation: drift, edge reflection, pointer repulsion, and
//! proximity connections.
//!
//! All units are surface pixels and frames. Nothing here knows about the
//! canvas or the browser, so the whole simulation runs natively in tests.

use rand::Rng;

use super::config::{ConnectionSampling, FieldConfig};

/// Pointer position used while no pointer is over the page, far enough away
/// that it influences nothing.
pub const POINTER_SENTINEL: Pointer = Pointer {
	x: -1000.0,
	y: -1000.0,
};

/// Last known pointer position in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	/// Horizontal position in pixels.
	pub x: f64,
	/// Vertical position in pixels.
	pub y: f64,
}

impl Default for Pointer {
	fn default() -> Self {
		POINTER_SENTINEL
	}
}

/// A single drifting particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in pixels.
	pub x: f64,
	/// Vertical position in pixels.
	pub y: f64,
	/// Horizontal velocity in pixels per frame.
	pub vx: f64,
	/// Vertical velocity in pixels per frame.
	pub vy: f64,
	/// Draw radius in pixels. Does not affect physics.
	pub radius: f64,
}

impl Particle {
	/// Particle at (`x`, `y`) moving by (`vx`, `vy`) per frame.
	pub fn new(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Self {
		Self {
			x,
			y,
			vx,
			vy,
			radius,
		}
	}

	/// Uniformly random position inside the surface, velocity and radius
	/// inside the configured ranges.
	pub fn random<R: Rng>(config: &FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
		Self {
			x: rng.random::<f64>() * width,
			y: rng.random::<f64>() * height,
			vx: config.velocity_range.sample(rng),
			vy: config.velocity_range.sample(rng),
			radius: config.radius_range.sample(rng),
		}
	}

	/// Move by one frame of velocity, then reverse any axis that ended up
	/// outside the bounds. Position is never clamped.
	pub fn advance(&mut self, width: f64, height: f64) {
		self.x += self.vx;
		self.y += self.vy;

		if self.x < 0.0 || self.x > width {
			self.vx = -self.vx;
		}
		if self.y < 0.0 || self.y > height {
			self.vy = -self.vy;
		}
	}

	/// Push velocity away from the pointer, linearly stronger the closer it is.
	/// The change is permanent; nothing decays it afterwards.
	pub fn repel(&mut self, pointer: Pointer, influence: f64, strength: f64) {
		let (dx, dy) = (pointer.x - self.x, pointer.y - self.y);
		let distance = (dx * dx + dy * dy).sqrt();
		if distance >= influence {
			return;
		}

		// atan2(0, 0) is 0, so a particle right under the pointer is pushed toward -x.
		let angle = dy.atan2(dx);
		let force = (influence - distance) / influence;
		self.vx -= angle.cos() * force * strength;
		self.vy -= angle.sin() * force * strength;
	}

	/// Euclidean distance between centers.
	pub fn distance_to(&self, other: &Particle) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// A pair of particles close enough to be linked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	/// Index of the lower-numbered particle.
	pub from: usize,
	/// Index of the higher-numbered particle.
	pub to: usize,
	/// Center distance in pixels.
	pub distance: f64,
	/// `1 - distance / connection_distance`: 1 when touching, 0 at the threshold.
	pub strength: f64,
}

/// The particle set plus the bounds and pointer it is simulated against.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
	/// Live particles, in allocation order.
	pub particles: Vec<Particle>,
	width: f64,
	height: f64,
	pointer: Pointer,
}

impl ParticleField {
	/// Allocate a random particle set sized for the surface.
	pub fn new<R: Rng>(config: &FieldConfig, width: f64, height: f64, rng: &mut R) -> Self {
		let mut field = Self {
			particles: Vec::new(),
			width,
			height,
			pointer: POINTER_SENTINEL,
		};
		field.regenerate(config, width, height, rng);
		field
	}

	/// Build a field from explicit particles.
	pub fn from_particles(particles: Vec<Particle>, width: f64, height: f64) -> Self {
		Self {
			particles,
			width,
			height,
			pointer: POINTER_SENTINEL,
		}
	}

	/// Surface width the particles bounce within.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Surface height the particles bounce within.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Current pointer, or [`POINTER_SENTINEL`] when none.
	pub fn pointer(&self) -> Pointer {
		self.pointer
	}

	/// Record a pointer position in surface coordinates.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = Pointer { x, y };
	}

	/// Forget the pointer.
	pub fn clear_pointer(&mut self) {
		self.pointer = POINTER_SENTINEL;
	}

	/// Replace the whole particle set with a fresh one for new bounds.
	/// The pointer survives.
	pub fn regenerate<R: Rng>(&mut self, config: &FieldConfig, width: f64, height: f64, rng: &mut R) {
		let count = config.particle_count.for_surface(width, height);
		self.width = width;
		self.height = height;
		self.particles.clear();
		self.particles.reserve(count);
		for _ in 0..count {
			self.particles.push(Particle::random(config, width, height, rng));
		}
	}

	/// Record new bounds and drop every particle.
	pub fn clear(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.particles.clear();
	}

	/// Advance one frame: move, reflect, then repel from the pointer.
	pub fn step(&mut self, config: &FieldConfig) {
		let (width, height, pointer) = (self.width, self.height, self.pointer);
		for p in &mut self.particles {
			p.advance(width, height);
			p.repel(
				pointer,
				config.mouse_influence_distance,
				config.mouse_repel_strength,
			);
		}
	}

	/// Call `visit` for every sampled pair closer than `config.connection_distance`.
	pub fn visit_connections(&self, config: &FieldConfig, mut visit: impl FnMut(Connection)) {
		let n = self.particles.len();
		let (source_stride, target_stride) = match config.connections {
			ConnectionSampling::AllPairs => (1, 1),
			ConnectionSampling::Strided {
				source_stride,
				target_stride,
			} => (source_stride.max(1), target_stride.max(1)),
		};
		let max = config.connection_distance;

		for from in (0..n).step_by(source_stride) {
			for to in (from + 1..n).step_by(target_stride) {
				let distance = self.particles[from].distance_to(&self.particles[to]);
				if distance < max {
					visit(Connection {
						from,
						to,
						distance,
						strength: 1.0 - distance / max,
					});
				}
			}
		}
	}

	/// Collected form of [`visit_connections`](Self::visit_connections).
	pub fn connections(&self, config: &FieldConfig) -> Vec<Connection> {
		let mut out = Vec::new();
		self.visit_connections(config, |c| out.push(c));
		out
	}
}
