//! Drawing the particle field.
//!
//! The render pass talks to a [`Painter`] rather than to the canvas directly,
//! so the same pass draws into a `CanvasRenderingContext2d` in the browser and
//! into a recording painter in tests. Pass order:
//! 1. Clear the surface
//! 2. Particles (filled circles)
//! 3. Connection lines on top, alpha scaled by proximity

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::color::Color;
use super::config::FieldConfig;
use super::particles::ParticleField;

/// The drawing primitives the render pass needs.
pub trait Painter {
	/// Erase a `width` x `height` area from the origin.
	fn clear(&mut self, width: f64, height: f64);
	/// Fill a circle centered on (`x`, `y`).
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
	/// Stroke a straight segment.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}

/// Renders one complete frame of the field.
pub fn render<P: Painter>(field: &ParticleField, config: &FieldConfig, painter: &mut P) {
	painter.clear(field.width(), field.height());

	for p in &field.particles {
		painter.fill_circle(p.x, p.y, p.radius, config.particle_color);
	}

	let particles = &field.particles;
	field.visit_connections(config, |c| {
		let (a, b) = (&particles[c.from], &particles[c.to]);
		painter.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			config.line_width,
			config.line_color.fade(c.strength),
		);
	});
}
