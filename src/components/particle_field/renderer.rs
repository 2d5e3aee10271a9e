//! Render loop lifecycle.
//!
//! [`ParticleRenderer`] owns the simulation, the pointer feed, and the handle
//! of the next scheduled frame. The host drives it: it calls
//! [`ParticleRenderer::on_frame`] from its frame callback and forwards resize
//! and pointer events. Scheduling goes through [`FrameScheduler`] so the loop
//! can be started and cancelled explicitly.
//!
//! ```text
//!   Idle --start(w>0,h>0)--> Running --stop--> Stopped --start--> ...
//!    |                        ^    |
//!    | start(zero area)       |    | resize(zero area)
//!    v                        |    v
//!   Deferred --resize(non-zero)----+
//! ```
//!
//! A refused frame request also lands in `Stopped`.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::FieldConfig;
use super::particles::ParticleField;
use super::render::{Painter, render};

/// "Call me back before the next repaint", with cancellation.
pub trait FrameScheduler {
	/// Identifies one outstanding request.
	type Handle;

	/// Request one frame callback. `None` if the host refused.
	fn request_frame(&mut self) -> Option<Self::Handle>;

	/// Withdraw a request that has not fired yet.
	fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Where the renderer is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
	/// Never started.
	Idle,
	/// Started on a zero-area surface; waiting for a usable resize.
	Deferred,
	/// A frame is scheduled.
	Running,
	/// Stopped by the host, or halted because a frame request was refused.
	Stopped,
}

/// Drives a [`ParticleField`] through a scheduled simulate-then-draw loop.
pub struct ParticleRenderer<S: FrameScheduler> {
	config: FieldConfig,
	scheduler: S,
	rng: SmallRng,
	field: ParticleField,
	lifecycle: Lifecycle,
	pending: Option<S::Handle>,
	frame: u64,
}

impl<S: FrameScheduler> ParticleRenderer<S> {
	/// An idle renderer; nothing is allocated until [`start`](Self::start).
	pub fn new(config: FieldConfig, scheduler: S, seed: u64) -> Self {
		Self {
			config,
			scheduler,
			rng: SmallRng::seed_from_u64(seed),
			field: ParticleField::default(),
			lifecycle: Lifecycle::Idle,
			pending: None,
			frame: 0,
		}
	}

	/// The configuration this renderer was built with.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// The simulated particle set.
	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	/// Mutable access to the particle set.
	pub fn field_mut(&mut self) -> &mut ParticleField {
		&mut self.field
	}

	/// The frame scheduler.
	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}

	/// Mutable access to the frame scheduler.
	pub fn scheduler_mut(&mut self) -> &mut S {
		&mut self.scheduler
	}

	/// Current lifecycle state.
	pub fn lifecycle(&self) -> Lifecycle {
		self.lifecycle
	}

	/// Whether a frame is scheduled.
	pub fn is_running(&self) -> bool {
		self.lifecycle == Lifecycle::Running
	}

	/// Frames simulated since the last (re)start.
	pub fn frame_count(&self) -> u64 {
		self.frame
	}

	/// Allocate particles for a `width` x `height` surface and schedule the
	/// first frame. A zero-area surface defers until a usable resize.
	/// Calling this while running or deferred does nothing.
	pub fn start(&mut self, width: f64, height: f64) {
		match self.lifecycle {
			Lifecycle::Running | Lifecycle::Deferred => {
				debug!("particle-field: start ignored, already {:?}", self.lifecycle);
			}
			Lifecycle::Idle | Lifecycle::Stopped => {
				self.frame = 0;
				self.field.clear_pointer();
				self.activate(width, height);
			}
		}
	}

	/// Cancel the pending frame and drop the particles. Safe to call at any time.
	pub fn stop(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel_frame(handle);
		}
		if self.lifecycle != Lifecycle::Stopped {
			debug!("particle-field: stopped after {} frames", self.frame);
		}
		let (w, h) = (self.field.width(), self.field.height());
		self.field.clear(w, h);
		self.lifecycle = Lifecycle::Stopped;
	}

	/// Surface size changed. Regenerates the particle set for the new area
	/// while running, or wakes a deferred renderer once the area is non-zero.
	pub fn resize(&mut self, width: f64, height: f64) {
		match self.lifecycle {
			Lifecycle::Idle | Lifecycle::Stopped => self.field.clear(width, height),
			Lifecycle::Deferred => self.activate(width, height),
			Lifecycle::Running if is_empty_area(width, height) => {
				if let Some(handle) = self.pending.take() {
					self.scheduler.cancel_frame(handle);
				}
				self.field.clear(width, height);
				self.lifecycle = Lifecycle::Deferred;
				info!("particle-field: surface collapsed to {width}x{height}, deferring");
			}
			Lifecycle::Running => {
				self.field
					.regenerate(&self.config, width, height, &mut self.rng);
				debug!(
					"particle-field: resized to {width}x{height}, {} particles",
					self.field.particles.len()
				);
			}
		}
	}

	/// Pointer moved to (`x`, `y`) in surface coordinates.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		self.field.set_pointer(x, y);
	}

	/// Pointer left the page.
	pub fn pointer_leave(&mut self) {
		self.field.clear_pointer();
	}

	/// Frame callback: simulate one step, draw if this is a draw frame, and
	/// schedule the next frame. Returns whether anything was drawn.
	///
	/// Does nothing unless running with a frame outstanding, so a callback
	/// that slips in after [`stop`](Self::stop) never draws.
	pub fn on_frame<P: Painter>(&mut self, painter: &mut P) -> bool {
		if self.lifecycle != Lifecycle::Running || self.pending.take().is_none() {
			return false;
		}

		self.frame += 1;
		self.field.step(&self.config);

		let interval = u64::from(self.config.draw_interval.max(1));
		let draw = self.frame % interval == 0;
		if draw {
			render(&self.field, &self.config, painter);
		}

		self.schedule();
		draw
	}

	fn activate(&mut self, width: f64, height: f64) {
		if is_empty_area(width, height) {
			self.field.clear(width, height);
			self.lifecycle = Lifecycle::Deferred;
			info!("particle-field: surface is {width}x{height}, deferring start");
			return;
		}

		self.field
			.regenerate(&self.config, width, height, &mut self.rng);
		self.lifecycle = Lifecycle::Running;
		info!(
			"particle-field: running on {width}x{height} with {} particles",
			self.field.particles.len()
		);
		self.schedule();
	}

	/// Request the next frame. A refusal halts the loop in `Stopped`, so a
	/// later `start` can bring it back.
	fn schedule(&mut self) {
		self.pending = self.scheduler.request_frame();
		if self.pending.is_none() {
			warn!("particle-field: host refused a frame request, loop halted");
			let (w, h) = (self.field.width(), self.field.height());
			self.field.clear(w, h);
			self.lifecycle = Lifecycle::Stopped;
		}
	}
}

fn is_empty_area(width: f64, height: f64) -> bool {
	!(width > 0.0 && height > 0.0)
}
