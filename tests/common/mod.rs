//! Host doubles shared by the integration tests.

#![allow(dead_code)]

use particle_field::{Color, FrameScheduler, Painter};

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum Draw {
	Clear { width: f64, height: f64 },
	Circle { x: f64, y: f64, radius: f64, color: Color },
	Line { from: (f64, f64), to: (f64, f64), width: f64, color: Color },
}

/// Painter that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingPainter {
	pub calls: Vec<Draw>,
}

impl RecordingPainter {
	pub fn lines(&self) -> Vec<&Draw> {
		self.calls
			.iter()
			.filter(|d| matches!(d, Draw::Line { .. }))
			.collect()
	}

	pub fn circles(&self) -> usize {
		self.calls
			.iter()
			.filter(|d| matches!(d, Draw::Circle { .. }))
			.count()
	}
}

impl Painter for RecordingPainter {
	fn clear(&mut self, width: f64, height: f64) {
		self.calls.push(Draw::Clear { width, height });
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
		self.calls.push(Draw::Circle {
			x,
			y,
			radius,
			color,
		});
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.calls.push(Draw::Line {
			from,
			to,
			width,
			color,
		});
	}
}

/// Scheduler that hands out sequential handles and remembers what is outstanding.
#[derive(Debug, Default)]
pub struct ManualScheduler {
	pub next: u32,
	pub requested: u32,
	pub cancelled: Vec<u32>,
	pub outstanding: Option<u32>,
	pub refuse: bool,
}

impl FrameScheduler for ManualScheduler {
	type Handle = u32;

	fn request_frame(&mut self) -> Option<u32> {
		if self.refuse {
			return None;
		}
		self.next += 1;
		self.requested += 1;
		self.outstanding = Some(self.next);
		Some(self.next)
	}

	fn cancel_frame(&mut self, handle: u32) {
		self.cancelled.push(handle);
		if self.outstanding == Some(handle) {
			self.outstanding = None;
		}
	}
}
