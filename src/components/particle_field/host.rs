//! Browser host for the particle renderer.
//!
//! Wires a [`ParticleRenderer`] to a canvas: frames come from
//! `requestAnimationFrame`, pointer and resize notifications from window
//! listeners. Everything is owned by a [`MountedField`]; dropping it stops
//! the loop, removes the listeners, and frees the frame closure.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::renderer::{FrameScheduler, Lifecycle, ParticleRenderer};
use crate::error::{Error, Result};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// [`FrameScheduler`] backed by `requestAnimationFrame`.
///
/// Clones share the callback slot, so the renderer can hold one while the
/// mount installs and later releases the closure through another.
#[derive(Clone)]
pub struct AnimationFrames {
	window: Window,
	callback: FrameCallback,
}

impl AnimationFrames {
	/// Scheduler on `window`, with no callback installed yet.
	pub fn new(window: Window) -> Self {
		Self {
			window,
			callback: Rc::new(RefCell::new(None)),
		}
	}

	fn install(&self, callback: Closure<dyn FnMut()>) {
		*self.callback.borrow_mut() = Some(callback);
	}

	fn release(&self) {
		self.callback.borrow_mut().take();
	}
}

impl FrameScheduler for AnimationFrames {
	type Handle = i32;

	fn request_frame(&mut self) -> Option<i32> {
		let slot = self.callback.borrow();
		let cb = slot.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&mut self, handle: i32) {
		let _ = self.window.cancel_animation_frame(handle);
	}
}

/// A window event listener, removed when dropped.
struct Listener {
	window: Window,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
	fn attach(window: &Window, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> Self {
		let _ = window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
		Self {
			window: window.clone(),
			event,
			callback,
		}
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

type SharedRenderer = Rc<RefCell<ParticleRenderer<AnimationFrames>>>;

/// A running particle field attached to a canvas.
pub struct MountedField {
	renderer: SharedRenderer,
	frames: AnimationFrames,
	listeners: Vec<Listener>,
}

impl MountedField {
	/// Stop the loop and release every subscription. Idempotent.
	pub fn stop(&mut self) {
		if let Ok(mut r) = self.renderer.try_borrow_mut() {
			r.stop();
		}
		self.listeners.clear();
		self.frames.release();
	}
}

impl Drop for MountedField {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Size the canvas should take: the viewport in fullscreen mode, otherwise
/// its parent container. Zero when neither can be measured.
fn surface_size(window: &Window, canvas: &HtmlCanvasElement, fullscreen: bool) -> (f64, f64) {
	if fullscreen {
		let dim = |v: std::result::Result<JsValue, JsValue>| {
			v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
		};
		(dim(window.inner_width()), dim(window.inner_height()))
	} else {
		canvas
			.parent_element()
			.map(|p| (p.client_width() as f64, p.client_height() as f64))
			.unwrap_or((0.0, 0.0))
	}
}

fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement, fullscreen: bool) -> (f64, f64) {
	let (w, h) = surface_size(window, canvas, fullscreen);
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}

/// Attach a particle field to `canvas` and start it.
///
/// Fails only when the page has no window or the canvas has no 2D context.
/// A canvas that currently measures zero is fine: the renderer defers until
/// a resize gives it area.
pub fn mount(canvas: HtmlCanvasElement, config: FieldConfig, fullscreen: bool) -> Result<MountedField> {
	let window = web_sys::window().ok_or(Error::Surface("no window"))?;
	let mut ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.ok()
		.flatten()
		.ok_or(Error::Surface("2d context unavailable"))?
		.dyn_into()
		.map_err(|_| Error::Surface("2d context has unexpected type"))?;

	let seed = config
		.seed
		.unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
	let frames = AnimationFrames::new(window.clone());
	let renderer: SharedRenderer = Rc::new(RefCell::new(ParticleRenderer::new(
		config,
		frames.clone(),
		seed,
	)));

	let renderer_anim = renderer.clone();
	frames.install(Closure::new(move || {
		if let Ok(mut r) = renderer_anim.try_borrow_mut() {
			r.on_frame(&mut ctx);
		}
	}));

	let (renderer_resize, canvas_resize, window_resize) =
		(renderer.clone(), canvas.clone(), window.clone());
	let on_resize: Closure<dyn FnMut(Event)> = Closure::new(move |_: Event| {
		let (w, h) = fit_canvas(&window_resize, &canvas_resize, fullscreen);
		renderer_resize.borrow_mut().resize(w, h);
	});

	let (renderer_move, canvas_move) = (renderer.clone(), canvas.clone());
	let on_mousemove: Closure<dyn FnMut(Event)> = Closure::new(move |ev: Event| {
		let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
			return;
		};
		let rect = canvas_move.get_bounding_client_rect();
		renderer_move.borrow_mut().pointer_move(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
	});

	// `mouseout` also fires when crossing between elements; only leaving the
	// document has no related target.
	let renderer_out = renderer.clone();
	let on_mouseout: Closure<dyn FnMut(Event)> = Closure::new(move |ev: Event| {
		let left_page = ev
			.dyn_ref::<MouseEvent>()
			.is_none_or(|ev| ev.related_target().is_none());
		if left_page {
			renderer_out.borrow_mut().pointer_leave();
		}
	});

	let listeners = vec![
		Listener::attach(&window, "resize", on_resize),
		Listener::attach(&window, "mousemove", on_mousemove),
		Listener::attach(&window, "mouseout", on_mouseout),
	];

	let (w, h) = fit_canvas(&window, &canvas, fullscreen);
	renderer.borrow_mut().start(w, h);
	if renderer.borrow().lifecycle() == Lifecycle::Deferred {
		warn!("particle-field: canvas has no area yet, waiting for resize");
	}

	Ok(MountedField {
		renderer,
		frames,
		listeners,
	})
}
