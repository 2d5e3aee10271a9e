//! Leptos component wrapping the particle field canvas.
//!
//! The canvas is purely decorative: it ignores pointer events itself and
//! follows the pointer through window listeners instead, so content layered
//! above it stays interactive.

use leptos::prelude::*;
use log::warn;
use web_sys::HtmlCanvasElement;

use super::config::FieldConfig;
use super::host::{self, MountedField};

/// Renders the animated particle network on a canvas.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport instead. Either way it tracks
/// window resizes, regenerating particles for the new area. Unmounting the
/// component stops the loop and removes its listeners.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(default = FieldConfig::default())] config: FieldConfig,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	// Dropping the stored mount (on unmount or re-mount) tears it down.
	let mounted = StoredValue::new_local(None::<MountedField>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		match host::mount(canvas, config.clone(), fullscreen) {
			Ok(field) => mounted.set_value(Some(field)),
			Err(e) => warn!("particle-field: not rendering: {e}"),
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			aria-hidden="true"
			style="display: block; width: 100%; height: 100%; pointer-events: none; touch-action: none;"
		/>
	}
}
