//! particle-field: interactive particle-network background for the portfolio site.
//!
//! This crate provides a WASM canvas component that animates drifting,
//! pointer-repelled particles linked by distance-faded lines, plus the
//! host-independent simulation behind it.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;

pub use components::particle_field::{
	Color, Connection, ConnectionSampling, FieldConfig, FrameScheduler, Lifecycle, MAX_PARTICLES,
	Painter, Particle, ParticleCount, ParticleField, ParticleFieldCanvas, ParticleRenderer,
	Pointer, ValueRange,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Text of the script element with id="particle-config", if the page has one.
fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load the field configuration embedded in the page.
/// Falls back to defaults when the element is missing or its JSON is invalid.
fn load_field_config() -> FieldConfig {
	let Some(json_text) = config_script_text() else {
		return FieldConfig::default();
	};

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("particle-field: loaded config {:?}", config.particle_count);
			config
		}
		Err(e) => {
			warn!("particle-field: {}, using defaults", e);
			FieldConfig::default()
		}
	}
}

/// Main application component.
/// Mounts the particle field inside a decorative backdrop container.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Particle Field" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="particle-backdrop" aria-hidden="true">
			<ParticleFieldCanvas config=config />
		</div>
	}
}
