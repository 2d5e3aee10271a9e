//! Interactive particle-network background.
//!
//! Renders drifting particles on an HTML canvas with:
//! - Edge reflection (velocity flips, positions are never clamped)
//! - Pointer repulsion inside an influence radius
//! - Connection lines between close pairs, fading with distance
//! - Density-preserving regeneration on resize
//!
//! The simulation ([`ParticleField`]) and loop lifecycle
//! ([`ParticleRenderer`]) are host-independent; [`ParticleFieldCanvas`]
//! binds them to the browser.
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{FieldConfig, ParticleFieldCanvas};
//!
//! view! {
//!     <div class="hero-backdrop">
//!         <ParticleFieldCanvas config=FieldConfig::hero() />
//!     </div>
//! }
//! ```

mod color;
mod component;
mod config;
mod host;
mod particles;
mod render;
mod renderer;

pub use color::Color;
pub use component::ParticleFieldCanvas;
pub use config::{ConnectionSampling, FieldConfig, MAX_PARTICLES, ParticleCount, ValueRange};
pub use host::{AnimationFrames, MountedField, mount};
pub use particles::{Connection, POINTER_SENTINEL, Particle, ParticleField, Pointer};
pub use render::{Painter, render};
pub use renderer::{FrameScheduler, Lifecycle, ParticleRenderer};
