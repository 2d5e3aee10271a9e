//! Physics and connection behavior of the particle field.

#![allow(unused_crate_dependencies)]

mod common;

use common::{Draw, RecordingPainter};
use particle_field::{
	Color, ConnectionSampling, FieldConfig, Particle, ParticleCount, ParticleField, Pointer,
	ValueRange, components::particle_field::render,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn config_without_pointer() -> FieldConfig {
	FieldConfig {
		mouse_influence_distance: 0.0,
		..FieldConfig::default()
	}
}

#[test]
fn two_particle_scenario_connects_with_expected_strength() {
	let config = FieldConfig {
		particle_count: ParticleCount::Fixed(2),
		connection_distance: 10.0,
		..FieldConfig::default()
	};
	let mut field = ParticleField::from_particles(
		vec![
			Particle::new(0.0, 0.0, 1.0, 0.0, 2.0),
			Particle::new(3.0, 0.0, -1.0, 0.0, 2.0),
		],
		100.0,
		100.0,
	);

	field.step(&config);

	assert_eq!((field.particles[0].x, field.particles[0].y), (1.0, 0.0));
	assert_eq!((field.particles[1].x, field.particles[1].y), (2.0, 0.0));

	let connections = field.connections(&config);
	assert_eq!(connections.len(), 1);
	assert_eq!(connections[0].distance, 1.0);
	assert!((connections[0].strength - 0.9).abs() < 1e-12);

	let mut painter = RecordingPainter::default();
	render(&field, &config, &mut painter);
	let lines = painter.lines();
	assert_eq!(lines.len(), 1);
	let Draw::Line { color, .. } = lines[0] else {
		unreachable!()
	};
	// base line alpha 0.3 scaled by 0.9
	assert!((color.a - 0.27).abs() < 1e-12);
}

#[test]
fn sentinel_pointer_leaves_velocity_alone() {
	let config = FieldConfig {
		mouse_influence_distance: 200.0,
		..FieldConfig::default()
	};
	let mut field =
		ParticleField::from_particles(vec![Particle::new(5.0, 5.0, 0.1, 0.2, 2.0)], 50.0, 50.0);
	assert_eq!(field.pointer(), Pointer { x: -1000.0, y: -1000.0 });

	field.step(&config);

	assert_eq!((field.particles[0].vx, field.particles[0].vy), (0.1, 0.2));
}

#[test]
fn position_update_uses_velocity_before_reflection() {
	let config = config_without_pointer();
	let mut field = ParticleField::from_particles(
		vec![
			Particle::new(10.0, 10.0, 0.5, -0.25, 1.0),
			Particle::new(99.0, 50.0, 5.0, 0.0, 1.0),
		],
		100.0,
		100.0,
	);

	field.step(&config);

	assert_eq!((field.particles[0].x, field.particles[0].y), (10.5, 9.75));
	assert_eq!(field.particles[1].x, 104.0);
}

#[test]
fn crossing_a_bound_reverses_that_axis_only() {
	let config = config_without_pointer();
	let width = 100.0;
	let mut field = ParticleField::from_particles(
		vec![Particle::new(width - 1.0, 50.0, 5.0, 0.5, 1.0)],
		width,
		100.0,
	);

	field.step(&config);

	let p = &field.particles[0];
	assert!(p.x > width);
	assert!(p.vx < 0.0);
	assert_eq!(p.vy, 0.5);
}

#[test]
fn only_particles_inside_influence_are_repelled() {
	let config = FieldConfig {
		mouse_influence_distance: 200.0,
		mouse_repel_strength: 2.0,
		..FieldConfig::default()
	};
	let mut field = ParticleField::from_particles(
		vec![
			Particle::new(550.0, 500.0, 0.0, 0.0, 1.0),
			Particle::new(750.0, 500.0, 0.0, 0.0, 1.0),
		],
		1000.0,
		1000.0,
	);
	field.set_pointer(500.0, 500.0);

	field.step(&config);

	let (near, far) = (&field.particles[0], &field.particles[1]);
	assert!(near.vx > 0.0, "near particle should be pushed away (+x)");
	assert_eq!((far.vx, far.vy), (0.0, 0.0));
}

#[test]
fn repulsion_accumulates_without_decay() {
	let config = FieldConfig {
		mouse_influence_distance: 200.0,
		mouse_repel_strength: 2.0,
		..FieldConfig::default()
	};
	let mut field =
		ParticleField::from_particles(vec![Particle::new(500.0, 500.0, 0.0, 0.0, 1.0)], 1e6, 1e6);
	field.set_pointer(500.0, 500.0);

	let mut last_speed = 0.0;
	for _ in 0..5 {
		field.step(&config);
		let speed = field.particles[0].vx.hypot(field.particles[0].vy);
		assert!(speed > last_speed);
		last_speed = speed;
	}
}

#[test]
fn leaving_pointer_resets_to_sentinel() {
	let mut field = ParticleField::default();
	field.set_pointer(3.0, 4.0);
	field.clear_pointer();
	assert_eq!(field.pointer(), Pointer::default());
}

#[test]
fn connections_are_reported_once_per_pair() {
	let config = FieldConfig {
		connection_distance: 50.0,
		..FieldConfig::default()
	};
	let particles = vec![
		Particle::new(0.0, 0.0, 0.0, 0.0, 1.0),
		Particle::new(10.0, 0.0, 0.0, 0.0, 1.0),
		Particle::new(20.0, 0.0, 0.0, 0.0, 1.0),
		Particle::new(500.0, 500.0, 0.0, 0.0, 1.0),
	];
	let forward = ParticleField::from_particles(particles.clone(), 1000.0, 1000.0);
	let mut reversed_particles = particles;
	reversed_particles.reverse();
	let reversed = ParticleField::from_particles(reversed_particles, 1000.0, 1000.0);

	let pairs = |field: &ParticleField| {
		let mut out: Vec<((i64, i64), (i64, i64))> = field
			.connections(&config)
			.iter()
			.map(|c| {
				let (a, b) = (&field.particles[c.from], &field.particles[c.to]);
				let (a, b) = ((a.x as i64, a.y as i64), (b.x as i64, b.y as i64));
				if a <= b { (a, b) } else { (b, a) }
			})
			.collect();
		out.sort();
		out
	};

	assert_eq!(
		pairs(&forward),
		vec![((0, 0), (10, 0)), ((0, 0), (20, 0)), ((10, 0), (20, 0))]
	);
	assert_eq!(pairs(&forward), pairs(&reversed));
}

#[test]
fn strided_sampling_thins_sources_and_targets() {
	let config = FieldConfig {
		connection_distance: 1e9,
		connections: ConnectionSampling::Strided {
			source_stride: 5,
			target_stride: 3,
		},
		..FieldConfig::default()
	};
	let particles = (0..11)
		.map(|i| Particle::new(i as f64, 0.0, 0.0, 0.0, 1.0))
		.collect();
	let field = ParticleField::from_particles(particles, 100.0, 100.0);

	let pairs: Vec<(usize, usize)> = field
		.connections(&config)
		.iter()
		.map(|c| (c.from, c.to))
		.collect();

	assert_eq!(
		pairs,
		vec![(0, 1), (0, 4), (0, 7), (0, 10), (5, 6), (5, 9)]
	);
}

#[test]
fn render_draws_every_particle_after_clearing() {
	let config = FieldConfig {
		particle_color: Color::rgba(1, 2, 3, 0.5),
		connection_distance: 0.0,
		..FieldConfig::default()
	};
	let field = ParticleField::from_particles(
		vec![
			Particle::new(1.0, 2.0, 0.0, 0.0, 3.0),
			Particle::new(4.0, 5.0, 0.0, 0.0, 2.5),
		],
		40.0,
		30.0,
	);

	let mut painter = RecordingPainter::default();
	render(&field, &config, &mut painter);

	assert_eq!(
		painter.calls,
		vec![
			Draw::Clear {
				width: 40.0,
				height: 30.0
			},
			Draw::Circle {
				x: 1.0,
				y: 2.0,
				radius: 3.0,
				color: Color::rgba(1, 2, 3, 0.5)
			},
			Draw::Circle {
				x: 4.0,
				y: 5.0,
				radius: 2.5,
				color: Color::rgba(1, 2, 3, 0.5)
			},
		]
	);
}

#[test]
fn new_field_respects_configured_ranges() {
	let config = FieldConfig {
		velocity_range: ValueRange::new(-0.5, 0.5),
		radius_range: ValueRange::new(1.0, 3.0),
		..FieldConfig::default()
	};
	let mut rng = SmallRng::seed_from_u64(42);
	let field = ParticleField::new(&config, 600.0, 450.0, &mut rng);

	assert_eq!(field.particles.len(), 30);
	for p in &field.particles {
		assert!((0.0..=600.0).contains(&p.x));
		assert!((0.0..=450.0).contains(&p.y));
		assert!(config.velocity_range.contains(p.vx));
		assert!(config.velocity_range.contains(p.vy));
		assert!(config.radius_range.contains(p.radius));
	}
}

#[test]
fn resize_keeps_density_constant() {
	let config = FieldConfig::default();
	let mut rng = SmallRng::seed_from_u64(3);
	let mut field = ParticleField::new(&config, 900.0, 600.0, &mut rng);
	let density_before = field.particles.len() as f64 / (900.0 * 600.0);

	field.regenerate(&config, 1920.0, 1080.0, &mut rng);
	let density_after = field.particles.len() as f64 / (1920.0 * 1080.0);

	assert_eq!(field.particles.len(), 230);
	// floor() loses at most one particle
	assert!((density_after - density_before).abs() <= 1.0 / (900.0 * 600.0));
}

proptest! {
	/// Without repulsion, a particle never strays further outside the bounds
	/// than one frame of its own speed.
	#[test]
	fn reflection_bounds_excursion(
		seed in any::<u64>(),
		width in 10.0f64..800.0,
		height in 10.0f64..800.0,
		steps in 1usize..400,
	) {
		let config = FieldConfig {
			particle_count: ParticleCount::Fixed(20),
			velocity_range: ValueRange::new(-3.0, 3.0),
			..config_without_pointer()
		};
		let mut rng = SmallRng::seed_from_u64(seed);
		let mut field = ParticleField::new(&config, width, height, &mut rng);

		for _ in 0..steps {
			field.step(&config);
			for p in &field.particles {
				let (sx, sy) = (p.vx.abs() + 1e-9, p.vy.abs() + 1e-9);
				prop_assert!(p.x >= -sx && p.x <= width + sx, "x={} w={}", p.x, width);
				prop_assert!(p.y >= -sy && p.y <= height + sy, "y={} h={}", p.y, height);
			}
		}
	}

	/// Strength is 1 at zero distance and falls linearly to 0 at the threshold.
	#[test]
	fn connection_strength_is_linear(gap in 0.0f64..149.9) {
		let config = FieldConfig::default();
		let field = ParticleField::from_particles(
			vec![
				Particle::new(0.0, 0.0, 0.0, 0.0, 1.0),
				Particle::new(gap, 0.0, 0.0, 0.0, 1.0),
			],
			200.0,
			200.0,
		);
		let connections = field.connections(&config);
		prop_assert_eq!(connections.len(), 1);
		prop_assert!((connections[0].strength - (1.0 - gap / 150.0)).abs() < 1e-9);
	}
}
