use std::time::Instant;

use crate::simulation::boundary::Domain;
use crate::simulation::params::{Damping, Parameters};
use crate::simulation::states::{Body3, NVec3, ShapeKind};
use crate::simulation::world::World3;

/// Helper to build a room full of `n` bodies
/// Deterministic positions and velocities, no rand needed
fn make_world3(n: usize) -> World3 {
    let params = Parameters {
        damping: Damping::Linear { coefficient: 0.02 },
        gravity: NVec3::new(0.0, -9.8, 0.0),
        trail_capacity: 20,
        max_bodies: n,
        ..Parameters::default()
    };

    let room = Domain::centered(NVec3::new(10.0, 10.0, 10.0)).expect("fixed room size is valid");
    let mut world = World3::new(room, params, 42);

    for i in 0..n {
        let i_f = i as f64;
        let x = NVec3::new(
            (i_f * 0.37).sin() * 4.0,
            (i_f * 0.13).cos() * 4.0,
            (i_f * 0.07).sin() * 4.0,
        );
        let v = NVec3::new(
            (i_f * 0.11).cos() * 5.0,
            (i_f * 0.23).sin() * 5.0,
            (i_f * 0.31).cos() * 5.0,
        );

        let body = Body3::new(x, v, 0.5).with_bounce(0.8).with_kind(ShapeKind::Sphere);
        world.spawn_body(body).expect("body limit sized to n");
    }

    world
}

/// Time `World::step` (integration, bounces, trails, bursts) for growing body counts
pub fn bench_step() {
    let ns = [10, 100, 1_000, 10_000, 100_000];
    let steps = 60; // one simulated second at 60 fps

    for n in ns {
        let mut world = make_world3(n);

        // Warm up
        world.step(1.0 / 60.0);

        let t0 = Instant::now();
        for _ in 0..steps {
            world.step(1.0 / 60.0);
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!(
            "N = {:6}, step = {:10.6} ms, live bursts = {:6}",
            n,
            per_step * 1000.0,
            world.burst_count()
        );
    }
}

/// Same measurement as CSV, ready to graph
pub fn bench_step_curve() {
    println!("N,step_ms");

    for n in (500..=20_000).step_by(500) {
        let mut world = make_world3(n);
        let steps = if n <= 5_000 { 20 } else { 5 };

        let t0 = Instant::now();
        for _ in 0..steps {
            world.step(1.0 / 60.0);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
