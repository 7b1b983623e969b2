//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario<2>` for the arena, `Scenario<3>` for the room) containing:
//! - engine settings (`Engine`)
//! - the populated `World` (parameters, forces, walls, bodies)
//!
//! `run` then drives the frame loop headlessly and reports a `RunSummary`

use std::fmt;

use anyhow::{ensure, Context, Result};
use tracing::info;

use crate::configuration::config::{BodyConfig, ScenarioConfig, SpawnConfig};
use crate::simulation::boundary::Domain;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Color, MotionBody, Vector};
use crate::simulation::world::{SpawnRanges, World};

/// Runtime bundle constructed from a [`ScenarioConfig`]
pub struct Scenario<const D: usize> {
    pub engine: Engine,
    pub world: World<D>,
}

pub type Scenario2D = Scenario<2>;
pub type Scenario3D = Scenario<3>;

/// What a headless run ends with
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed: f64,
    pub bodies: usize,
    pub objects_created: usize,
    pub total_collisions: u64,
    pub live_bursts: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frames = {}, time = {:.2} s, bodies = {} (created {}), collisions = {}, live bursts = {}",
            self.frames, self.elapsed, self.bodies, self.objects_created, self.total_collisions, self.live_bursts
        )
    }
}

/// Read exactly `D` components out of a YAML list
fn vector<const D: usize>(values: &[f64], what: &str) -> Result<Vector<D>> {
    ensure!(values.len() == D, "{what}: expected {D} components, got {}", values.len());
    ensure!(values.iter().all(|c| c.is_finite()), "{what}: components must be finite");
    Ok(Vector::from_column_slice(values))
}

impl<const D: usize> Scenario<D> {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let e_cfg = cfg.engine;
        ensure!(e_cfg.dimension == (D == 3), "scenario dimension does not match a {D}D build");
        ensure!(e_cfg.dt >= 0.0 && e_cfg.dt.is_finite(), "engine.dt must be non-negative, got {}", e_cfg.dt);

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            dimension: e_cfg.dimension,
            frames: e_cfg.frames,
            dt: e_cfg.dt,
            seed: e_cfg.seed,
        };

        // Walls
        let domain = Domain::new(
            vector(&cfg.domain.min, "domain.min")?,
            vector(&cfg.domain.max, "domain.max")?,
        )?;

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        p_cfg.damping.validate()?;
        p_cfg.burst.validate()?;
        ensure!(p_cfg.trail_stride >= 1, "parameters.trail_stride must be at least 1");
        let gravity = match &p_cfg.gravity {
            Some(g) => vector(g, "parameters.gravity")?,
            None => Vector::zeros(),
        };
        let parameters = Parameters {
            damping: p_cfg.damping,
            gravity,
            trail_capacity: p_cfg.trail_capacity,
            trail_stride: p_cfg.trail_stride,
            max_bodies: p_cfg.max_bodies,
            recolor_on_collision: p_cfg.recolor_on_collision,
            burst_on_collision: p_cfg.burst_on_collision,
            burst: p_cfg.burst,
        };

        let mut world = World::new(domain, parameters, engine.seed);
        if let Some(s_cfg) = &cfg.spawn {
            world = world.with_spawn_ranges(spawn_ranges(s_cfg)?);
        }

        // Explicit bodies first, then the decorative layout, then random fill
        for (i, bc) in cfg.bodies.iter().enumerate() {
            let body = body_from_config(bc).with_context(|| format!("bodies[{i}]"))?;
            world.spawn_body(body).with_context(|| format!("bodies[{i}]"))?;
        }

        if let Some(sp) = &e_cfg.spiral {
            let center = vector(&sp.center, "engine.spiral.center")?;
            world.spawn_spiral(sp.kind, center, sp.count, sp.radius)?;
        }

        for _ in 0..e_cfg.random_bodies {
            world.spawn_random(&e_cfg.kinds).context("engine.random_bodies")?;
        }

        Ok(Self { engine, world })
    }

    /// Advance the configured number of frames
    pub fn run(&mut self) -> RunSummary {
        self.run_frames(self.engine.frames)
    }

    pub fn run_frames(&mut self, frames: u64) -> RunSummary {
        info!(dimension = D, bodies = self.world.len(), frames, dt = self.engine.dt, "starting run");

        for _ in 0..frames {
            self.world.step(self.engine.dt);
        }

        let summary = self.summary(frames);
        info!(collisions = summary.total_collisions, elapsed = summary.elapsed, "run finished");
        summary
    }

    fn summary(&self, frames: u64) -> RunSummary {
        let stats = self.world.stats();
        RunSummary {
            frames,
            elapsed: stats.elapsed,
            bodies: self.world.len(),
            objects_created: stats.objects_created,
            total_collisions: stats.total_collisions,
            live_bursts: self.world.burst_count(),
        }
    }
}

fn spawn_ranges<const D: usize>(s: &SpawnConfig) -> Result<SpawnRanges<D>> {
    ensure!(s.radius.0 > 0.0 && s.radius.0 <= s.radius.1, "spawn.radius must be positive and ordered: {:?}", s.radius);
    ensure!(
        s.bounce.0 > 0.0 && s.bounce.0 <= s.bounce.1 && s.bounce.1 <= 1.0,
        "spawn.bounce must lie in (0, 1] and be ordered: {:?}",
        s.bounce
    );
    ensure!(s.mass > 0.0 && s.mass.is_finite(), "spawn.mass must be positive and finite, got {}", s.mass);

    Ok(SpawnRanges {
        velocity: (vector(&s.velocity_min, "spawn.velocity_min")?, vector(&s.velocity_max, "spawn.velocity_max")?),
        radius: s.radius,
        bounce: s.bounce,
        mass: s.mass,
        margin: s.margin,
        color: s.color,
    })
}

fn body_from_config<const D: usize>(bc: &BodyConfig) -> Result<MotionBody<D>> {
    ensure!(bc.radius > 0.0, "radius must be positive, got {}", bc.radius);
    ensure!(bc.m > 0.0 && bc.m.is_finite(), "mass must be positive and finite, got {}", bc.m);
    ensure!(bc.bounce > 0.0 && bc.bounce <= 1.0, "bounce factor must be in (0, 1], got {}", bc.bounce);

    let color = bc.color.map_or(Color::WHITE, |[r, g, b]| Color::new(r, g, b));

    Ok(MotionBody::new(vector(&bc.x, "x")?, vector(&bc.v, "v")?, bc.radius)
        .with_mass(bc.m)
        .with_bounce(bc.bounce)
        .with_color(color)
        .with_kind(bc.kind))
}
