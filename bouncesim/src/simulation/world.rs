//! The explicit frame context: every body, trail and burst lives here
//!
//! A `World` is owned by whoever drives the frame loop. All randomness
//! flows from its seeded RNG, so a world built from the same seed and fed
//! the same `dt` sequence replays identically

use anyhow::{ensure, Result};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use tracing::{debug, info};

use super::boundary::Domain;
use super::effects::burst::{Particle, ParticleBurst};
use super::effects::trail::TrailBuffer;
use super::forces::{ForceSet, UniformGravity};
use super::integrator::euler_step;
use super::params::{sample_range, Parameters};
use super::pattern::SpiralPattern;
use super::states::{BodyId, Color, MotionBody, ShapeKind, Vector};

/// How spawn and collision feedback pick colors
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorStyle {
    #[default]
    Vibrant,
    Pastel,
}

impl ColorStyle {
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Color {
        match self {
            ColorStyle::Vibrant => Color::random_vibrant(rng),
            ColorStyle::Pastel => Color::random_pastel(rng),
        }
    }
}

/// Ranges sampled by `spawn` for whatever the caller leaves out
#[derive(Debug, Clone)]
pub struct SpawnRanges<const D: usize> {
    pub velocity: (Vector<D>, Vector<D>), // per-axis (min, max)
    pub radius: (f64, f64),
    pub bounce: (f64, f64),
    pub mass: f64,
    pub margin: f64, // minimum distance between a sampled centre and the walls
    pub color: ColorStyle,
}

impl<const D: usize> Default for SpawnRanges<D> {
    fn default() -> Self {
        Self {
            velocity: (Vector::repeat(-6.0), Vector::repeat(6.0)),
            radius: (7.5, 22.5),
            bounce: (0.7, 0.9),
            mass: 1.0,
            margin: 0.0,
            color: ColorStyle::Vibrant,
        }
    }
}

/// Running totals for the HUD
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub objects_created: usize, // cumulative, survives clear_all
    pub total_collisions: u64, // summed over live bodies
    pub elapsed: f64,
    pub frames: u64,
    pub kind_counts: [usize; ShapeKind::COUNT], // live bodies per kind
}

impl Stats {
    pub fn count_of(&self, kind: ShapeKind) -> usize {
        self.kind_counts[kind.index()]
    }
}

pub struct World<const D: usize> {
    bodies: Vec<MotionBody<D>>,
    trails: Vec<TrailBuffer<D>>, // trails[i] belongs to bodies[i]
    bursts: Vec<ParticleBurst<D>>,
    forces: ForceSet<D>,
    params: Parameters<D>,
    spawn: SpawnRanges<D>,
    domain: Domain<D>,
    rng: ChaCha8Rng,
    epoch: u32,
    objects_created: usize,
    elapsed: f64,
    frames: u64,
}

pub type World2 = World<2>;
pub type World3 = World<3>;

impl<const D: usize> World<D> {
    /// Empty world; a non-zero `params.gravity` registers a `UniformGravity` term
    pub fn new(domain: Domain<D>, params: Parameters<D>, seed: u64) -> Self {
        let mut forces = ForceSet::new();
        if params.gravity != Vector::<D>::zeros() {
            forces = forces.with(UniformGravity { g: params.gravity });
        }

        Self {
            bodies: Vec::new(),
            trails: Vec::new(),
            bursts: Vec::new(),
            forces,
            params,
            spawn: SpawnRanges::default(),
            domain,
            rng: ChaCha8Rng::seed_from_u64(seed),
            epoch: 0,
            objects_created: 0,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Replace the force terms (including the gravity set up by `new`)
    pub fn with_forces(mut self, forces: ForceSet<D>) -> Self {
        self.forces = forces;
        self
    }

    pub fn with_spawn_ranges(mut self, spawn: SpawnRanges<D>) -> Self {
        self.spawn = spawn;
        self
    }

    // =====================================================================================
    // Spawning
    // =====================================================================================

    /// Create a body of `kind`; position, velocity and color are sampled
    /// when not given. `color_seed` makes the color independent of the
    /// world RNG
    pub fn spawn(
        &mut self,
        kind: ShapeKind,
        position: Option<Vector<D>>,
        velocity: Option<Vector<D>>,
        color_seed: Option<u64>,
    ) -> Result<BodyId> {
        ensure!(self.bodies.len() < self.params.max_bodies, "body limit of {} reached", self.params.max_bodies);

        self.check_spawn_ranges()?;

        let radius = sample_range(&mut self.rng, self.spawn.radius);
        let x = match position {
            Some(x) => x,
            None => self.sample_position(radius),
        };
        let v = match velocity {
            Some(v) => v,
            None => {
                let (lo, hi) = self.spawn.velocity;
                let rng = &mut self.rng;
                Vector::from_fn(|i, _| sample_range(rng, (lo[i], hi[i])))
            }
        };
        let bounce = sample_range(&mut self.rng, self.spawn.bounce);
        let color = match color_seed {
            Some(seed) => self.spawn.color.sample(&mut ChaCha8Rng::seed_from_u64(seed)),
            None => self.spawn.color.sample(&mut self.rng),
        };

        let body = MotionBody::new(x, v, radius)
            .with_mass(self.spawn.mass)
            .with_bounce(bounce)
            .with_color(color)
            .with_kind(kind);

        self.spawn_body(body)
    }

    /// Spawn with a kind picked uniformly from `kinds`
    pub fn spawn_random(&mut self, kinds: &[ShapeKind]) -> Result<BodyId> {
        let kind = *kinds
            .choose(&mut self.rng)
            .ok_or_else(|| anyhow::anyhow!("no shape kinds to choose from"))?;
        self.spawn(kind, None, None, None)
    }

    /// Take ownership of a fully specified body
    /// A body placed outside the walls is pulled back inside
    pub fn spawn_body(&mut self, mut body: MotionBody<D>) -> Result<BodyId> {
        ensure!(self.bodies.len() < self.params.max_bodies, "body limit of {} reached", self.params.max_bodies);
        ensure!(self.domain.fits(body.radius), "radius {} does not fit inside the domain", body.radius);
        ensure!(body.bounce > 0.0 && body.bounce <= 1.0, "bounce factor must be in (0, 1], got {}", body.bounce);

        body.x = self.domain.clamp(&body.x, body.radius);

        let id = BodyId {
            index: self.bodies.len(),
            epoch: self.epoch,
        };
        debug!(index = id.index, kind = ?body.kind, radius = body.radius, "spawned body");

        self.bodies.push(body);
        self.trails.push(TrailBuffer::new(self.params.trail_capacity));
        self.objects_created += 1;
        Ok(id)
    }

    /// Place bodies on the spiral pattern around `center`, stopping
    /// quietly at the body limit
    /// Either every position is spawned or, on error, none is
    pub fn spawn_spiral(&mut self, kind: ShapeKind, center: Vector<D>, count: usize, radius: f64) -> Result<Vec<BodyId>> {
        self.check_spawn_ranges()?;

        let room = self.params.max_bodies.saturating_sub(self.bodies.len());
        let positions: Vec<Vector<D>> = SpiralPattern::new(center, count, radius).take(room).collect();

        let mut ids = Vec::with_capacity(positions.len());
        for x in positions {
            ids.push(self.spawn(kind, Some(x), None, None)?);
        }
        Ok(ids)
    }

    /// Every body the spawn ranges can produce must be accepted by `spawn_body`
    fn check_spawn_ranges(&self) -> Result<()> {
        let s = &self.spawn;
        ensure!(s.radius.0 > 0.0 && s.radius.0 <= s.radius.1, "spawn radius must be positive and ordered: {:?}", s.radius);
        ensure!(self.domain.fits(s.radius.1), "spawn radius {} does not fit inside the domain", s.radius.1);
        ensure!(
            s.bounce.0 > 0.0 && s.bounce.0 <= s.bounce.1 && s.bounce.1 <= 1.0,
            "spawn bounce must lie in (0, 1] and be ordered: {:?}",
            s.bounce
        );
        ensure!(s.mass > 0.0 && s.mass.is_finite(), "spawn mass must be positive and finite, got {}", s.mass);
        Ok(())
    }

    /// Attach a caller-built burst so it is updated with the world
    pub fn add_burst(&mut self, burst: ParticleBurst<D>) {
        if !burst.is_dead() {
            self.bursts.push(burst);
        }
    }

    fn sample_position(&mut self, radius: f64) -> Vector<D> {
        let inset = self.spawn.margin.max(radius);
        let (min, max) = (self.domain.min, self.domain.max);
        let rng = &mut self.rng;
        Vector::from_fn(|i, _| {
            let (lo, hi) = (min[i] + inset, max[i] - inset);
            if hi > lo {
                sample_range(rng, (lo, hi))
            } else {
                (min[i] + max[i]) / 2.0
            }
        })
    }

    // =====================================================================================
    // Per-body operations
    // =====================================================================================

    fn slot(&self, id: BodyId) -> Result<usize> {
        ensure!(
            id.epoch == self.epoch && id.index < self.bodies.len(),
            "stale or unknown body handle {:?}",
            id
        );
        Ok(id.index)
    }

    /// Apply the configured forces to one body and advance it by `dt`
    pub fn integrate(&mut self, id: BodyId, dt: f64) -> Result<()> {
        let i = self.slot(id)?;
        let body = &mut self.bodies[i];
        self.forces.apply(self.elapsed, body);
        body.integrate(dt, &self.params.damping);
        Ok(())
    }

    /// Bounce one body off `domain`; on a hit the collision feedback
    /// (recolor, burst) fires once
    pub fn resolve_boundaries(&mut self, id: BodyId, domain: &Domain<D>) -> Result<bool> {
        let i = self.slot(id)?;
        let collided = self.bodies[i].resolve_boundaries(domain);
        if collided {
            self.on_collision(i);
        }
        Ok(collided)
    }

    pub fn record_trail(&mut self, id: BodyId) -> Result<()> {
        let i = self.slot(id)?;
        self.trails[i].record(self.bodies[i].x);
        Ok(())
    }

    fn on_collision(&mut self, i: usize) {
        if self.params.recolor_on_collision {
            self.bodies[i].color = self.spawn.color.sample(&mut self.rng);
        }

        let body = &self.bodies[i];
        debug!(index = i, collisions = body.collisions, "boundary collision");

        if self.params.burst_on_collision {
            let burst = ParticleBurst::spawn(body.x, body.color, &self.params.burst, &mut self.rng);
            self.add_burst(burst);
        }
    }

    // =====================================================================================
    // Frame update
    // =====================================================================================

    /// One frame: forces + integration, wall bounces, trails, then bursts
    pub fn step(&mut self, dt: f64) {
        euler_step(&mut self.bodies, &self.forces, &self.params.damping, self.elapsed, dt);

        let domain = self.domain;
        let record = self.frames % self.params.trail_stride.max(1) == 0;
        for i in 0..self.bodies.len() {
            if self.bodies[i].resolve_boundaries(&domain) {
                self.on_collision(i);
            }
            if record {
                self.trails[i].record(self.bodies[i].x);
            }
        }

        for burst in self.bursts.iter_mut() {
            burst.update(dt);
        }
        self.bursts.retain(|b| !b.is_dead());

        self.elapsed += dt;
        self.frames += 1;
    }

    /// Drop every body, trail and burst. Handles issued so far stop resolving
    pub fn clear_all(&mut self) {
        info!(bodies = self.bodies.len(), bursts = self.bursts.len(), "clearing world");
        self.bodies.clear();
        self.trails.clear();
        self.bursts.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    // =====================================================================================
    // Read-only accessors
    // =====================================================================================

    pub fn body(&self, id: BodyId) -> Option<&MotionBody<D>> {
        self.slot(id).ok().map(|i| &self.bodies[i])
    }

    pub fn position(&self, id: BodyId) -> Option<Vector<D>> {
        self.body(id).map(|b| b.x)
    }

    pub fn radius(&self, id: BodyId) -> Option<f64> {
        self.body(id).map(|b| b.radius)
    }

    pub fn color(&self, id: BodyId) -> Option<Color> {
        self.body(id).map(|b| b.color)
    }

    pub fn collision_count(&self, id: BodyId) -> Option<u64> {
        self.body(id).map(|b| b.collisions)
    }

    /// Trail points of one body, oldest first
    pub fn trail(&self, id: BodyId) -> Option<Vec<Vector<D>>> {
        self.slot(id).ok().map(|i| self.trails[i].snapshot())
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        (0..self.bodies.len()).map(move |index| BodyId { index, epoch: self.epoch })
    }

    pub fn bodies(&self) -> &[MotionBody<D>] {
        &self.bodies
    }

    pub fn bursts(&self) -> &[ParticleBurst<D>] {
        &self.bursts
    }

    /// Every live particle across all bursts
    pub fn particles(&self) -> impl Iterator<Item = &Particle<D>> + '_ {
        self.bursts.iter().flat_map(|b| b.particles().iter())
    }

    pub fn domain(&self) -> &Domain<D> {
        &self.domain
    }

    pub fn params(&self) -> &Parameters<D> {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn trail_count(&self) -> usize {
        self.trails.len()
    }

    pub fn burst_count(&self) -> usize {
        self.bursts.len()
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn stats(&self) -> Stats {
        let mut kind_counts = [0; ShapeKind::COUNT];
        for b in &self.bodies {
            kind_counts[b.kind.index()] += 1;
        }

        Stats {
            objects_created: self.objects_created,
            total_collisions: self.bodies.iter().map(|b| b.collisions).sum(),
            elapsed: self.elapsed,
            frames: self.frames,
            kind_counts,
        }
    }
}
