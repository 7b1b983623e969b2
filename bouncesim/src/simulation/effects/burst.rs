//! Particle bursts spawned by wall hits
//!
//! A burst is created whole from one collision and removed whole once
//! its last particle has run out of life. Particles drift, slow down
//! and shrink; the renderer fades them using `life_fraction`

use rand::Rng;

use crate::simulation::params::{sample_count, sample_range, BurstParams};
use crate::simulation::states::{Color, Vector};

#[derive(Debug, Clone, PartialEq)]
pub struct Particle<const D: usize> {
    pub x: Vector<D>, // position
    pub v: Vector<D>, // velocity
    pub life: f64, // remaining seconds
    pub initial_life: f64,
    pub size: u32,
    pub color: Color,
}

impl<const D: usize> Particle<D> {
    /// Remaining share of the particle's life, in [0, 1]
    pub fn life_fraction(&self) -> f64 {
        if self.initial_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.initial_life).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct ParticleBurst<const D: usize> {
    particles: Vec<Particle<D>>,
    decay: f64,
    size_decay: f64,
}

impl<const D: usize> ParticleBurst<D> {
    /// Spawn a burst at `origin`; the particle count, lives, velocities
    /// and sizes are drawn from `params`
    pub fn spawn<R: Rng + ?Sized>(origin: Vector<D>, color: Color, params: &BurstParams, rng: &mut R) -> Self {
        let n = sample_count(rng, params.count) as usize;

        let particles = (0..n)
            .map(|_| {
                let v = Vector::from_fn(|_, _| sample_range(rng, params.speed));
                let life = sample_range(rng, params.life);
                let size = sample_count(rng, params.size);
                Particle {
                    x: origin,
                    v,
                    life,
                    initial_life: life,
                    size,
                    color,
                }
            })
            .collect();

        Self {
            particles,
            decay: params.decay,
            size_decay: params.size_decay,
        }
    }

    /// Drift, slow and shrink every particle, then drop the expired ones
    /// No-op on a dead burst
    pub fn update(&mut self, dt: f64) {
        for p in self.particles.iter_mut() {
            p.x += p.v * dt;
            p.v *= self.decay;
            p.life -= dt;
            p.size = ((p.size as f64 * self.size_decay) as u32).max(1);
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn particles(&self) -> &[Particle<D>] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// A burst with no particles left can be discarded by its owner
    pub fn is_dead(&self) -> bool {
        self.particles.is_empty()
    }
}
