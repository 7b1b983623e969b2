//! Numerical and cosmetic parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - velocity damping policy and the gravity vector,
//! - trail length and sampling stride,
//! - body limit and the collision feedback switches,
//! - particle burst ranges (`BurstParams`)

use anyhow::{ensure, Result};
use rand::Rng;
use serde::Deserialize;

use super::states::Vector;

/// Per-step multiplicative velocity attenuation
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(tag = "policy", rename_all = "lowercase")]
pub enum Damping {
    #[default]
    None,
    /// `v *= 1 - coefficient * dt` (air drag in the 3d room)
    Linear { coefficient: f64 },
    /// `v *= factor` every step regardless of `dt` (2d arena)
    Constant { factor: f64 },
}

impl Damping {
    pub fn factor(&self, dt: f64) -> f64 {
        match *self {
            Damping::None => 1.0,
            Damping::Linear { coefficient } => 1.0 - coefficient * dt,
            Damping::Constant { factor } => factor,
        }
    }

    /// Damping may only attenuate: `factor` in [0, 1], `coefficient >= 0`
    pub fn validate(&self) -> Result<()> {
        match *self {
            Damping::None => {}
            Damping::Linear { coefficient } => {
                ensure!(
                    coefficient >= 0.0 && coefficient.is_finite(),
                    "linear damping coefficient must be non-negative, got {coefficient}"
                );
            }
            Damping::Constant { factor } => {
                ensure!((0.0..=1.0).contains(&factor), "constant damping factor must be in [0, 1], got {factor}");
            }
        }
        Ok(())
    }
}

/// Ranges used when a wall hit spawns a particle burst
/// Pairs are inclusive `(low, high)` ranges
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BurstParams {
    pub count: (u32, u32), // particles per burst
    pub life: (f64, f64), // seconds
    pub speed: (f64, f64), // velocity range, sampled per axis
    pub size: (u32, u32),
    pub decay: f64, // velocity multiplier per update
    pub size_decay: f64, // size multiplier per update
}

impl Default for BurstParams {
    fn default() -> Self {
        Self {
            count: (3, 8),
            life: (0.5, 1.5),
            speed: (-3.0, 3.0),
            size: (2, 5),
            decay: 0.95,
            size_decay: 0.98,
        }
    }
}

impl BurstParams {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.count.0 <= self.count.1, "burst count range is inverted: {:?}", self.count);
        ensure!(self.life.0 > 0.0 && self.life.0 <= self.life.1, "burst life range must be positive and ordered: {:?}", self.life);
        ensure!(self.speed.0 <= self.speed.1, "burst speed range is inverted: {:?}", self.speed);
        ensure!(self.size.0 >= 1 && self.size.0 <= self.size.1, "burst size range must start at 1 or more: {:?}", self.size);
        ensure!((0.0..1.0).contains(&self.decay), "burst decay must be in [0, 1), got {}", self.decay);
        ensure!((0.0..=1.0).contains(&self.size_decay), "burst size_decay must be in [0, 1], got {}", self.size_decay);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Parameters<const D: usize> {
    pub damping: Damping,
    pub gravity: Vector<D>, // acceleration, applied as an m*g force
    pub trail_capacity: usize,
    pub trail_stride: u64, // record a trail point every n-th frame
    pub max_bodies: usize,
    pub recolor_on_collision: bool,
    pub burst_on_collision: bool,
    pub burst: BurstParams,
}

impl<const D: usize> Default for Parameters<D> {
    fn default() -> Self {
        Self {
            damping: Damping::None,
            gravity: Vector::zeros(),
            trail_capacity: 8,
            trail_stride: 1,
            max_bodies: 15,
            recolor_on_collision: true,
            burst_on_collision: true,
            burst: BurstParams::default(),
        }
    }
}

/// Uniform sample from `[lo, hi)`, or `lo` when the range is empty
pub(crate) fn sample_range<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

pub(crate) fn sample_count<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (u32, u32)) -> u32 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damping_factors() {
        assert_eq!(Damping::None.factor(0.5), 1.0);
        assert!((Damping::Linear { coefficient: 0.02 }.factor(0.5) - 0.99).abs() < 1e-12);
        assert_eq!(Damping::Constant { factor: 0.98 }.factor(123.0), 0.98);
    }

    #[test]
    fn amplifying_damping_rejected() {
        assert!(Damping::default().validate().is_ok());
        assert!(Damping::Linear { coefficient: 0.02 }.validate().is_ok());
        assert!(Damping::Constant { factor: 0.98 }.validate().is_ok());

        assert!(Damping::Constant { factor: 1.5 }.validate().is_err());
        assert!(Damping::Constant { factor: -0.1 }.validate().is_err());
        assert!(Damping::Linear { coefficient: -5.0 }.validate().is_err());
        assert!(Damping::Linear { coefficient: f64::NAN }.validate().is_err());
    }

    #[test]
    fn default_burst_params_are_valid() {
        assert!(BurstParams::default().validate().is_ok());
    }

    #[test]
    fn inverted_burst_ranges_rejected() {
        let p = BurstParams { count: (5, 2), ..Default::default() };
        assert!(p.validate().is_err());

        let p = BurstParams { size: (0, 3), ..Default::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn damping_parses_from_yaml() {
        let d: Damping = serde_yaml::from_str("policy: linear\ncoefficient: 0.02").unwrap();
        assert_eq!(d, Damping::Linear { coefficient: 0.02 });

        let d: Damping = serde_yaml::from_str("policy: none").unwrap();
        assert_eq!(d, Damping::None);
    }
}
