//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – dimension, frame count, step size, seed, spawning
//! - [`ParametersConfig`] – damping, gravity, trails, collision feedback
//! - [`DomainConfig`]     – the walls
//! - [`SpawnConfig`]      – ranges for randomly sampled bodies (optional)
//! - [`BodyConfig`]       – explicitly placed bodies (optional)
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example 2D scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   dimension: false        # false -> 2D, true -> 3D
//!   frames: 600
//!   dt: 0.016666
//!   seed: 42
//!   random_bodies: 5
//!   kinds: [square, circle, triangle, hexagon]
//!
//! parameters:
//!   damping: { policy: constant, factor: 0.98 }
//!   gravity: [0.0, 0.3]
//!   trail_capacity: 8
//!   max_bodies: 15
//!
//! domain:
//!   min: [0.0, 0.0]
//!   max: [800.0, 600.0]
//!
//! bodies:
//!   - kind: circle
//!     x: [400.0, 300.0]
//!     v: [5.0, -3.0]
//!     radius: 20.0
//!     bounce: 0.8
//! ```
//!
//! Vectors are plain lists; their length is checked against the dimension
//! when the scenario is built.

use serde::Deserialize;

use crate::simulation::params::{BurstParams, Damping};
use crate::simulation::states::ShapeKind;
use crate::simulation::world::ColorStyle;

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub dimension: bool, // `false` - 2D arena, `true` - 3D room
    pub frames: u64, // number of frames `run` advances
    pub dt: f64, // seconds per frame
    #[serde(default)]
    pub seed: u64, // deterministic seed to make runs reproducible
    #[serde(default)]
    pub random_bodies: usize, // bodies sampled from `spawn` ranges at start
    #[serde(default = "default_kinds")]
    pub kinds: Vec<ShapeKind>, // kinds the random bodies pick from
    pub spiral: Option<SpiralConfig>, // optional decorative initial layout
}

fn default_kinds() -> Vec<ShapeKind> {
    vec![ShapeKind::Circle]
}

/// Bodies placed on nested rings around `center`
#[derive(Deserialize, Debug, Clone)]
pub struct SpiralConfig {
    pub kind: ShapeKind,
    pub center: Vec<f64>,
    pub count: usize,
    pub radius: f64,
}

/// Global numerical and cosmetic parameters
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default)]
    pub damping: Damping,
    pub gravity: Option<Vec<f64>>, // constant acceleration, none -> no gravity
    #[serde(default = "default_trail_capacity")]
    pub trail_capacity: usize,
    #[serde(default = "default_trail_stride")]
    pub trail_stride: u64,
    #[serde(default = "default_max_bodies")]
    pub max_bodies: usize,
    #[serde(default = "default_true")]
    pub recolor_on_collision: bool,
    #[serde(default = "default_true")]
    pub burst_on_collision: bool,
    #[serde(default)]
    pub burst: BurstParams,
}

fn default_trail_capacity() -> usize {
    8
}

fn default_trail_stride() -> u64 {
    1
}

fn default_max_bodies() -> usize {
    15
}

fn default_true() -> bool {
    true
}

/// Axis-aligned walls
#[derive(Deserialize, Debug, Clone)]
pub struct DomainConfig {
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

/// Ranges used for randomly spawned bodies
#[derive(Deserialize, Debug, Clone)]
pub struct SpawnConfig {
    pub velocity_min: Vec<f64>,
    pub velocity_max: Vec<f64>,
    pub radius: (f64, f64),
    #[serde(default = "default_bounce_range")]
    pub bounce: (f64, f64),
    #[serde(default = "default_mass")]
    pub mass: f64,
    #[serde(default)]
    pub margin: f64, // keep sampled centres this far from the walls
    #[serde(default)]
    pub color: ColorStyle,
}

fn default_bounce_range() -> (f64, f64) {
    (1.0, 1.0)
}

fn default_mass() -> f64 {
    1.0
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    #[serde(default = "default_kind")]
    pub kind: ShapeKind,
    pub x: Vec<f64>, // Initial position
    pub v: Vec<f64>, // Initial velocity
    #[serde(default = "default_mass")]
    pub m: f64, // Mass of the body
    pub radius: f64, // Bounding radius used against the walls
    #[serde(default = "default_bounce")]
    pub bounce: f64, // Fraction of speed kept on a wall hit
    pub color: Option<[f32; 3]>, // RGB in [0, 1], none -> white
}

fn default_kind() -> ShapeKind {
    ShapeKind::Circle
}

fn default_bounce() -> f64 {
    1.0
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub domain: DomainConfig,
    pub spawn: Option<SpawnConfig>,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
}
