//! High-level runtime engine settings
//!
//! Selects dimension (2D/3D), how many frames a run lasts and the fixed
//! frame step used when building and running a `Scenario`

#[derive(Debug, Clone)]
pub struct Engine {
    pub dimension: bool, // false = 2D, true = 3D
    pub frames: u64, // frames per run
    pub dt: f64, // seconds per frame
    pub seed: u64, // world RNG seed
}
