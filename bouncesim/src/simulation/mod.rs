pub mod states;
pub mod params;
pub mod engine;
pub mod boundary;
pub mod forces;
pub mod integrator;
pub mod effects;
pub mod pattern;
pub mod world;
pub mod scenario;
