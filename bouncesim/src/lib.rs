pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body2, Body3, BodyId, Color, MotionBody, NVec2, NVec3, ShapeKind, Vector};
pub use simulation::params::{BurstParams, Damping, Parameters};
pub use simulation::boundary::{Domain, Domain2, Domain3};
pub use simulation::forces::{Force, ForceSet, LinearDrag, UniformGravity};
pub use simulation::integrator::euler_step;
pub use simulation::effects::{burst::{Particle, ParticleBurst}, trail::TrailBuffer};
pub use simulation::pattern::SpiralPattern;
pub use simulation::world::{ColorStyle, SpawnRanges, Stats, World, World2, World3};
pub use simulation::scenario::{RunSummary, Scenario, Scenario2D, Scenario3D};

pub use configuration::config::{BodyConfig, DomainConfig, EngineConfig, ParametersConfig, ScenarioConfig, SpawnConfig, SpiralConfig};

pub use benchmark::benchmark::{bench_step, bench_step_curve};
