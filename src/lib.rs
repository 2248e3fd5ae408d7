pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec2, Rgb};
pub use simulation::params::{Parameters, SpawnRules};
pub use simulation::engine::Engine;
pub use simulation::forces::{Force, ForceSet, PairwiseGravity, gravity_pair_force};
pub use simulation::integrator::sandbox_step;
pub use simulation::scenario::Scenario;
pub use simulation::controller::{SimController, Slingshot};

pub use configuration::config::{EngineConfig, ParametersConfig, SpawnConfig, BodyConfig, ScenarioConfig};

pub use visualization::sandbox_vis::run_sandbox;

pub use benchmark::benchmark::{bench_pairwise, bench_step_curve};
