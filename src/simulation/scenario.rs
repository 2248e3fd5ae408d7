//! Build fully-initialized sandbox scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`) and spawn rules (`SpawnRules`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`ForceSet`)
//! - the spawn color palette and the initial body list retained for reset
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! input, integration and drawing systems

use bevy::prelude::Resource;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{ForceSet, PairwiseGravity};
use crate::simulation::params::{Parameters, SpawnRules};
use crate::simulation::states::{Body, NVec2, Rgb, System};

/// Bevy resource representing a fully-initialized sandbox scenario
///
/// This is the main "runtime bundle" constructed from a [`ScenarioConfig`]:
/// it contains the engine settings, parameters, spawn rules, current system
/// state, and the set of active force laws
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub spawn: SpawnRules,
    pub palette: Vec<Rgb>,
    pub system: System,
    pub forces: ForceSet,
    initial_bodies: Vec<BodyConfig>, // retained so reset can rebuild t = 0
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Self {
        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            width: e_cfg.width,
            height: e_cfg.height,
            fps: e_cfg.fps,
            title: e_cfg.title,
        };

        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            h0: p_cfg.h0,
            g: p_cfg.g,
            min_distance: p_cfg.min_distance,
            v_max: p_cfg.v_max,
            slingshot_scale: p_cfg.slingshot_scale,
            trail_cap: p_cfg.trail_cap,
        };

        // Spawn rules (runtime) from SpawnConfig
        let s_cfg = cfg.spawn;
        let spawn = SpawnRules {
            mass_min: s_cfg.mass_min,
            mass_max: s_cfg.mass_max,
            mass_step: s_cfg.mass_step,
            mass_start: s_cfg.mass_start,
            max_bodies: s_cfg.max_bodies,
        };

        // Initial system state: bodies at t = 0
        let system = build_system(&cfg.bodies);

        // Forces: construct a ForceSet and register pairwise gravity
        let forces = ForceSet::new().with(PairwiseGravity {
            g: parameters.g,
            min_distance: parameters.min_distance,
        });

        Self {
            engine,
            parameters,
            spawn,
            palette: cfg.palette,
            system,
            forces,
            initial_bodies: cfg.bodies,
        }
    }

    /// Rebuild the body set from the retained initial configuration and
    /// rewind the clock to t = 0.
    pub fn reset(&mut self) {
        self.system = build_system(&self.initial_bodies);
    }

    /// Append a user-launched body, applying the capacity policy: at the cap
    /// the longest-lived non-anchor body is evicted first, and a system
    /// holding nothing but anchors rejects the spawn. Returns the new id.
    pub fn spawn_body(&mut self, x: NVec2, v: NVec2, m: f64, color: Rgb) -> Option<u64> {
        if self.system.bodies.len() >= self.spawn.max_bodies
            && !self.system.evict_oldest_non_anchor()
        {
            return None;
        }
        Some(self.system.insert(Body::new(x, v, m, color, false)))
    }

    /// Drop every user-spawned (non-anchor) body. A no-op when only anchors
    /// remain.
    pub fn clear_spawned(&mut self) {
        self.system.clear_non_anchors();
    }
}

/// Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors,
/// inserted in configuration order so pairing stays deterministic
fn build_system(configs: &[BodyConfig]) -> System {
    let mut system = System::new();
    for bc in configs {
        system.insert(Body::new(
            NVec2::new(bc.x[0], bc.x[1]),
            NVec2::new(bc.v[0], bc.v[1]),
            bc.m,
            bc.color,
            bc.anchor,
        ));
    }
    system
}
