//! Configuration types for loading sandbox scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! sandbox scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – viewport dimensions, frame rate, window title
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`SpawnConfig`]      – user-spawn mass bounds and the live body cap
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every top-level section is optional and falls back to the built-in
//! three-body setup, so a YAML file only needs the sections it changes.
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   width: 1100.0           # viewport width in simulation units (= pixels)
//!   height: 800.0           # viewport height
//!   fps: 60.0               # fixed physics/frame rate
//!   title: "Gravity Sandbox"
//!
//! parameters:
//!   g: 2000.0               # gravitational constant (scaled)
//!   h0: 0.1                 # fixed integration step
//!   min_distance: 10.0      # close-range force cap floor
//!   v_max: 100.0            # velocity magnitude clamp
//!   slingshot_scale: 0.1    # drag vector to launch velocity factor
//!   trail_cap: 150          # retained trail positions per body
//!
//! spawn:
//!   mass_min: 5.0
//!   mass_max: 5000.0
//!   mass_step: 5.0
//!   mass_start: 50.0
//!   max_bodies: 256         # oldest non-anchor evicted beyond this
//!
//! palette:                  # spawn colors, picked at random per launch
//!   - [255, 0, 100]
//!   - [100, 150, 255]
//!
//! bodies:
//!   - x: [550.0, 400.0]
//!     v: [0.0, 0.0]
//!     m: 10000.0
//!     color: [255, 255, 0]
//!     anchor: true          # exempt from boundary culling
//!   - x: [750.0, 400.0]
//!     v: [0.0, -25.0]
//!     m: 70.0
//!     color: [100, 150, 255]
//! ```
//!
//! The engine then maps this configuration into its internal runtime scenario
//! representation, which may use different structs optimized for the step loop.

use serde::Deserialize;

/// Viewport and frame-rate configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub width: f64, // viewport width in simulation units (= pixels)
    pub height: f64, // viewport height
    pub fps: f64, // fixed physics/frame rate in Hz
    #[serde(default = "default_title")]
    pub title: String, // window title
}

fn default_title() -> String {
    "Gravity Sandbox".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 1100.0,
            height: 800.0,
            fps: 60.0,
            title: default_title(),
        }
    }
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub g: f64, // gravitational constant, scaled for sandbox distances
    pub h0: f64, // fixed time step size
    pub min_distance: f64, // separation floor that caps close-range force
    pub v_max: f64, // velocity magnitude clamp
    pub slingshot_scale: f64, // drag vector to launch velocity factor
    pub trail_cap: usize, // retained trail positions per body
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            g: 2000.0,
            h0: 0.1,
            min_distance: 10.0,
            v_max: 100.0,
            slingshot_scale: 0.1,
            trail_cap: 150,
        }
    }
}

/// User-spawn configuration: pending mass bounds and the live body cap
#[derive(Deserialize, Debug, Clone)]
pub struct SpawnConfig {
    pub mass_min: f64, // lower bound for the pending spawn mass
    pub mass_max: f64, // upper bound for the pending spawn mass
    pub mass_step: f64, // increment per +/- key press
    pub mass_start: f64, // pending mass at startup
    pub max_bodies: usize, // live body cap, oldest non-anchor evicted beyond it
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            mass_min: 5.0,
            mass_max: 5000.0,
            mass_step: 5.0,
            mass_start: 50.0,
            max_bodies: 256,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position in simulation units
    #[serde(default)]
    pub v: [f64; 2], // initial velocity in simulation units per time unit
    pub m: f64, // mass of the body (zero is coerced to 1 at build time)
    pub color: [u8; 3], // fixed draw color
    #[serde(default)]
    pub anchor: bool, // exempt from boundary culling and the clear action
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // viewport and frame-rate settings
    #[serde(default)]
    pub parameters: ParametersConfig, // numerical and physical parameters
    #[serde(default)]
    pub spawn: SpawnConfig, // user-spawn mass bounds and body cap
    #[serde(default = "default_palette")]
    pub palette: Vec<[u8; 3]>, // spawn colors, picked at random per launch
    #[serde(default = "default_bodies")]
    pub bodies: Vec<BodyConfig>, // initial state of the system
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            parameters: ParametersConfig::default(),
            spawn: SpawnConfig::default(),
            palette: default_palette(),
            bodies: default_bodies(),
        }
    }
}

fn default_palette() -> Vec<[u8; 3]> {
    vec![
        [255, 0, 100], // red
        [100, 150, 255], // blue
        [255, 255, 0], // yellow
        [0, 255, 0], // green
        [150, 150, 255],
        [255, 150, 150],
    ]
}

/// The built-in three-body setup: a heavy anchor at the viewport center and
/// two light bodies on crossing orbits.
fn default_bodies() -> Vec<BodyConfig> {
    vec![
        BodyConfig {
            x: [550.0, 400.0],
            v: [0.0, 0.0],
            m: 10000.0,
            color: [255, 255, 0], // yellow
            anchor: true,
        },
        BodyConfig {
            x: [750.0, 400.0],
            v: [0.0, -25.0],
            m: 70.0,
            color: [100, 150, 255], // blue
            anchor: false,
        },
        BodyConfig {
            x: [450.0, 250.0],
            v: [15.0, 15.0],
            m: 30.0,
            color: [0, 255, 0], // green
            anchor: false,
        },
    ]
}
