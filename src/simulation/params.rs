//! Numerical and physical parameters for the sandbox
//!
//! `Parameters` holds the runtime tunables of the physics step:
//! - integration step size,
//! - gravitational constant and close-range force floor (`g`, `min_distance`),
//! - velocity clamp and trail length cap,
//! - slingshot drag-to-velocity factor
//!
//! `SpawnRules` holds the user-spawn tunables (mass bounds and the body cap).

#[derive(Debug, Clone)]
pub struct Parameters {
    pub h0: f64, // fixed integration step size
    pub g: f64, // gravitational constant (scaled for the sandbox)
    pub min_distance: f64, // separation below which force magnitude is capped
    pub v_max: f64, // velocity magnitude clamp
    pub slingshot_scale: f64, // drag vector to launch velocity factor
    pub trail_cap: usize, // max retained trail positions per body
}

#[derive(Debug, Clone)]
pub struct SpawnRules {
    pub mass_min: f64, // lower bound for the pending spawn mass
    pub mass_max: f64, // upper bound for the pending spawn mass
    pub mass_step: f64, // increment applied per +/- key press
    pub mass_start: f64, // pending mass at startup and after reset
    pub max_bodies: usize, // live body cap, oldest non-anchor evicted beyond it
}
