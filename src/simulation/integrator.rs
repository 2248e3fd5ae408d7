//! Fixed-step advance for the sandbox system
//!
//! One step = pairwise force accumulation, per-body semi-implicit Euler
//! integration, then boundary culling of escaped non-anchor bodies

use super::engine::Engine;
use super::forces::ForceSet;
use super::params::Parameters;
use super::states::{NVec2, System};

/// Advance the system by one fixed time step
/// The force set fills a per-body buffer, each buffered total is routed
/// through the body's own force accumulator, every body integrates, and
/// culling compacts the collection afterwards so it is never mutated
/// during its own traversal
/// Entirely deterministic given the current state
pub fn sandbox_step(sys: &mut System, forces: &ForceSet, params: &Parameters, engine: &Engine) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    // f[i] holds the total force on body i at the current positions
    let mut f = vec![NVec2::zeros(); n];
    forces.accumulate_forces(sys.t, &*sys, &mut f);

    // Route the buffered totals through each body's pending-force
    // accumulator, which update_position consumes
    for (b, fi) in sys.bodies.iter_mut().zip(f.iter()) {
        b.add_force(*fi);
    }

    // Integrate every body with the freshly accumulated forces
    for b in sys.bodies.iter_mut() {
        b.update_position(params);
    }

    // Cull escapees; anchors are exempt
    sys.bodies.retain(|b| b.anchor || engine.in_cull_bounds(&b.x));

    // Increment the system time by one full step
    sys.t += params.h0;
}
