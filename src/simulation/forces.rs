//! Force contributors for the sandbox
//!
//! Defines the 2D force trait, the pure pairwise gravity function, and the
//! direct O(n^2) summation term that drives the sandbox

use crate::simulation::states::{Body, NVec2, System};

/// Collection of 2D force terms (gravity, drag, etc.)
/// Each term implements [`Force`] and their contributions are summed
/// into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total forces at time `t` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(&self, t: f64, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        // Iterate over all force contributors
        for term in &self.terms {
            term.accumulate(t, sys, out);
        }
    }
}

/// Trait for 2D force sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Force {
    fn accumulate(&self, t: f64, sys: &System, out: &mut [NVec2]);
}

/// Gravitational force exerted on `b1` by `b2`.
///
/// Returns the force on the *first* body; the equal and opposite force on
/// the second is the exact negation and must be applied by the caller, never
/// recomputed.
///
/// Close-range handling, from the inside out:
/// - exactly coincident bodies have no defined direction, force is zero
/// - closer than half the summed radii (and under `min_distance`), the pair
///   is treated as overlapping and the force is dropped entirely
/// - otherwise, under `min_distance` the squared separation is clamped up to
///   `min_distance^2`, capping the magnitude instead of letting it diverge
pub fn gravity_pair_force(b1: &Body, b2: &Body, g: f64, min_distance: f64) -> NVec2 {
    // d points from body 1 to body 2, so the returned pull on body 1
    // acts along +d
    let d = b2.x - b1.x;
    let mut d2 = d.norm_squared();

    if d2 == 0.0 {
        return NVec2::zeros();
    }

    if d2 < min_distance * min_distance {
        let contact = 0.5 * (b1.radius + b2.radius);
        if d2 < contact * contact {
            // effectively overlapping, no force
            return NVec2::zeros();
        }
        // cap the magnitude for the close-range band
        d2 = min_distance * min_distance;
    }

    // F = G m1 m2 / d^2, along the unit separation vector
    let magnitude = g * b1.m * b2.m / d2;
    d.normalize() * magnitude
}

/// Direct pairwise Newtonian gravity with a close-range force cap
/// Sums every unordered pair once and applies Newton's third law to the
/// second body of each pair
pub struct PairwiseGravity {
    pub g: f64, // gravitational constant
    pub min_distance: f64, // force-cap separation floor
}

impl Force for PairwiseGravity {
    fn accumulate(&self, _t: f64, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();
        if n == 0 { // No bodies, return
            return;
        }

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            for j in (i + 1)..n {
                // Force on body i from body j, computed once per pair
                let f = gravity_pair_force(
                    &sys.bodies[i],
                    &sys.bodies[j],
                    self.g,
                    self.min_distance,
                );

                // Newton's third law: equal and opposite
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}
