//! Core state types for the gravity sandbox.
//!
//! Defines the 2D body/system structs:
//! - `Body`   – position, velocity, accumulated force, mass, visual radius,
//!   color and a bounded trail of recent positions
//! - `System` – the live body collection and the current simulation time `t`
//!
//! All physics state uses `NVec2` (`nalgebra::Vector2<f64>`).

use std::collections::VecDeque;

use nalgebra::Vector2;

use crate::simulation::params::Parameters;

pub type NVec2 = Vector2<f64>;

/// Fixed RGB triple assigned to a body at creation
pub type Rgb = [u8; 3];

#[derive(Debug, Clone)]
pub struct Body {
    pub id: u64, // stable identity, assigned by the system on insertion
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub f: NVec2, // accumulated force, reset every step
    pub m: f64, // mass (never exactly zero)
    pub radius: f64, // visual radius derived from mass, always >= 3
    pub color: Rgb, // draw color, fixed at creation
    pub anchor: bool, // exempt from boundary culling
    pub trail: VecDeque<NVec2>, // recent positions, oldest dropped first
}

impl Body {
    /// Create a body with zero pending force and an empty trail.
    /// A mass of exactly zero is coerced to 1 so the integration step
    /// never divides by zero.
    pub fn new(x: NVec2, v: NVec2, m: f64, color: Rgb, anchor: bool) -> Self {
        let m = if m == 0.0 { 1.0 } else { m };
        Self {
            id: 0,
            x,
            v,
            f: NVec2::zeros(),
            m,
            radius: Self::radius_for_mass(m),
            color,
            anchor,
            trail: VecDeque::new(),
        }
    }

    /// Visual radius for a given mass: radius of the disc whose area equals
    /// the absolute mass, scaled by 2.5 and floored at 3 so tiny bodies stay
    /// visible. Deliberately independent of any particular body instance.
    pub fn radius_for_mass(m: f64) -> f64 {
        ((m.abs() / std::f64::consts::PI).sqrt() * 2.5).floor().max(3.0)
    }

    /// Accumulate an external force into the pending force for this step.
    pub fn add_force(&mut self, force: NVec2) {
        self.f += force;
    }

    /// Advance this body by one fixed step using semi-implicit Euler.
    ///
    /// Velocity is updated from the accumulated force first, clamped to
    /// `v_max` (direction preserved), and the position then advances with
    /// the *new* velocity. The pending force is consumed and reset, and the
    /// new position is appended to the bounded trail.
    pub fn update_position(&mut self, params: &Parameters) {
        if self.m == 0.0 { // cannot happen after the zero-mass coercion
            return;
        }

        // a = F / m, then v += a dt
        let acceleration = self.f / self.m;
        self.v += acceleration * params.h0;

        // Rescale to exactly v_max if the speed limit is exceeded
        if self.v.norm_squared() > params.v_max * params.v_max {
            self.v = self.v.normalize() * params.v_max;
        }

        // x += v dt
        self.x += self.v * params.h0;

        self.f = NVec2::zeros();

        // Record the new position, keeping only the trail_cap most recent
        self.trail.push_back(self.x);
        if self.trail.len() > params.trail_cap {
            self.trail.pop_front();
        }
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // live collection, vector order drives pairing
    pub t: f64, // time
    next_id: u64,
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

impl System {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            t: 0.0,
            next_id: 0,
        }
    }

    /// Insert a body, assigning it the next stable id. Returns the id.
    pub fn insert(&mut self, mut body: Body) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        body.id = id;
        self.bodies.push(body);
        id
    }

    /// Look up a live body by id.
    pub fn body(&self, id: u64) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Remove a body by id. Removing an id that is no longer live is a no-op.
    pub fn remove(&mut self, id: u64) {
        self.bodies.retain(|b| b.id != id);
    }

    /// Drop every body that is not an anchor. A system holding only anchors
    /// is left unchanged.
    pub fn clear_non_anchors(&mut self) {
        self.bodies.retain(|b| b.anchor);
    }

    /// Evict the longest-lived non-anchor body (lowest id). Returns false if
    /// every live body is an anchor.
    pub fn evict_oldest_non_anchor(&mut self) -> bool {
        let oldest = self
            .bodies
            .iter()
            .filter(|b| !b.anchor)
            .map(|b| b.id)
            .min();
        match oldest {
            Some(id) => {
                self.remove(id);
                true
            }
            None => false,
        }
    }
}
