//! Interactive frame state for the sandbox
//!
//! `SimController` gathers what used to be free-floating loop flags into one
//! explicit struct passed through the frame: pause, help visibility, the
//! pending spawn mass, and the slingshot gesture machine

use bevy::prelude::Resource;

use crate::simulation::params::SpawnRules;
use crate::simulation::states::NVec2;

/// Two-state slingshot gesture machine.
///
/// `Idle -> Aiming` on primary pointer press (the press position becomes the
/// gesture start), `Aiming -> Idle` on release. While aiming, pointer motion
/// only moves the tracked `current` point used by the visual preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slingshot {
    Idle,
    Aiming { start: NVec2, current: NVec2 },
}

impl Slingshot {
    /// Primary press: begin aiming at `p`. Ignored while already aiming.
    pub fn press(&mut self, p: NVec2) {
        if matches!(self, Slingshot::Idle) {
            *self = Slingshot::Aiming { start: p, current: p };
        }
    }

    /// Pointer motion: track the preview point. Ignored while idle.
    pub fn drag(&mut self, p: NVec2) {
        if let Slingshot::Aiming { current, .. } = self {
            *current = p;
        }
    }

    /// Primary release at `p`: leave the aiming state and yield the launch
    /// position and velocity. The drag is inverted, slingshot style: pulling
    /// away from the intended direction launches toward it.
    pub fn release(&mut self, p: NVec2, scale: f64) -> Option<(NVec2, NVec2)> {
        match *self {
            Slingshot::Aiming { start, .. } => {
                *self = Slingshot::Idle;
                Some((start, (start - p) * scale))
            }
            Slingshot::Idle => None,
        }
    }

    /// Abandon an in-progress gesture (reset, clear, cursor left the window).
    pub fn cancel(&mut self) {
        *self = Slingshot::Idle;
    }

    pub fn is_aiming(&self) -> bool {
        matches!(self, Slingshot::Aiming { .. })
    }
}

/// Per-session interactive state, inserted into Bevy as a `Resource`
#[derive(Resource, Debug, Clone)]
pub struct SimController {
    pub paused: bool,
    pub show_help: bool,
    pub slingshot: Slingshot,
    pub spawn_mass: f64, // mass of the next launched body
}

impl SimController {
    pub fn new(rules: &SpawnRules) -> Self {
        Self {
            paused: false,
            show_help: true,
            slingshot: Slingshot::Idle,
            spawn_mass: rules.mass_start,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Step the pending spawn mass up, clamped to the configured bounds.
    pub fn raise_mass(&mut self, rules: &SpawnRules) {
        self.spawn_mass = (self.spawn_mass + rules.mass_step).min(rules.mass_max);
    }

    /// Step the pending spawn mass down, clamped to the configured bounds.
    pub fn lower_mass(&mut self, rules: &SpawnRules) {
        self.spawn_mass = (self.spawn_mass - rules.mass_step).max(rules.mass_min);
    }
}
