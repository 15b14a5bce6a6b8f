//! Core physics types and constants for the orbital simulation.
//!
//! All quantities are in game units: distances in world units, time in
//! simulation seconds, masses in arbitrary mass units scaled by [`G`].

use bevy::math::DVec2;
use bevy::prelude::*;

/// Gravitational constant scale (game units).
pub const G: f64 = 1000.0;

/// Singularity floor for distances in the gravity field and analyzer.
///
/// On the order of the smallest source radius so a body passing through a
/// source's center sees a bounded acceleration.
pub const MIN_DISTANCE: f64 = 10.0;

/// Predicted paths stop when they come within `radius * COLLISION_MARGIN`
/// of a source.
pub const COLLISION_MARGIN: f64 = 1.1;

/// Periapsis below `radius * CRASH_MULTIPLIER` means the orbit will impact.
pub const CRASH_MULTIPLIER: f64 = 1.2;

/// Eccentricity below which a bound orbit counts as near-circular.
pub const STABLE_THRESHOLD: f64 = 0.1;

/// Eccentricity below which a bound orbit may count as a safe ellipse.
pub const ELLIPTICAL_THRESHOLD: f64 = 0.9;

/// A near-circular orbit must currently sit above `radius * STABLE_DISTANCE_MULTIPLIER`.
pub const STABLE_DISTANCE_MULTIPLIER: f64 = 1.5;

/// An elliptical orbit's periapsis must clear `radius * SAFE_PERIAPSIS_MULTIPLIER`.
pub const SAFE_PERIAPSIS_MULTIPLIER: f64 = 1.5;

/// Minimum simulation time between two orbit analyses (seconds).
pub const MIN_ANALYSIS_INTERVAL: f64 = 0.1;

/// Maximum simulation time an analysis may stay cached (seconds).
pub const MAX_ANALYSIS_INTERVAL: f64 = 1.0;

/// Position change that triggers re-analysis (world units).
pub const POSITION_CHANGE_THRESHOLD: f64 = 5.0;

/// Velocity change that triggers re-analysis (world units per second).
pub const VELOCITY_CHANGE_THRESHOLD: f64 = 1.0;

/// Physical state of the simulated body.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyState {
    /// Position in world units.
    pub pos: DVec2,
    /// Velocity in world units per second.
    pub vel: DVec2,
    /// Mass, used only to turn accelerations into impulses.
    pub mass: f64,
}

impl BodyState {
    /// Create a new body state
    pub fn new(pos: DVec2, vel: DVec2, mass: f64) -> Self {
        Self { pos, vel, mass }
    }

    /// Speed (magnitude of velocity).
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}

/// Simulation time resource tracking the current simulation state.
#[derive(Resource, Clone, Debug)]
pub struct SimulationTime {
    /// Elapsed simulation seconds
    pub current: f64,
    /// Time scale multiplier (1.0 = real time)
    pub scale: f64,
    /// Whether simulation is paused
    pub paused: bool,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self {
            current: 0.0,
            scale: 1.0,
            paused: false,
        }
    }
}

impl SimulationTime {
    /// Rewind to the start of the simulation and resume.
    pub fn reset(&mut self) {
        self.current = 0.0;
        self.paused = false;
    }
}
