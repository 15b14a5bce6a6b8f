//! Numerical integration for the simulated ship.
//!
//! Two modes share the same gravity field:
//! - impulse mode, feeding the live physics tick, which owns the body;
//! - prediction mode, a fixed-step Velocity Verlet (2nd order symplectic)
//!   propagation that never touches live state.

use bevy::math::DVec2;

use super::gravity::{find_collision, GravityField};
use crate::sources::{GravitySource, SourceId};
use crate::types::COLLISION_MARGIN;

/// Gravity impulse for one live physics tick.
///
/// `acceleration * mass * dt`, to be applied by the external physics engine
/// as an external force. Non-positive `dt` gives zero.
#[inline]
pub fn gravity_impulse(
    field: &GravityField,
    position: DVec2,
    mass: f64,
    dt: f64,
    sources: &[GravitySource],
) -> DVec2 {
    if dt <= 0.0 {
        return DVec2::ZERO;
    }
    field.acceleration_at(position, sources) * (mass * dt)
}

/// State carried between Verlet steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerletState {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Acceleration at `pos`, reused as a₀ of the next step.
    pub acc: DVec2,
}

impl VerletState {
    /// Start from a position and velocity, evaluating the initial acceleration.
    pub fn new(field: &GravityField, pos: DVec2, vel: DVec2, sources: &[GravitySource]) -> Self {
        Self {
            pos,
            vel,
            acc: field.acceleration_at(pos, sources),
        }
    }

    /// Advance one Velocity Verlet step of length `dt`.
    pub fn step(&mut self, field: &GravityField, sources: &[GravitySource], dt: f64) {
        // 1. x_new = x + v*dt + 0.5*a*dt²
        let pos_new = self.pos + self.vel * dt + self.acc * (0.5 * dt * dt);

        // 2. a_new = acceleration(x_new)
        let acc_new = field.acceleration_at(pos_new, sources);

        // 3. v_new = v + 0.5*(a + a_new)*dt
        let vel_new = self.vel + (self.acc + acc_new) * (0.5 * dt);

        self.pos = pos_new;
        self.vel = vel_new;
        self.acc = acc_new;
    }
}

/// A predicted forward path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredictedPath {
    /// Positions, starting with the initial position.
    pub points: Vec<DVec2>,
    /// Source the path runs into, if prediction stopped early.
    pub impact: Option<SourceId>,
}

impl PredictedPath {
    /// Whether the path ends inside a source's collision zone.
    pub fn ends_in_collision(&self) -> bool {
        self.impact.is_some()
    }
}

/// Predict the forward trajectory using fixed-step Velocity Verlet.
///
/// `dt = horizon_seconds / step_count`. The returned points start with
/// `position` and hold one point per completed step. Prediction stops after
/// the first point within `radius * collision_margin` of any source; that
/// point is included. A non-positive horizon or zero step count yields only
/// the starting point.
pub fn predict_trajectory(
    field: &GravityField,
    position: DVec2,
    velocity: DVec2,
    sources: &[GravitySource],
    horizon_seconds: f64,
    step_count: usize,
    collision_margin: f64,
) -> PredictedPath {
    let mut path = PredictedPath {
        points: vec![position],
        impact: None,
    };

    if !(horizon_seconds > 0.0) || step_count == 0 {
        return path;
    }

    let dt = horizon_seconds / step_count as f64;
    path.points.reserve(step_count);

    let mut state = VerletState::new(field, position, velocity, sources);

    for _ in 0..step_count {
        state.step(field, sources, dt);
        path.points.push(state.pos);

        if let Some(index) = find_collision(state.pos, sources, collision_margin) {
            path.impact = Some(sources[index].id());
            break;
        }
    }

    path
}

/// Predict a path of positions with the default collision margin.
///
/// See [`predict_trajectory`] for the stepping rules.
pub fn predict_path(
    field: &GravityField,
    position: DVec2,
    velocity: DVec2,
    sources: &[GravitySource],
    horizon_seconds: f64,
    step_count: usize,
) -> Vec<DVec2> {
    predict_trajectory(
        field,
        position,
        velocity,
        sources,
        horizon_seconds,
        step_count,
        COLLISION_MARGIN,
    )
    .points
}

// =============================================================================
// Tests
// =============================================================================
