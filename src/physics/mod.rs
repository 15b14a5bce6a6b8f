//! Physics simulation for the ship.
//!
//! Gravity and integration run in Bevy's FixedUpdate schedule to keep
//! consistent physics timesteps. The engine only supplies the gravity
//! impulse; [`advance_ships`] stands in for the host physics engine that
//! owns the body's movement.

mod gravity;
mod integrator;

#[cfg(test)]
mod proptest_physics;

use bevy::math::DVec2;
use bevy::prelude::*;

pub use gravity::{find_collision, GravityField};
pub use integrator::{
    gravity_impulse, predict_path, predict_trajectory, PredictedPath, VerletState,
};

use crate::sources::{snapshot_sources, GravityBody};
use crate::types::{BodyState, SimulationTime};

/// Marker for the single simulated body.
#[derive(Component, Clone, Copy, Debug, Default)]
#[require(GravityImpulse)]
pub struct Ship;

/// Gravity impulse computed for a ship on the latest physics tick.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct GravityImpulse(pub DVec2);

/// System set for ordering physics systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhysicsSet {
    /// Gravity impulse accumulation
    Gravity,
    /// Body movement
    Integrate,
}

/// Plugin providing physics simulation for ships.
///
/// Adds systems for:
/// - Gravity impulse computation in FixedUpdate
/// - Semi-implicit Euler body advancement after it
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GravityField>()
            .configure_sets(
                FixedUpdate,
                (PhysicsSet::Gravity, PhysicsSet::Integrate).chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    apply_gravity.in_set(PhysicsSet::Gravity),
                    advance_ships.in_set(PhysicsSet::Integrate),
                ),
            );
    }
}

/// Simulation step for this tick, or `None` when nothing should move.
fn tick_dt(sim_time: &SimulationTime, time: &Time) -> Option<f64> {
    if sim_time.paused {
        return None;
    }
    let dt = time.delta_secs_f64() * sim_time.scale;
    (dt > 0.0).then_some(dt)
}

/// Compute the gravity impulse on every ship from the current sources.
pub fn apply_gravity(
    mut ships: Query<(&BodyState, &mut GravityImpulse), With<Ship>>,
    bodies: Query<&GravityBody>,
    field: Res<GravityField>,
    sim_time: Res<SimulationTime>,
    time: Res<Time>,
) {
    let Some(dt) = tick_dt(&sim_time, &time) else {
        for (_, mut impulse) in ships.iter_mut() {
            impulse.0 = DVec2::ZERO;
        }
        return;
    };

    let sources = snapshot_sources(bodies.iter());

    for (body, mut impulse) in ships.iter_mut() {
        impulse.0 = gravity_impulse(&field, body.pos, body.mass, dt, &sources);
    }
}

/// Apply the tick's impulse and move each ship (semi-implicit Euler).
pub fn advance_ships(
    mut ships: Query<(&mut BodyState, &GravityImpulse), With<Ship>>,
    sim_time: Res<SimulationTime>,
    time: Res<Time>,
) {
    let Some(dt) = tick_dt(&sim_time, &time) else {
        return;
    };

    for (mut body, impulse) in ships.iter_mut() {
        if body.mass <= 0.0 {
            warn_once!("Ship with non-positive mass ignores gravity impulses");
        } else {
            let dv = impulse.0 / body.mass;
            body.vel += dv;
        }
        let vel = body.vel;
        body.pos += vel * dt;
    }
}
