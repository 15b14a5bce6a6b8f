//! Time advancement system for the orbital simulation.
//!
//! Handles progression of simulation time based on scale and pause state.

use bevy::prelude::*;

use crate::physics::PhysicsSet;
use crate::types::SimulationTime;

/// Plugin providing time advancement functionality.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationTime>()
            .add_systems(FixedUpdate, advance_time.before(PhysicsSet::Gravity));
    }
}

/// Advance simulation time by the fixed tick, scaled.
pub fn advance_time(mut sim_time: ResMut<SimulationTime>, time: Res<Time>) {
    if sim_time.paused {
        return;
    }

    let dt = time.delta_secs_f64() * sim_time.scale;
    sim_time.current += dt;
}
