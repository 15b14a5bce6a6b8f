//! Orbitcore - Orbital Mechanics Simulation Core
//!
//! Gravity, velocity-Verlet trajectory prediction and two-body orbit
//! classification for a single ship among stationary gravity sources,
//! wired into Bevy as a set of plugins.

pub mod orbit;
pub mod physics;
pub mod prediction;
pub mod scenarios;
pub mod sources;
pub mod time;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use bevy::app::{PluginGroup, PluginGroupBuilder};

/// All simulation plugins: time, physics, analysis, prediction, scenarios.
pub struct OrbitCorePlugins;

impl PluginGroup for OrbitCorePlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(time::TimePlugin)
            .add(physics::PhysicsPlugin)
            .add(orbit::AnalysisPlugin)
            .add(prediction::PredictionPlugin)
            .add(scenarios::ScenarioPlugin)
    }
}
