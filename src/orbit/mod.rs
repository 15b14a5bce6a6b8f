//! Orbit analysis for the ship.
//!
//! Derives two-body orbital elements from the ship's state relative to its
//! primary body, classifies the regime, and throttles how often that runs.

mod analyzer;
mod cache;

#[cfg(test)]
mod proptest_orbit;

use bevy::prelude::*;

pub use analyzer::{
    eccentricity_vector, eccentricity_vector_from_angular_momentum, ClassificationThresholds,
    OrbitAnalyzer, OrbitalElements, OrbitalState,
};
pub use cache::{AnalysisCache, CacheConfig};

use crate::physics::Ship;
use crate::sources::{snapshot_sources, GravityBody};
use crate::types::{BodyState, SimulationTime};

/// Sent when a ship's orbital regime changes.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct OrbitStateChanged {
    pub ship: Entity,
    pub from: OrbitalState,
    pub to: OrbitalState,
    /// Simulation time of the analysis that saw the change.
    pub time: f64,
}

/// Plugin providing throttled orbit analysis for ships.
pub struct AnalysisPlugin;

impl Plugin for AnalysisPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitAnalyzer>()
            .add_message::<OrbitStateChanged>()
            .add_systems(Update, update_orbit_analysis);
    }
}

/// Refresh each ship's analysis cache and report regime changes.
pub fn update_orbit_analysis(
    mut ships: Query<(Entity, &BodyState, &mut AnalysisCache), With<Ship>>,
    bodies: Query<&GravityBody>,
    analyzer: Res<OrbitAnalyzer>,
    sim_time: Res<SimulationTime>,
    mut changes: MessageWriter<OrbitStateChanged>,
) {
    let sources = snapshot_sources(bodies.iter());

    for (entity, body, mut cache) in ships.iter_mut() {
        let previous = cache.get().state;

        if !cache.update(&analyzer, body.pos, body.vel, &sources, sim_time.current) {
            continue;
        }

        let elements = cache.get();
        if elements.state == OrbitalState::Unknown && !sources.is_empty() {
            warn!("Orbit analysis for {entity} degraded to unknown");
        }

        if elements.state == previous {
            continue;
        }

        info!(
            "Ship {} orbit: {} -> {} (e={:.3}, E={:.2})",
            entity, previous, elements.state, elements.eccentricity, elements.specific_energy
        );
        changes.write(OrbitStateChanged {
            ship: entity,
            from: previous,
            to: elements.state,
            time: sim_time.current,
        });
    }
}
