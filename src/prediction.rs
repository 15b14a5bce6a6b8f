//! Trajectory prediction for ships.
//!
//! Each frame, every ship's forward path is re-predicted from its current
//! state with fixed-step Velocity Verlet. The result is stored on the ship
//! for renderers and guidance; live physics state is never touched.

use bevy::prelude::*;

use crate::physics::{predict_trajectory, GravityField, PredictedPath, Ship};
use crate::sources::{snapshot_sources, GravityBody};
use crate::types::{BodyState, COLLISION_MARGIN};

/// Plugin providing trajectory prediction functionality.
pub struct PredictionPlugin;

impl Plugin for PredictionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GravityField>()
            .init_resource::<PredictionSettings>()
            .add_systems(Update, predict_ship_paths);
    }
}

/// Configuration for trajectory prediction.
#[derive(Resource, Clone, Debug)]
pub struct PredictionSettings {
    /// How far ahead to predict (simulation seconds).
    pub horizon_seconds: f64,
    /// Number of integration steps over the horizon.
    pub step_count: usize,
    /// Collision zone multiplier on source radii.
    pub collision_margin: f64,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            horizon_seconds: 30.0,
            step_count: 600,
            collision_margin: COLLISION_MARGIN,
        }
    }
}

/// The predicted path of a ship, refreshed every frame.
#[derive(Component, Clone, Debug, Default)]
pub struct TrajectoryPath(pub PredictedPath);

impl TrajectoryPath {
    pub fn points(&self) -> &[bevy::math::DVec2] {
        &self.0.points
    }
}

/// Re-predict every ship's path.
pub fn predict_ship_paths(
    mut ships: Query<(Entity, &BodyState, &mut TrajectoryPath), With<Ship>>,
    bodies: Query<&GravityBody>,
    field: Res<GravityField>,
    settings: Res<PredictionSettings>,
) {
    let sources = snapshot_sources(bodies.iter());

    for (entity, body, mut path) in ships.iter_mut() {
        let predicted = predict_trajectory(
            &field,
            body.pos,
            body.vel,
            &sources,
            settings.horizon_seconds,
            settings.step_count,
            settings.collision_margin,
        );

        if predicted.impact.is_some() && path.0.impact != predicted.impact {
            let eta = settings.horizon_seconds * (predicted.points.len() - 1) as f64
                / settings.step_count.max(1) as f64;
            warn!(
                "Ship {} predicted to hit source {:?} in {:.1}s",
                entity, predicted.impact, eta
            );
        }

        path.0 = predicted;
    }
}
