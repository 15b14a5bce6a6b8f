//! Gravity calculation for the simulated ship.
//!
//! Computes net Newtonian acceleration from a transient list of gravity
//! sources, with a distance floor to keep forces bounded near centers.

use bevy::math::DVec2;
use bevy::prelude::Resource;

use crate::sources::GravitySource;
use crate::types::{G, MIN_DISTANCE};

/// Gravity field configuration.
#[derive(Resource, Clone, Copy, Debug)]
pub struct GravityField {
    /// Gravitational constant scale. Default: [`G`].
    pub gravitational_constant: f64,
    /// Distance floor for the inverse-square law. Default: [`MIN_DISTANCE`].
    pub min_distance: f64,
}

impl Default for GravityField {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            min_distance: MIN_DISTANCE,
        }
    }
}

impl GravityField {
    /// Compute gravitational acceleration at a point.
    ///
    /// Each source pulls toward its position with magnitude
    /// `G * mass / max(distance, min_distance)²`. Sources without a finite
    /// position are skipped.
    #[inline]
    pub fn acceleration_at(&self, point: DVec2, sources: &[GravitySource]) -> DVec2 {
        let mut acc = DVec2::ZERO;

        for source in sources {
            if !source.has_valid_position() {
                continue;
            }
            let delta = source.position() - point;
            let r = delta.length();
            if r == 0.0 {
                // Direction undefined at the exact center.
                continue;
            }
            let d = r.max(self.min_distance);
            // delta/r gives the unit vector
            acc += delta * (source.gm(self.gravitational_constant) / (d * d * r));
        }

        acc
    }
}

/// Index of the first source whose collision zone contains `point`.
///
/// The zone is `radius * margin` around each source.
#[inline]
pub fn find_collision(point: DVec2, sources: &[GravitySource], margin: f64) -> Option<usize> {
    sources.iter().position(|source| {
        source.has_valid_position()
            && (source.position() - point).length() < source.radius() * margin
    })
}
