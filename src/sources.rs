//! Gravity sources: the massive bodies the simulated ship falls toward.
//!
//! Sources are owned by the scene. The engine only ever sees a transient
//! slice of [`GravitySource`] snapshots per call and never mutates them.

use bevy::math::DVec2;
use bevy::prelude::*;

/// Stable identity of a gravity source within a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u32);

/// Errors raised when a gravity source is constructed from bad data.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    #[error("source {id:?} has non-positive or non-finite mass {mass}")]
    NonPositiveMass { id: SourceId, mass: f64 },

    #[error("source {id:?} has negative or non-finite radius {radius}")]
    NegativeRadius { id: SourceId, radius: f64 },

    #[error("source {id:?} has non-finite position ({x}, {y})")]
    NonFinitePosition { id: SourceId, x: f64, y: f64 },
}

/// A massive body that attracts the simulated ship.
///
/// Mass and radius are validated once at construction. Position may be
/// moved by the scene through [`GravitySource::set_position`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravitySource {
    id: SourceId,
    position: DVec2,
    mass: f64,
    radius: f64,
}

impl GravitySource {
    /// Create a validated gravity source.
    ///
    /// Mass must be finite and > 0, radius finite and >= 0, and the initial
    /// position finite.
    pub fn new(id: SourceId, position: DVec2, mass: f64, radius: f64) -> Result<Self, SourceError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SourceError::NonPositiveMass { id, mass });
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(SourceError::NegativeRadius { id, radius });
        }
        if !position.is_finite() {
            return Err(SourceError::NonFinitePosition {
                id,
                x: position.x,
                y: position.y,
            });
        }
        Ok(Self {
            id,
            position,
            mass,
            radius,
        })
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Move the source. The scene may do this between ticks; a non-finite
    /// position makes the engine skip the source until it is fixed.
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    /// Whether the source currently has a usable position.
    #[inline]
    pub fn has_valid_position(&self) -> bool {
        self.position.is_finite()
    }

    /// Standard gravitational parameter μ = G·M for a given G.
    #[inline]
    pub fn gm(&self, gravitational_constant: f64) -> f64 {
        gravitational_constant * self.mass
    }
}

/// Scene component marking an entity as a gravity source.
#[derive(Component, Clone, Copy, Debug)]
pub struct GravityBody(pub GravitySource);

/// Snapshot the scene's gravity bodies into a transient source list.
///
/// Ordered by [`SourceId`] so that primary-body ties resolve the same way
/// regardless of entity iteration order.
pub fn snapshot_sources<'a>(bodies: impl IntoIterator<Item = &'a GravityBody>) -> Vec<GravitySource> {
    let mut sources: Vec<GravitySource> = bodies.into_iter().map(|b| b.0).collect();
    sources.sort_by_key(GravitySource::id);
    sources
}
