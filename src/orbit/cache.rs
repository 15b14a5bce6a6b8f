//! Throttled orbit analysis.
//!
//! Orbit classification runs far less often than the physics tick. The
//! cache keeps the last result plus the state it was computed from and only
//! asks for a recompute when enough time passed or the body moved enough.

use bevy::math::DVec2;
use bevy::prelude::*;

use super::analyzer::{OrbitAnalyzer, OrbitalElements};
use crate::sources::GravitySource;
use crate::types::{
    MAX_ANALYSIS_INTERVAL, MIN_ANALYSIS_INTERVAL, POSITION_CHANGE_THRESHOLD,
    VELOCITY_CHANGE_THRESHOLD,
};

/// Rate limits for re-analysis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CacheConfig {
    /// Never recompute more often than this (seconds). Default: 0.1.
    pub min_interval: f64,
    /// Always recompute after this long (seconds). Default: 1.0.
    pub max_interval: f64,
    /// Position change that triggers a recompute. Default: 5.0.
    pub position_threshold: f64,
    /// Velocity change that triggers a recompute. Default: 1.0.
    pub velocity_threshold: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            min_interval: MIN_ANALYSIS_INTERVAL,
            max_interval: MAX_ANALYSIS_INTERVAL,
            position_threshold: POSITION_CHANGE_THRESHOLD,
            velocity_threshold: VELOCITY_CHANGE_THRESHOLD,
        }
    }
}

/// Body state at the time of the last analysis.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Snapshot {
    pos: DVec2,
    vel: DVec2,
    time: f64,
}

/// Per-body cache of the latest orbital analysis.
///
/// Owned by the caller (one per simulated body), so independent
/// simulations never share analysis state.
#[derive(Component, Clone, Debug, Default)]
pub struct AnalysisCache {
    config: CacheConfig,
    elements: OrbitalElements,
    snapshot: Option<Snapshot>,
}

impl AnalysisCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Whether the analysis should be recomputed for the given state.
    ///
    /// - no previous analysis (or time went backwards): true
    /// - elapsed > `max_interval`: true
    /// - elapsed < `min_interval`: false
    /// - otherwise: true iff position or velocity moved past its threshold
    pub fn should_recompute(&self, position: DVec2, velocity: DVec2, time: f64) -> bool {
        let Some(last) = self.snapshot else {
            return true;
        };

        let elapsed = time - last.time;
        if !(elapsed >= 0.0) {
            return true;
        }
        if elapsed > self.config.max_interval {
            return true;
        }
        if elapsed < self.config.min_interval {
            return false;
        }

        (position - last.pos).length() > self.config.position_threshold
            || (velocity - last.vel).length() > self.config.velocity_threshold
    }

    /// Re-run the analysis if [`should_recompute`](Self::should_recompute)
    /// says so. Returns true when a new analysis was stored.
    pub fn update(
        &mut self,
        analyzer: &OrbitAnalyzer,
        position: DVec2,
        velocity: DVec2,
        sources: &[GravitySource],
        time: f64,
    ) -> bool {
        if !self.should_recompute(position, velocity, time) {
            return false;
        }

        self.elements = analyzer.analyze(position, velocity, sources);
        self.snapshot = Some(Snapshot {
            pos: position,
            vel: velocity,
            time,
        });
        debug!(
            "Orbit analysis at t={:.2}: {} (e={:.4})",
            time, self.elements.state, self.elements.eccentricity
        );
        true
    }

    /// The cached analysis, without recomputing.
    pub fn get(&self) -> &OrbitalElements {
        &self.elements
    }

    /// Force the next query to recompute.
    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    /// Simulation time of the cached analysis.
    pub fn last_computed_at(&self) -> Option<f64> {
        self.snapshot.map(|s| s.time)
    }
}
