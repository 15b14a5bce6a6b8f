//! Test utilities for orbital simulation tests.
//!
//! Provides fixtures for creating test orbits around a single planet and
//! assertions for verifying physical invariants like energy conservation.

use bevy::math::DVec2;

use crate::sources::{GravitySource, SourceId};
use crate::types::{BodyState, G};

/// Mass of the reference planet.
pub const PLANET_MASS: f64 = 900.0;
/// Radius of the reference planet.
pub const PLANET_RADIUS: f64 = 50.0;

/// Fixtures for creating test orbital states.
pub mod fixtures {
    use super::*;

    /// The reference planet at the origin.
    pub fn planet() -> GravitySource {
        planet_at(SourceId(0), DVec2::ZERO, PLANET_MASS, PLANET_RADIUS)
    }

    pub fn planet_at(id: SourceId, pos: DVec2, mass: f64, radius: f64) -> GravitySource {
        GravitySource::new(id, pos, mass, radius).expect("fixture source is valid")
    }

    /// A body in a circular orbit at `distance` from the reference planet.
    ///
    /// Placed on the negative x-axis with velocity in the +y direction.
    pub fn circular_orbit(distance: f64) -> BodyState {
        let v = (G * PLANET_MASS / distance).sqrt();
        BodyState::new(DVec2::new(-distance, 0.0), DVec2::new(0.0, v), 1.0)
    }

    /// A body at periapsis of an ellipse with the given eccentricity.
    pub fn elliptical_orbit(periapsis: f64, eccentricity: f64) -> BodyState {
        assert!(
            (0.0..1.0).contains(&eccentricity),
            "Eccentricity must be in [0, 1) for elliptical orbit"
        );
        let a = periapsis / (1.0 - eccentricity);
        // Vis-viva at periapsis: v = sqrt(GM * (2/r - 1/a))
        let v = (G * PLANET_MASS * (2.0 / periapsis - 1.0 / a)).sqrt();
        BodyState::new(DVec2::new(-periapsis, 0.0), DVec2::new(0.0, v), 1.0)
    }
}

/// Assertions for verifying physical invariants.
pub mod assertions {
    use super::*;

    /// Specific orbital energy around the reference planet at the origin.
    pub fn orbital_energy(pos: DVec2, vel: DVec2) -> f64 {
        0.5 * vel.length_squared() - G * PLANET_MASS / pos.length()
    }

    /// Specific angular momentum (2D scalar).
    pub fn angular_momentum(pos: DVec2, vel: DVec2) -> f64 {
        pos.perp_dot(vel)
    }

    /// Kepler's third law around the reference planet.
    pub fn orbital_period(semi_major_axis: f64) -> f64 {
        std::f64::consts::TAU * (semi_major_axis.powi(3) / (G * PLANET_MASS)).sqrt()
    }

    /// Assert that energy is conserved within a relative tolerance.
    pub fn assert_energy_conserved(initial_energy: f64, final_energy: f64, tolerance: f64) {
        let drift = ((final_energy - initial_energy) / initial_energy).abs();
        assert!(
            drift <= tolerance,
            "Energy not conserved: initial={initial_energy:.6e}, final={final_energy:.6e}, drift={drift:.6e}, tolerance={tolerance:.6e}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circular_orbit_has_correct_velocity() {
        let state = fixtures::circular_orbit(200.0);
        assert_relative_eq!(state.vel.length(), 4500.0f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_elliptical_orbit_energy() {
        let state = fixtures::elliptical_orbit(200.0, 0.5);
        let energy = assertions::orbital_energy(state.pos, state.vel);
        // E = -GM / 2a with a = 400
        assert_relative_eq!(energy, -G * PLANET_MASS / 800.0, max_relative = 1e-12);
    }
}
