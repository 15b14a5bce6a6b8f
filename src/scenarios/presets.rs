//! Preset scenario definitions.
//!
//! All presets share the reference planet: mass 900, radius 50, at the
//! origin, with the ship starting 200 units to its left.

use bevy::math::DVec2;

use super::{Scenario, ShipStart, SourceSpec};

/// All available preset scenarios.
pub static SCENARIOS: &[Scenario] = &[
    CIRCULAR_ORBIT,
    ELLIPTICAL_ORBIT,
    DECAYING_ORBIT,
    ESCAPE_BURN,
    BINARY_WELL,
];

const PLANET: SourceSpec = SourceSpec {
    id: 0,
    pos: DVec2::ZERO,
    mass: 900.0,
    radius: 50.0,
};

/// Scenario 1: Circular Orbit (Default)
///
/// Ship inserted at the exact circular speed. Eccentricity stays near zero
/// and the orbit closes in about 18.7 seconds.
pub static CIRCULAR_ORBIT: Scenario = Scenario {
    id: "circular_orbit",
    name: "Circular Orbit",
    description: "Ship in a stable circular orbit at 200 units.",
    sources: &[PLANET],
    ship: ShipStart::CircularOrbit {
        primary: 0,
        radius: 200.0,
        speed_factor: 1.0,
    },
    ship_mass: 1.0,
    time_scale: 1.0,
};

/// Scenario 2: Elliptical Orbit
///
/// 1.2x circular speed at periapsis gives e = 0.44 with a safe periapsis.
pub static ELLIPTICAL_ORBIT: Scenario = Scenario {
    id: "elliptical_orbit",
    name: "Elliptical Orbit",
    description: "Ship too fast for a circle: a safe, elongated ellipse.",
    sources: &[PLANET],
    ship: ShipStart::CircularOrbit {
        primary: 0,
        radius: 200.0,
        speed_factor: 1.2,
    },
    ship_mass: 1.0,
    time_scale: 1.0,
};

/// Scenario 3: Decaying Orbit
///
/// 0.3x circular speed: the periapsis is inside the planet.
pub static DECAYING_ORBIT: Scenario = Scenario {
    id: "decaying_orbit",
    name: "Decaying Orbit",
    description: "Ship far too slow: the orbit intersects the planet.",
    sources: &[PLANET],
    ship: ShipStart::CircularOrbit {
        primary: 0,
        radius: 200.0,
        speed_factor: 0.3,
    },
    ship_mass: 1.0,
    time_scale: 1.0,
};

/// Scenario 4: Escape Burn
///
/// 1.5x circular speed exceeds escape speed (√2 x): unbound trajectory.
pub static ESCAPE_BURN: Scenario = Scenario {
    id: "escape_burn",
    name: "Escape Burn",
    description: "Ship above escape speed leaves the planet behind.",
    sources: &[PLANET],
    ship: ShipStart::CircularOrbit {
        primary: 0,
        radius: 200.0,
        speed_factor: 1.5,
    },
    ship_mass: 1.0,
    time_scale: 1.0,
};

/// Scenario 5: Binary Well
///
/// A light moon far out. The planet remains the primary near the start, but
/// the moon perturbs the orbit over time.
pub static BINARY_WELL: Scenario = Scenario {
    id: "binary_well",
    name: "Binary Well",
    description: "Circular orbit perturbed by a distant moon.",
    sources: &[
        PLANET,
        SourceSpec {
            id: 1,
            pos: DVec2::new(900.0, 0.0),
            mass: 60.0,
            radius: 15.0,
        },
    ],
    ship: ShipStart::CircularOrbit {
        primary: 0,
        radius: 200.0,
        speed_factor: 1.0,
    },
    ship_mass: 1.0,
    time_scale: 1.0,
};
