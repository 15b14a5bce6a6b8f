//! Two-body orbital elements and regime classification.
//!
//! The analyzer picks the source with the strongest local pull as the
//! primary, derives the conic from the instantaneous state vectors relative
//! to it, and classifies the trajectory:
//! - Escape: unbound (E >= 0)
//! - Decay: periapsis too close to the primary's surface
//! - Stable: near-circular and comfortably high
//! - Elliptical: eccentric but with a safe periapsis

use std::f64::consts::TAU;
use std::fmt;

use bevy::math::DVec2;
use bevy::prelude::Resource;

use crate::sources::GravitySource;
use crate::types::{
    BodyState, CRASH_MULTIPLIER, ELLIPTICAL_THRESHOLD, G, MIN_DISTANCE, SAFE_PERIAPSIS_MULTIPLIER,
    STABLE_DISTANCE_MULTIPLIER, STABLE_THRESHOLD,
};

/// Orbital regime of the simulated body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OrbitalState {
    /// No dominant source (e.g. no sources at all).
    #[default]
    Unknown,
    /// Near-circular bound orbit.
    Stable,
    /// Bound, eccentric, periapsis safely above the surface.
    Elliptical,
    /// Bound but will impact the primary.
    Decay,
    /// Unbound trajectory.
    Escape,
}

impl OrbitalState {
    /// Stable and Elliptical orbits are safe to coast on.
    pub fn is_stable(self) -> bool {
        matches!(self, OrbitalState::Stable | OrbitalState::Elliptical)
    }

    pub fn label(self) -> &'static str {
        match self {
            OrbitalState::Unknown => "unknown",
            OrbitalState::Stable => "stable",
            OrbitalState::Elliptical => "elliptical",
            OrbitalState::Decay => "decay",
            OrbitalState::Escape => "escape",
        }
    }
}

impl fmt::Display for OrbitalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Orbital elements computed from state vectors.
///
/// Rebuilt on every analysis and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrbitalElements {
    /// Specific orbital energy (kinetic + potential per unit mass).
    pub specific_energy: f64,
    /// Eccentricity (0 = circular, <1 = elliptical, >=1 = escape).
    pub eccentricity: f64,
    /// Eccentricity vector, pointing from the primary toward periapsis.
    pub eccentricity_vector: DVec2,
    /// Semi-major axis. Only for bound orbits.
    pub semi_major_axis: Option<f64>,
    /// Orbital period (seconds). Only for bound orbits.
    pub period: Option<f64>,
    /// Closest approach distance. Only for bound orbits.
    pub periapsis: Option<f64>,
    /// Farthest distance. Only for bound orbits.
    pub apoapsis: Option<f64>,
    /// Current distance to the primary.
    pub distance: f64,
    /// The dominant source, if any.
    pub primary: Option<GravitySource>,
    pub state: OrbitalState,
    pub is_stable: bool,
}

impl OrbitalElements {
    /// Elements for "no dominant source": everything zeroed.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Returns true if orbit is bound (E < 0).
    pub fn is_bound(&self) -> bool {
        self.specific_energy < 0.0
    }

    /// Excess velocity at infinity for unbound trajectories, 0 for bound ones.
    pub fn v_infinity(&self) -> f64 {
        if self.specific_energy > 0.0 {
            (2.0 * self.specific_energy).sqrt()
        } else {
            0.0
        }
    }
}

/// Thresholds driving regime classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassificationThresholds {
    pub crash_multiplier: f64,
    pub stable_eccentricity: f64,
    pub elliptical_eccentricity: f64,
    pub stable_distance_multiplier: f64,
    pub safe_periapsis_multiplier: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            crash_multiplier: CRASH_MULTIPLIER,
            stable_eccentricity: STABLE_THRESHOLD,
            elliptical_eccentricity: ELLIPTICAL_THRESHOLD,
            stable_distance_multiplier: STABLE_DISTANCE_MULTIPLIER,
            safe_periapsis_multiplier: SAFE_PERIAPSIS_MULTIPLIER,
        }
    }
}

impl ClassificationThresholds {
    /// Classify a bound orbit. First match wins:
    /// 1. periapsis below the crash altitude => Decay
    /// 2. low eccentricity and high enough => Stable
    /// 3. moderate eccentricity and safe periapsis => Elliptical
    /// 4. anything else => Decay
    pub fn classify_bound(
        &self,
        eccentricity: f64,
        distance: f64,
        periapsis: f64,
        primary_radius: f64,
    ) -> OrbitalState {
        if periapsis < primary_radius * self.crash_multiplier {
            OrbitalState::Decay
        } else if eccentricity < self.stable_eccentricity
            && distance > primary_radius * self.stable_distance_multiplier
        {
            OrbitalState::Stable
        } else if eccentricity < self.elliptical_eccentricity
            && periapsis > primary_radius * self.safe_periapsis_multiplier
        {
            OrbitalState::Elliptical
        } else {
            OrbitalState::Decay
        }
    }
}

/// Orbit analyzer configuration.
#[derive(Resource, Clone, Copy, Debug)]
pub struct OrbitAnalyzer {
    /// Gravitational constant scale. Default: [`G`].
    pub gravitational_constant: f64,
    /// Distance floor used for influence and potential. Default: [`MIN_DISTANCE`].
    pub min_distance: f64,
    pub thresholds: ClassificationThresholds,
}

impl Default for OrbitAnalyzer {
    fn default() -> Self {
        Self {
            gravitational_constant: G,
            min_distance: MIN_DISTANCE,
            thresholds: ClassificationThresholds::default(),
        }
    }
}

impl OrbitAnalyzer {
    /// Find the source with the strongest local influence (mass / distance²).
    ///
    /// Influence uses the true separation, so a light source very close by
    /// can outrank a heavy one further out. A source at exactly the body's
    /// position has infinite influence. Sources without a finite position
    /// are ignored. On ties the first source in the slice wins.
    pub fn find_primary<'a>(&self, position: DVec2, sources: &'a [GravitySource]) -> Option<&'a GravitySource> {
        let mut best: Option<(&GravitySource, f64)> = None;

        for source in sources {
            if !source.has_valid_position() {
                continue;
            }
            let r_sq = (source.position() - position).length_squared();
            let influence = if r_sq > 0.0 {
                source.mass() / r_sq
            } else {
                f64::INFINITY
            };

            if best.is_none_or(|(_, max)| influence > max) {
                best = Some((source, influence));
            }
        }

        best.map(|(source, _)| source)
    }

    /// Speed for a circular orbit at `distance` around a body of `primary_mass`,
    /// using this analyzer's gravitational constant.
    ///
    /// v = √(G·M / r). Non-positive distance gives 0.
    pub fn circular_orbit_velocity(&self, distance: f64, primary_mass: f64) -> f64 {
        if distance <= 0.0 {
            return 0.0;
        }
        (self.gravitational_constant * primary_mass / distance).sqrt()
    }

    /// Escape speed at `distance` from a body of `primary_mass`: √(2·G·M / r).
    pub fn escape_velocity(&self, distance: f64, primary_mass: f64) -> f64 {
        self.circular_orbit_velocity(distance, primary_mass) * std::f64::consts::SQRT_2
    }

    /// Place a body in an immediate circular orbit around `primary`.
    ///
    /// The body goes `radius` to the left of the primary (-x) moving in +y.
    /// Intended for scenario setup only.
    pub fn place_in_circular_orbit(&self, body: &mut BodyState, primary: &GravitySource, radius: f64) {
        body.pos = primary.position() + DVec2::new(-radius, 0.0);
        body.vel = DVec2::new(0.0, self.circular_orbit_velocity(radius, primary.mass()));
    }

    /// Compute orbital elements relative to the primary and classify them.
    ///
    /// Degrades to [`OrbitalState::Unknown`] when there is no primary or the
    /// math produces non-finite values.
    pub fn analyze(&self, position: DVec2, velocity: DVec2, sources: &[GravitySource]) -> OrbitalElements {
        let Some(primary) = self.find_primary(position, sources) else {
            return OrbitalElements::unknown();
        };

        let r = position - primary.position();
        let distance = r.length();
        let mu = primary.gm(self.gravitational_constant);
        let floored = distance.max(self.min_distance);

        // Vis-viva: E = v²/2 - μ/r
        let specific_energy = 0.5 * velocity.length_squared() - mu / floored;

        let eccentricity_vector = eccentricity_vector_at(r, velocity, mu, floored);
        let eccentricity = eccentricity_vector.length();

        if !(specific_energy.is_finite() && eccentricity.is_finite()) {
            return OrbitalElements::unknown();
        }

        let mut elements = OrbitalElements {
            specific_energy,
            eccentricity,
            eccentricity_vector,
            distance,
            primary: Some(*primary),
            ..Default::default()
        };

        if specific_energy < 0.0 {
            // a = -μ / (2E)
            let a = -mu / (2.0 * specific_energy);
            let periapsis = a * (1.0 - eccentricity);

            elements.semi_major_axis = Some(a);
            elements.periapsis = Some(periapsis);
            elements.apoapsis = Some(a * (1.0 + eccentricity));
            // Kepler's third law: T = 2π √(a³/μ)
            elements.period = Some(TAU * (a.powi(3) / mu).sqrt());
            elements.state =
                self.thresholds
                    .classify_bound(eccentricity, distance, periapsis, primary.radius());
        } else {
            elements.state = OrbitalState::Escape;
        }

        elements.is_stable = elements.state.is_stable();
        elements
    }
}

fn eccentricity_vector_at(r: DVec2, v: DVec2, mu: f64, distance: f64) -> DVec2 {
    ((v.length_squared() - mu / distance) * r - r.dot(v) * v) / mu
}

/// Eccentricity vector, direct form: e = ((v² - μ/r)·r - (r·v)·v) / μ.
///
/// `r` is the position relative to the primary.
pub fn eccentricity_vector(r: DVec2, v: DVec2, mu: f64) -> DVec2 {
    eccentricity_vector_at(r, v, mu, r.length())
}

/// Eccentricity vector, angular momentum form: e = (v × h)/μ - r̂.
///
/// In 2D, h = r × v is the z-component only, so v × h = (v.y·h, -v.x·h).
pub fn eccentricity_vector_from_angular_momentum(r: DVec2, v: DVec2, mu: f64) -> DVec2 {
    let h = r.perp_dot(v);
    DVec2::new(v.y * h, -v.x * h) / mu - r.normalize_or_zero()
}
