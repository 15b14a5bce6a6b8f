//! Property-based tests for orbit analysis.
//!
//! The two eccentricity formulas must agree, and closed-form orbits must be
//! recovered from their state vectors.

use bevy::math::DVec2;
use proptest::prelude::*;

use super::{
    eccentricity_vector, eccentricity_vector_from_angular_momentum, AnalysisCache,
    OrbitAnalyzer, OrbitalState,
};
use crate::sources::SourceId;
use crate::test_utils::{assertions, fixtures, PLANET_MASS, PLANET_RADIUS};
use crate::types::{G, MAX_ANALYSIS_INTERVAL, MIN_ANALYSIS_INTERVAL};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Direct and angular-momentum forms give the same eccentricity vector.
    #[test]
    fn prop_eccentricity_forms_agree(
        rx in -1000.0f64..1000.0,
        ry in -1000.0f64..1000.0,
        vx in -200.0f64..200.0,
        vy in -200.0f64..200.0,
    ) {
        let r = DVec2::new(rx, ry);
        prop_assume!(r.length() > 1.0);
        let v = DVec2::new(vx, vy);
        let mu = G * PLANET_MASS;

        let direct = eccentricity_vector(r, v, mu);
        let cross = eccentricity_vector_from_angular_momentum(r, v, mu);

        let scale = 1.0 + direct.length();
        prop_assert!((direct - cross).length() < 1e-9 * scale, "direct={direct:?}, cross={cross:?}");
    }

    /// A body at periapsis of a known ellipse recovers e, a and the period.
    #[test]
    fn prop_recovers_closed_form_ellipse(
        periapsis in 100.0f64..1000.0,
        eccentricity in 0.0f64..0.85,
        angle in 0.0f64..std::f64::consts::TAU,
    ) {
        let analyzer = OrbitAnalyzer::default();
        let sources = [fixtures::planet()];
        let state = fixtures::elliptical_orbit(periapsis, eccentricity);
        // Rotate the whole orbit; elements are rotation invariant.
        let rot = DVec2::from_angle(angle);
        let pos = rot.rotate(state.pos);
        let vel = rot.rotate(state.vel);

        let elements = analyzer.analyze(pos, vel, &sources);
        let a = periapsis / (1.0 - eccentricity);

        prop_assert!((elements.eccentricity - eccentricity).abs() < 1e-9);
        prop_assert!((elements.semi_major_axis.unwrap() - a).abs() < 1e-6 * a);
        prop_assert!((elements.periapsis.unwrap() - periapsis).abs() < 1e-6 * periapsis);
        let period = assertions::orbital_period(a);
        prop_assert!((elements.period.unwrap() - period).abs() < 1e-6 * period);
        prop_assert!(elements.is_stable);
    }

    /// Circular orbits above the stable altitude are Stable in any direction.
    #[test]
    fn prop_circular_orbits_stable(
        distance in 80.0f64..2000.0,
        angle in 0.0f64..std::f64::consts::TAU,
        retrograde in any::<bool>(),
    ) {
        let analyzer = OrbitAnalyzer::default();
        let radial = DVec2::from_angle(angle);
        let tangent = if retrograde { -radial.perp() } else { radial.perp() };
        let pos = radial * distance;
        let vel = tangent * analyzer.circular_orbit_velocity(distance, PLANET_MASS);

        let elements = analyzer.analyze(pos, vel, &[fixtures::planet()]);
        prop_assert!(elements.eccentricity < 1e-9);
        prop_assert_eq!(elements.state, OrbitalState::Stable);
    }

    /// Classification always respects its structural invariants.
    #[test]
    fn prop_state_invariants(
        px in -800.0f64..800.0,
        py in -800.0f64..800.0,
        vx in -150.0f64..150.0,
        vy in -150.0f64..150.0,
        with_second in any::<bool>(),
    ) {
        let analyzer = OrbitAnalyzer::default();
        let mut sources = vec![fixtures::planet()];
        if with_second {
            sources.push(fixtures::planet_at(SourceId(1), DVec2::new(400.0, 300.0), 300.0, 20.0));
        }
        let elements = analyzer.analyze(DVec2::new(px, py), DVec2::new(vx, vy), &sources);

        prop_assert!(elements.eccentricity >= 0.0);
        prop_assert_eq!(elements.semi_major_axis.is_some(), elements.specific_energy < 0.0);
        prop_assert_eq!(elements.period.is_some(), elements.specific_energy < 0.0);
        prop_assert_eq!(elements.primary.is_some(), elements.state != OrbitalState::Unknown);
        prop_assert_eq!(elements.is_stable, elements.state.is_stable());
        prop_assert_eq!(elements.specific_energy >= 0.0, elements.state == OrbitalState::Escape);
        if let Some(periapsis) = elements.periapsis {
            let radius = elements.primary.map(|p| p.radius()).unwrap_or(PLANET_RADIUS);
            if periapsis < radius * analyzer.thresholds.crash_multiplier {
                prop_assert_eq!(elements.state, OrbitalState::Decay);
            }
        }
    }

    /// With unchanged state, the cache only refreshes outside the min interval
    /// and always refreshes past the max interval.
    #[test]
    fn prop_cache_intervals(
        start in 0.0f64..1000.0,
        early in 0.0f64..MIN_ANALYSIS_INTERVAL,
        late in 1e-6f64..10.0,
    ) {
        let analyzer = OrbitAnalyzer::default();
        let state = fixtures::circular_orbit(200.0);
        let mut cache = AnalysisCache::default();

        prop_assert!(cache.update(&analyzer, state.pos, state.vel, &[fixtures::planet()], start));
        // Tolerate rounding right at the interval edge.
        prop_assume!(MIN_ANALYSIS_INTERVAL - early > 1e-9);
        prop_assert!(!cache.should_recompute(state.pos, state.vel, start + early));
        prop_assert!(cache.should_recompute(state.pos, state.vel, start + MAX_ANALYSIS_INTERVAL + late));
    }
}
