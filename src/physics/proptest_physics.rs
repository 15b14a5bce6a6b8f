//! Property-based tests for the gravity field and integrator.

use bevy::math::DVec2;
use proptest::prelude::*;

use super::{predict_path, predict_trajectory, GravityField, VerletState};
use crate::sources::SourceId;
use crate::test_utils::{assertions, fixtures, PLANET_MASS};
use crate::types::{COLLISION_MARGIN, G, MIN_DISTANCE};

fn arb_point() -> impl Strategy<Value = DVec2> {
    (-500.0f64..500.0, -500.0f64..500.0).prop_map(|(x, y)| DVec2::new(x, y))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Acceleration is additive over sources.
    #[test]
    fn prop_acceleration_superposition(
        point in arb_point(),
        a in arb_point(),
        b in arb_point(),
        mass_a in 1.0f64..2000.0,
        mass_b in 1.0f64..2000.0,
    ) {
        let field = GravityField::default();
        let sa = fixtures::planet_at(SourceId(0), a, mass_a, 5.0);
        let sb = fixtures::planet_at(SourceId(1), b, mass_b, 5.0);

        let both = field.acceleration_at(point, &[sa, sb]);
        let sum = field.acceleration_at(point, &[sa]) + field.acceleration_at(point, &[sb]);

        prop_assert!((both - sum).length() <= 1e-9 * (1.0 + sum.length()));
    }

    /// Beyond the floor, magnitude strictly decreases with distance.
    #[test]
    fn prop_acceleration_decreases_with_distance(
        d in MIN_DISTANCE..5000.0,
        extra in 0.1f64..1000.0,
        angle in 0.0f64..std::f64::consts::TAU,
    ) {
        let field = GravityField::default();
        let sources = [fixtures::planet()];
        let dir = DVec2::from_angle(angle);

        let near = field.acceleration_at(dir * d, &sources).length();
        let far = field.acceleration_at(dir * (d + extra), &sources).length();

        prop_assert!(far < near, "near={near}, far={far}");
        prop_assert!((near - G * PLANET_MASS / (d * d)).abs() <= 1e-9 * near);
    }

    /// Acceleration never exceeds the floor cap, wherever the body is.
    #[test]
    fn prop_acceleration_bounded(point in arb_point()) {
        let field = GravityField::default();
        let acc = field.acceleration_at(point, &[fixtures::planet()]);
        let cap = G * PLANET_MASS / (MIN_DISTANCE * MIN_DISTANCE);
        prop_assert!(acc.is_finite());
        prop_assert!(acc.length() <= cap * (1.0 + 1e-12));
    }

    /// Verlet keeps orbital energy within 1% over one period.
    #[test]
    fn prop_energy_conservation_one_orbit(
        periapsis in 80.0f64..400.0,
        eccentricity in 0.0f64..0.6,
    ) {
        let field = GravityField::default();
        let sources = [fixtures::planet()];
        let state = fixtures::elliptical_orbit(periapsis, eccentricity);
        let initial_energy = assertions::orbital_energy(state.pos, state.vel);

        let a = periapsis / (1.0 - eccentricity);
        let period = assertions::orbital_period(a);
        let steps = 5000;
        let dt = period / steps as f64;

        let mut verlet = VerletState::new(&field, state.pos, state.vel, &sources);
        for _ in 0..steps {
            verlet.step(&field, &sources, dt);
        }

        let final_energy = assertions::orbital_energy(verlet.pos, verlet.vel);
        let drift = ((final_energy - initial_energy) / initial_energy).abs();
        prop_assert!(drift < 0.01, "Energy drift {:.4}% (e={}, rp={})", drift * 100.0, eccentricity, periapsis);
    }

    /// Angular momentum is conserved for a central force.
    #[test]
    fn prop_angular_momentum_conservation(
        periapsis in 80.0f64..400.0,
        eccentricity in 0.0f64..0.6,
    ) {
        let field = GravityField::default();
        let sources = [fixtures::planet()];
        let state = fixtures::elliptical_orbit(periapsis, eccentricity);
        let initial_l = assertions::angular_momentum(state.pos, state.vel);

        let period = assertions::orbital_period(periapsis / (1.0 - eccentricity));
        let steps = 2000;
        let dt = period / steps as f64;

        let mut verlet = VerletState::new(&field, state.pos, state.vel, &sources);
        for _ in 0..steps {
            verlet.step(&field, &sources, dt);
        }

        let final_l = assertions::angular_momentum(verlet.pos, verlet.vel);
        let drift = ((final_l - initial_l) / initial_l).abs();
        prop_assert!(drift < 1e-6, "Angular momentum drift {drift:.2e}");
    }

    /// Path length is step_count + 1 unless the path hits a source.
    #[test]
    fn prop_path_length(
        distance in 100.0f64..400.0,
        horizon in 0.1f64..30.0,
        steps in 1usize..400,
    ) {
        let field = GravityField::default();
        let sources = [fixtures::planet()];
        let state = fixtures::circular_orbit(distance);

        let path = predict_trajectory(&field, state.pos, state.vel, &sources, horizon, steps, COLLISION_MARGIN);
        prop_assert_eq!(path.points[0], state.pos);
        if path.impact.is_none() {
            prop_assert_eq!(path.points.len(), steps + 1);
        } else {
            prop_assert!(path.points.len() <= steps + 1);
        }
    }

    /// Identical inputs give identical paths.
    #[test]
    fn prop_prediction_deterministic(
        distance in 100.0f64..400.0,
        speed_factor in 0.5f64..1.5,
    ) {
        let field = GravityField::default();
        let sources = [fixtures::planet()];
        let state = fixtures::circular_orbit(distance);
        let vel = state.vel * speed_factor;

        let first = predict_path(&field, state.pos, vel, &sources, 10.0, 200);
        let second = predict_path(&field, state.pos, vel, &sources, 10.0, 200);
        prop_assert_eq!(first, second);
    }
}
