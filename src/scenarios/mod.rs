//! Scenario system for preset orbital setups.
//!
//! Provides a collection of preset scenarios demonstrating each orbital
//! regime:
//! - Circular orbit (stable)
//! - Elliptical orbit
//! - Decaying orbit (impact)
//! - Escape burn
//! - Binary well (perturbed orbit)

pub mod presets;

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::orbit::{AnalysisCache, OrbitAnalyzer};
use crate::physics::Ship;
use crate::prediction::TrajectoryPath;
use crate::sources::{GravityBody, GravitySource, SourceError, SourceId};
use crate::types::{BodyState, SimulationTime};

pub use presets::SCENARIOS;

/// A gravity source as declared by a scenario.
#[derive(Clone, Copy, Debug)]
pub struct SourceSpec {
    pub id: u32,
    pub pos: DVec2,
    pub mass: f64,
    pub radius: f64,
}

/// How the ship starts.
#[derive(Clone, Copy, Debug)]
pub enum ShipStart {
    /// Placed left of `primary` at `radius`, moving +y at
    /// `speed_factor` times the circular speed.
    CircularOrbit {
        primary: u32,
        radius: f64,
        speed_factor: f64,
    },
    /// Explicit state vectors.
    Explicit { pos: DVec2, vel: DVec2 },
}

/// A predefined scenario configuration.
#[derive(Clone, Copy, Debug)]
pub struct Scenario {
    /// Unique identifier for the scenario.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Brief description of the scenario.
    pub description: &'static str,
    pub sources: &'static [SourceSpec],
    pub ship: ShipStart,
    pub ship_mass: f64,
    /// Initial time scale.
    pub time_scale: f64,
}

/// Errors raised while building a scenario.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("scenario places the ship around missing source {0}")]
    MissingPrimary(u32),

    #[error(transparent)]
    InvalidSource(#[from] SourceError),
}

/// Look up a preset by id.
pub fn find_scenario(id: &str) -> Result<&'static Scenario, ScenarioError> {
    SCENARIOS
        .iter()
        .find(|s| s.id == id)
        .ok_or_else(|| ScenarioError::UnknownScenario(id.to_string()))
}

/// Build validated sources and the ship's initial state for a scenario.
///
/// Circular starts use the analyzer's gravitational constant, so the ship
/// is on a circular orbit for the field it will be analyzed in.
pub fn build_scenario(
    scenario: &Scenario,
    analyzer: &OrbitAnalyzer,
) -> Result<(Vec<GravitySource>, BodyState), ScenarioError> {
    let sources = scenario
        .sources
        .iter()
        .map(|spec| GravitySource::new(SourceId(spec.id), spec.pos, spec.mass, spec.radius))
        .collect::<Result<Vec<_>, _>>()?;

    let mut ship = BodyState {
        mass: scenario.ship_mass,
        ..Default::default()
    };

    match scenario.ship {
        ShipStart::CircularOrbit {
            primary,
            radius,
            speed_factor,
        } => {
            let primary = sources
                .iter()
                .find(|s| s.id() == SourceId(primary))
                .ok_or(ScenarioError::MissingPrimary(primary))?;
            analyzer.place_in_circular_orbit(&mut ship, primary, radius);
            ship.vel *= speed_factor;
        }
        ShipStart::Explicit { pos, vel } => {
            ship.pos = pos;
            ship.vel = vel;
        }
    }

    Ok((sources, ship))
}

/// Resource tracking the current active scenario.
#[derive(Resource, Clone, Debug)]
pub struct CurrentScenario {
    /// ID of the current scenario.
    pub id: &'static str,
}

impl Default for CurrentScenario {
    fn default() -> Self {
        Self {
            id: presets::CIRCULAR_ORBIT.id,
        }
    }
}

/// Message to trigger loading a scenario.
#[derive(Message, Clone, Debug)]
pub struct LoadScenario {
    /// ID of the scenario to load.
    pub scenario_id: &'static str,
}

/// Plugin providing scenario management.
pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentScenario>()
            .init_resource::<SimulationTime>()
            .init_resource::<OrbitAnalyzer>()
            .add_message::<LoadScenario>()
            .add_systems(Startup, load_current_scenario)
            .add_systems(PreUpdate, handle_load_scenario);
    }
}

/// Request the current scenario on startup.
fn load_current_scenario(current: Res<CurrentScenario>, mut load: MessageWriter<LoadScenario>) {
    load.write(LoadScenario {
        scenario_id: current.id,
    });
}

/// Handle scenario loading messages: clear the scene, spawn the new one.
fn handle_load_scenario(
    mut commands: Commands,
    mut requests: MessageReader<LoadScenario>,
    existing: Query<Entity, Or<(With<Ship>, With<GravityBody>)>>,
    mut current: ResMut<CurrentScenario>,
    mut sim_time: ResMut<SimulationTime>,
    analyzer: Res<OrbitAnalyzer>,
) {
    // Only the latest request matters
    let Some(scenario_id) = requests.read().last().map(|r| r.scenario_id) else {
        return;
    };

    let built = find_scenario(scenario_id)
        .and_then(|scenario| build_scenario(scenario, &analyzer).map(|built| (scenario, built)));

    let (scenario, (sources, ship)) = match built {
        Ok(built) => built,
        Err(err) => {
            error!("Failed to load scenario '{}': {}", scenario_id, err);
            return;
        }
    };

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    for source in &sources {
        commands.spawn((
            GravityBody(*source),
            Name::new(format!("Source {}", source.id().0)),
        ));
    }

    commands.spawn((
        Ship,
        ship,
        AnalysisCache::default(),
        TrajectoryPath::default(),
        Name::new("Ship"),
    ));

    current.id = scenario.id;
    sim_time.reset();
    sim_time.scale = scenario.time_scale;

    info!(
        "Loaded scenario '{}': {} sources, ship at ({:.1}, {:.1}) speed {:.2} (circular {:.2})",
        scenario.name,
        sources.len(),
        ship.pos.x,
        ship.pos.y,
        ship.speed(),
        sources
            .first()
            .map(|s| analyzer.circular_orbit_velocity((ship.pos - s.position()).length(), s.mass()))
            .unwrap_or(0.0),
    );
}
