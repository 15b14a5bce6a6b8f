//! Orbitcore - headless scenario runner
//!
//! Runs a preset scenario (default: circular orbit) for a fixed stretch of
//! simulation time and logs orbital state changes.
//!
//! Usage: `orbitcore [scenario_id]`

use std::time::Duration;

use bevy::diagnostic::FrameCount;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use orbitcore::orbit::{AnalysisCache, OrbitStateChanged};
use orbitcore::physics::Ship;
use orbitcore::scenarios::{find_scenario, CurrentScenario, SCENARIOS};
use orbitcore::types::SimulationTime;
use orbitcore::OrbitCorePlugins;

/// Frame length fed to the simulation clock.
const FRAME_SECONDS: f64 = 1.0 / 60.0;

/// 40 simulated seconds: a bit over two periods of the circular preset.
const FRAMES: u32 = 2400;

fn main() {
    let id = std::env::args().nth(1).unwrap_or_else(|| "circular_orbit".to_string());
    let scenario = match find_scenario(&id) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("{err}");
            let ids: Vec<&str> = SCENARIOS.iter().map(|s| s.id).collect();
            eprintln!("available scenarios: {}", ids.join(", "));
            std::process::exit(2);
        }
    };

    App::new()
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            FRAME_SECONDS,
        )))
        .insert_resource(CurrentScenario { id: scenario.id })
        .add_plugins(OrbitCorePlugins)
        .add_systems(Update, (report_state_changes, exit_after_frames).chain())
        .run();
}

fn report_state_changes(mut changes: MessageReader<OrbitStateChanged>) {
    for change in changes.read() {
        info!("t={:.2}s: {} -> {}", change.time, change.from, change.to);
    }
}

fn exit_after_frames(
    frames: Res<FrameCount>,
    ships: Query<(&Name, &AnalysisCache), With<Ship>>,
    sim_time: Res<SimulationTime>,
    mut exit: MessageWriter<AppExit>,
) {
    if frames.0 < FRAMES {
        return;
    }

    for (name, cache) in ships.iter() {
        let elements = cache.get();
        info!(
            "{} final state at t={:.2}s: {} (e={:.4}, period={})",
            name,
            sim_time.current,
            elements.state,
            elements.eccentricity,
            elements
                .period
                .map(|p| format!("{p:.2}s"))
                .unwrap_or_else(|| "n/a".to_string()),
        );
    }
    exit.write(AppExit::Success);
}
