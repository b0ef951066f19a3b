/*!
# Meal Overlay Demo

Runs the overlay headless against a simulated tracker.

The simulated tracker walks the menu's reference images through their
lifecycle (first sighting, pose updates, tracking loss, removal) on its own
thread and a second simulated user taps random objects. Watch the log to
follow spawns, hides, selections and food swaps.

Usage: `meal_overlay [config.json]`. Without a path the built-in demo menu
is used.
*/

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use crossbeam_channel::Sender;
use glam::{Quat, Vec3};
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::Duration;

use meal_overlay::MealOverlayPlugins;
use meal_overlay::ecs::core::{AnchorId, ConfigError, OverlayConfig, OverlaySet, Pose, TrackedAnchor, TrackingQuality};
use meal_overlay::ecs::plugins::selection::{FoodObject, InteractEvent};
use meal_overlay::ecs::plugins::tracking::{AnchorObservation, TrackingBatch, TrackingFeed};

/// How long the simulated tracker waits between cycles.
const TRACKER_PERIOD: Duration = Duration::from_millis(250);

/// Chance per second that the simulated user taps something.
const TAP_RATE: f64 = 0.4;

/// Main entry point for the overlay demo.
fn main() -> Result<(), ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => OverlayConfig::load(path)?,
        None => OverlayConfig::demo(),
    };

    let anchors: Vec<AnchorId> = config.menu.bindings.iter().map(|binding| binding.anchor).collect();
    let (sender, feed) = TrackingFeed::channel();
    std::thread::spawn(move || SimulatedTracker::new(anchors).run(sender));

    let tick = Duration::from_secs_f64(1.0 / config.tick_hz.max(1.0));

    App::new()
        // No window or renderer: the overlay runs headless here
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(tick)))
        .add_plugins(LogPlugin {
            filter: config.log_filter.clone(),
            ..default()
        })
        .add_plugins(MealOverlayPlugins::new(config))
        .insert_resource(feed)
        .add_systems(Startup, announce_system)
        .add_systems(Update, simulated_tap_system.before(OverlaySet::Selection).after(OverlaySet::Tracking))
        .run();

    Ok(())
}

fn announce_system(config: Res<OverlayConfig>) {
    info!(
        "meal overlay running at {} Hz with {} reference images",
        config.tick_hz,
        config.menu.bindings.len()
    );
}

/// Taps a random tracked object, one of its foods, or empty space.
fn simulated_tap_system(
    time: Res<Time>,
    tracked: Query<Entity, With<TrackedAnchor>>,
    foods: Query<Entity, With<FoodObject>>,
    mut interactions: EventWriter<InteractEvent>,
) {
    let mut rng = rand::thread_rng();
    let chance = (TAP_RATE * time.delta_secs_f64()).clamp(0.0, 1.0);
    if !rng.gen_bool(chance) {
        return;
    }

    let mut candidates: Vec<Entity> = tracked.iter().chain(foods.iter()).collect();
    candidates.shuffle(&mut rng);
    let hit = if rng.gen_bool(0.15) { None } else { candidates.first().copied() };

    info!("tap on {hit:?}");
    interactions.send(InteractEvent { hit });
}

// ============================================================================
// SIMULATED TRACKER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimulatedState {
    Unseen,
    Tracking,
    Limited,
    Lost,
}

/// Stand-in for the platform tracking subsystem.
///
/// Keeps its own view of which anchors it has reported, so batches it sends
/// are always well formed: an anchor is added once, updated while seen and
/// removed once.
struct SimulatedTracker {
    anchors: Vec<(AnchorId, SimulatedState, Pose)>,
}

impl SimulatedTracker {
    fn new(anchors: Vec<AnchorId>) -> Self {
        let anchors = anchors
            .into_iter()
            .enumerate()
            .map(|(index, anchor)| (anchor, SimulatedState::Unseen, Pose::at(index as f32 * 0.3, 0.0, 0.5)))
            .collect();
        Self { anchors }
    }

    fn run(mut self, sender: Sender<TrackingBatch>) {
        loop {
            let batch = self.step();
            if !batch.is_empty() && sender.send(batch).is_err() {
                // App is gone
                return;
            }
            std::thread::sleep(TRACKER_PERIOD);
        }
    }

    fn step(&mut self) -> TrackingBatch {
        let mut rng = rand::thread_rng();
        let mut batch = TrackingBatch::default();

        for (anchor, state, pose) in self.anchors.iter_mut() {
            let roll: f64 = rng.r#gen();
            let drift = Vec3::new(rng.gen_range(-0.01..0.01), 0.0, rng.gen_range(-0.01..0.01));
            let next_pose = Pose::new(
                pose.position + drift,
                pose.rotation * Quat::from_rotation_y(rng.gen_range(-0.05..0.05)),
            );

            *state = match *state {
                SimulatedState::Unseen if roll < 0.1 => {
                    batch.added.push(AnchorObservation::tracking(*anchor, next_pose));
                    SimulatedState::Tracking
                }
                SimulatedState::Unseen => SimulatedState::Unseen,
                SimulatedState::Tracking | SimulatedState::Limited if roll < 0.02 => {
                    batch.removed.push(*anchor);
                    SimulatedState::Unseen
                }
                SimulatedState::Tracking | SimulatedState::Limited | SimulatedState::Lost => {
                    let (quality, next) = if roll < 0.1 {
                        (TrackingQuality::None, SimulatedState::Lost)
                    } else if roll < 0.2 {
                        (TrackingQuality::Limited, SimulatedState::Limited)
                    } else {
                        (TrackingQuality::Tracking, SimulatedState::Tracking)
                    };
                    batch.updated.push(AnchorObservation::new(*anchor, next_pose, quality));
                    next
                }
            };
            *pose = next_pose;
        }

        batch
    }
}
