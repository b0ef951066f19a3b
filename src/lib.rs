/*!
# Meal Overlay

Tracked-anchor lifecycle management for an augmented-reality meal menu,
built with Bevy ECS.

A camera-tracking subsystem recognises printed reference images and reports,
once per cycle, which anchors were added, updated or removed. This crate
keeps exactly one spawned "meal component" per live anchor, shows and moves
it while the image is tracked, hides it (without destroying it) while
tracking is lost, and destroys it when the anchor is removed. Users select
meal components to reveal and swap the food placed on them.

## Architecture Overview

Each concern is a plugin:

- **CorePlugin**: shared types (`AnchorId`, `Pose`, ...), `OverlayConfig`, system ordering
- **RegistryPlugin**: anchor -> category/template bindings, template and food libraries
- **TrackingPlugin**: tracking feed, spawn table and the reconciler driving it
- **SelectionPlugin**: tap handling, meal-component selection, food swaps
- **DebugPlugin**: periodic state summaries

`MealOverlayPlugins` adds all of them.

## How It Works

1. The tracker thread sends `TrackingBatch`es over a `TrackingFeed` channel
2. `reconcile_tracking_system` applies each batch (added, updated, removed)
3. Spawned objects live in the `SpawnTable`, one per anchor
4. `InteractEvent`s select meal components, attaching their food on first selection
5. `AnchorTransition`, `SelectionChanged` and `SelectedFoodChanged` events report what changed

The spawn table, reconciler and selection state are plain types driven
through the [`ecs::scene::SceneHost`] trait, so they can be exercised
without a `World`.
*/

pub mod ecs;

pub use ecs::MealOverlayPlugins;
