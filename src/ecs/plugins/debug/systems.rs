/*!
# Debug Systems

Periodic summaries of the overlay state for development.
*/

use bevy::prelude::*;

use crate::ecs::core::{AnchorVisibility, OverlayConfig, Pose, TrackedAnchor};
use crate::ecs::plugins::selection::{MealComponent, SelectionState};
use crate::ecs::plugins::tracking::SpawnTable;

/// Resource to track when we last printed debug info
#[derive(Resource, Default)]
pub struct DebugTimer {
    last_print_time: f32,
}

/// Logs spawn-table occupancy, tracked objects and the current selection
/// every `debug_interval_secs`.
pub fn debug_system(
    table: Res<SpawnTable>,
    selection: Res<SelectionState>,
    tracked_query: Query<(Entity, &TrackedAnchor, &Pose, &AnchorVisibility)>,
    meal_query: Query<&MealComponent>,
    config: Res<OverlayConfig>,
    time: Res<Time>,
    mut debug_timer: ResMut<DebugTimer>,
) {
    let current_time = time.elapsed_secs();
    if current_time - debug_timer.last_print_time <= config.debug_interval_secs {
        return;
    }
    debug_timer.last_print_time = current_time;

    if table.is_empty() {
        debug!("overlay: no anchors tracked");
        return;
    }

    debug!(
        "overlay: {} anchors ({} visible, {} hidden)",
        table.len(),
        table.visible_count(),
        table.len() - table.visible_count()
    );

    for (entity, anchor, pose, visibility) in tracked_query.iter() {
        let food = meal_query
            .get(entity)
            .ok()
            .and_then(|meal| meal.selection.attached())
            .map(|attached| attached.food.to_string())
            .unwrap_or_else(|| "-".to_string());
        debug!(
            "  {} {:?} {:?} pos({:.2}, {:.2}, {:.2}) food {}",
            anchor.id, entity, visibility, pose.position.x, pose.position.y, pose.position.z, food
        );
    }

    match selection.selected.and_then(|entity| meal_query.get(entity).ok()) {
        Some(meal) => debug!("  selected: {} component", meal.category),
        None => debug!("  selected: none"),
    }
}
