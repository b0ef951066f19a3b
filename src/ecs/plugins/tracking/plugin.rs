use bevy::prelude::*;

use crate::ecs::core::OverlaySet;
use crate::ecs::plugins::tracking::components::*;
use crate::ecs::plugins::tracking::spawn_table::SpawnTable;
use crate::ecs::plugins::tracking::systems::*;

pub struct TrackingPlugin;

impl Plugin for TrackingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TrackingBatch>()
            .add_event::<AnchorTransition>()
            .add_event::<TemplateSwapRequest>()
            .add_event::<ReleaseAllAnchors>()
            .insert_resource(SpawnTable::default())
            .add_systems(
                Update,
                (
                    drain_tracking_feed_system,
                    reconcile_tracking_system,
                    template_swap_system,
                )
                    .chain()
                    .in_set(OverlaySet::Tracking),
            )
            .add_systems(Last, teardown_system);
    }
}
