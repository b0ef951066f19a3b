use bevy::prelude::*;

use crate::ecs::core::OverlayConfig;
use crate::ecs::plugins::registry::{IdentityRegistry, TemplateLibrary};
use crate::ecs::plugins::tracking::components::*;
use crate::ecs::plugins::tracking::reconciler::TrackingReconciler;
use crate::ecs::plugins::tracking::spawn_table::SpawnTable;

/// Moves batches from the tracking thread onto the event queue, in arrival order.
pub fn drain_tracking_feed_system(
    feed: Option<Res<TrackingFeed>>,
    mut batches: EventWriter<TrackingBatch>,
) {
    let Some(feed) = feed else {
        return;
    };
    for batch in feed.receiver.try_iter() {
        if !batch.is_empty() {
            batches.send(batch);
        }
    }
}

/// Applies every pending batch, one full pass per batch.
pub fn reconcile_tracking_system(
    mut commands: Commands,
    mut batches: EventReader<TrackingBatch>,
    registry: Res<IdentityRegistry>,
    templates: Res<TemplateLibrary>,
    config: Res<OverlayConfig>,
    mut table: ResMut<SpawnTable>,
    mut transitions: EventWriter<AnchorTransition>,
) {
    let reconciler = TrackingReconciler::new(&registry, &templates)
        .with_grace_cycles(config.lost_tracking_grace_cycles);

    for batch in batches.read() {
        let report = reconciler.apply(&mut table, batch, &mut commands);
        transitions.send_batch(report.transitions);
    }
}

pub fn template_swap_system(
    mut commands: Commands,
    mut requests: EventReader<TemplateSwapRequest>,
    mut registry: ResMut<IdentityRegistry>,
    templates: Res<TemplateLibrary>,
    mut table: ResMut<SpawnTable>,
    mut transitions: EventWriter<AnchorTransition>,
) {
    for request in requests.read() {
        let Some(template) = templates.get(&request.template) else {
            warn!(
                "cannot swap anchor {} to unknown template '{}'",
                request.anchor, request.template
            );
            continue;
        };

        registry.set_template_override(request.anchor, request.template.clone());

        match table.replace_template(request.anchor, template, &mut commands) {
            Some((previous, instance)) => {
                info!(
                    "anchor {} now shows '{}' ({:?} replaced {:?})",
                    request.anchor, request.template, instance, previous
                );
                transitions.send(AnchorTransition {
                    anchor: request.anchor,
                    instance,
                    kind: TransitionKind::Swapped { previous },
                });
            }
            None => debug!(
                "anchor {} not live, '{}' will be used on next sighting",
                request.anchor, request.template
            ),
        }
    }
}

/// Releases every spawned object on app exit or on request.
pub fn teardown_system(
    mut commands: Commands,
    mut exits: EventReader<AppExit>,
    mut releases: EventReader<ReleaseAllAnchors>,
    mut table: ResMut<SpawnTable>,
    mut transitions: EventWriter<AnchorTransition>,
) {
    let requested = exits.read().count() + releases.read().count();
    if requested == 0 || table.is_empty() {
        return;
    }

    let released = table.clear(&mut commands);
    info!("released {} tracked objects", released.len());
    transitions.send_batch(released.into_iter().map(|record| AnchorTransition {
        anchor: record.anchor,
        instance: record.instance,
        kind: TransitionKind::Removed,
    }));
}
