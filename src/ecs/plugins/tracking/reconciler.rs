/*!
# Tracking Reconciler

Turns one cycle's tracking batch into spawn-table transitions.

Per anchor the lifecycle is `Unseen -> Tracking <-> Hidden -> Removed`:

- `added` spawns the anchor's template unless a record already exists.
- `updated` with full tracking shows and moves the object; any weaker
  quality hides it (after the configured grace) without destroying it.
- `removed` destroys the object and forgets the anchor. A later `added`
  starts over with a fresh instance.

A batch is applied as added, then updated, then removed, so a same-cycle
removal always wins. Each anchor is handled independently; a failure is
logged, recorded in the report and the rest of the batch still runs.
*/

use bevy::prelude::*;

use crate::ecs::core::{AnchorId, AnchorVisibility, OverlayError, TrackingQuality};
use crate::ecs::plugins::registry::{IdentityRegistry, TemplateLibrary};
use crate::ecs::plugins::tracking::components::{
    AnchorObservation, AnchorTransition, TrackingBatch, TransitionKind,
};
use crate::ecs::plugins::tracking::spawn_table::SpawnTable;
use crate::ecs::scene::SceneHost;

/// What one reconciliation pass did.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReconcileReport {
    pub transitions: Vec<AnchorTransition>,
    /// Per-anchor faults that were contained during the pass.
    pub errors: Vec<OverlayError>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn count(&self, kind: TransitionKind) -> usize {
        self.transitions.iter().filter(|t| t.kind == kind).count()
    }

    fn record(&mut self, outcome: Result<Option<AnchorTransition>, OverlayError>) {
        match outcome {
            Ok(Some(transition)) => self.transitions.push(transition),
            Ok(None) => {}
            Err(err) => {
                warn!("{err}; skipped this cycle");
                self.errors.push(err);
            }
        }
    }
}

pub struct TrackingReconciler<'a> {
    registry: &'a IdentityRegistry,
    templates: &'a TemplateLibrary,
    grace_cycles: u32,
}

impl<'a> TrackingReconciler<'a> {
    pub fn new(registry: &'a IdentityRegistry, templates: &'a TemplateLibrary) -> Self {
        Self {
            registry,
            templates,
            grace_cycles: 0,
        }
    }

    /// Number of consecutive non-tracking updates tolerated before hiding.
    pub fn with_grace_cycles(mut self, grace_cycles: u32) -> Self {
        self.grace_cycles = grace_cycles;
        self
    }

    pub fn apply(
        &self,
        table: &mut SpawnTable,
        batch: &TrackingBatch,
        host: &mut impl SceneHost,
    ) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        for observation in &batch.added {
            report.record(self.on_added(table, observation, host));
        }
        for observation in &batch.updated {
            report.record(self.on_updated(table, observation, host));
        }
        for &anchor in &batch.removed {
            report.record(Ok(self.on_removed(table, anchor, host)));
        }

        report
    }

    fn on_added(
        &self,
        table: &mut SpawnTable,
        observation: &AnchorObservation,
        host: &mut impl SceneHost,
    ) -> Result<Option<AnchorTransition>, OverlayError> {
        let anchor = observation.anchor;
        if let Some(existing) = table.instance(anchor) {
            debug!("anchor {anchor} added again, keeping instance {existing:?}");
            return Ok(None);
        }

        let binding = self.registry.resolve_template(anchor)?;
        let template = self
            .templates
            .get(&binding.template)
            .ok_or_else(|| OverlayError::UnknownTemplate {
                anchor,
                template: binding.template.clone(),
            })?;

        let record = table.create(anchor, template, observation.pose, host)?;
        info!(
            "spawned '{}' ({}) for anchor {anchor} as {:?}",
            record.template, binding.category, record.instance
        );
        Ok(Some(AnchorTransition {
            anchor,
            instance: record.instance,
            kind: TransitionKind::Spawned,
        }))
    }

    fn on_updated(
        &self,
        table: &mut SpawnTable,
        observation: &AnchorObservation,
        host: &mut impl SceneHost,
    ) -> Result<Option<AnchorTransition>, OverlayError> {
        let anchor = observation.anchor;
        let Some(instance) = table.instance(anchor) else {
            return Err(OverlayError::UnknownIdentityUpdate(anchor));
        };

        let kind = match observation.quality {
            TrackingQuality::Tracking => {
                let shown = table.set_visibility(anchor, AnchorVisibility::Visible, host);
                let moved = table.update_pose(anchor, observation.pose, host);
                if shown {
                    debug!("anchor {anchor} reacquired");
                    TransitionKind::Shown
                } else if moved {
                    TransitionKind::Moved
                } else {
                    return Ok(None);
                }
            }
            TrackingQuality::Limited | TrackingQuality::None => {
                let lost = table.mark_lost(anchor).unwrap_or_default();
                if lost <= self.grace_cycles {
                    return Ok(None);
                }
                if !table.set_visibility(anchor, AnchorVisibility::Hidden, host) {
                    return Ok(None);
                }
                debug!("anchor {anchor} lost tracking ({:?}), hiding", observation.quality);
                TransitionKind::Hidden
            }
        };

        Ok(Some(AnchorTransition {
            anchor,
            instance,
            kind,
        }))
    }

    fn on_removed(
        &self,
        table: &mut SpawnTable,
        anchor: AnchorId,
        host: &mut impl SceneHost,
    ) -> Option<AnchorTransition> {
        let Some(record) = table.remove(anchor, host) else {
            debug!("anchor {anchor} removed with no live instance");
            return None;
        };
        info!("removed anchor {anchor}, destroyed {:?}", record.instance);
        Some(AnchorTransition {
            anchor,
            instance: record.instance,
            kind: TransitionKind::Removed,
        })
    }
}
