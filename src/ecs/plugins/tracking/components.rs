use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};

use crate::ecs::core::{AnchorId, AnchorVisibility, Pose, SpawnedFrom, TemplateId, TrackedAnchor, TrackingQuality};

// ============================================================================
// TRACKING INPUT
// ============================================================================

/// One anchor as seen by the tracking subsystem in one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorObservation {
    pub anchor: AnchorId,
    pub pose: Pose,
    pub quality: TrackingQuality,
}

impl AnchorObservation {
    pub fn new(anchor: AnchorId, pose: Pose, quality: TrackingQuality) -> Self {
        Self { anchor, pose, quality }
    }

    pub fn tracking(anchor: AnchorId, pose: Pose) -> Self {
        Self::new(anchor, pose, TrackingQuality::Tracking)
    }
}

/// Everything the tracking subsystem reported for one cycle.
#[derive(Event, Debug, Clone, Default, PartialEq)]
pub struct TrackingBatch {
    pub added: Vec<AnchorObservation>,
    pub updated: Vec<AnchorObservation>,
    pub removed: Vec<AnchorId>,
}

impl TrackingBatch {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    pub fn with_added(mut self, observation: AnchorObservation) -> Self {
        self.added.push(observation);
        self
    }

    pub fn with_updated(mut self, observation: AnchorObservation) -> Self {
        self.updated.push(observation);
        self
    }

    pub fn with_removed(mut self, anchor: AnchorId) -> Self {
        self.removed.push(anchor);
        self
    }
}

/// Channel end on which the tracking thread delivers its batches.
#[derive(Resource)]
pub struct TrackingFeed {
    pub receiver: Receiver<TrackingBatch>,
}

impl TrackingFeed {
    pub fn channel() -> (Sender<TrackingBatch>, Self) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (sender, Self { receiver })
    }
}

// ============================================================================
// SPAWNED OBJECTS
// ============================================================================

#[derive(Bundle)]
pub struct TrackedObjectBundle {
    pub anchor: TrackedAnchor,
    pub spawned_from: SpawnedFrom,
    pub pose: Pose,
    pub visibility: AnchorVisibility,
}

impl TrackedObjectBundle {
    pub fn new(anchor: AnchorId, template: TemplateId, pose: Pose) -> Self {
        Self {
            anchor: TrackedAnchor { id: anchor },
            spawned_from: SpawnedFrom { template },
            pose,
            visibility: AnchorVisibility::Visible,
        }
    }
}

// ============================================================================
// EVENTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Spawned,
    Shown,
    Moved,
    Hidden,
    Removed,
    /// The anchor's template was replaced; `previous` has been destroyed.
    Swapped { previous: Entity },
}

/// A lifecycle change applied to one anchor's object.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorTransition {
    pub anchor: AnchorId,
    pub instance: Entity,
    pub kind: TransitionKind,
}

/// Rebinds an anchor to another template, respawning its object if live.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TemplateSwapRequest {
    pub anchor: AnchorId,
    pub template: TemplateId,
}

/// Releases every spawned object, as on shutdown.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ReleaseAllAnchors;
