use bevy::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::ecs::core::{AnchorId, AnchorVisibility, OverlayError, Pose, TemplateId};
use crate::ecs::plugins::registry::MealTemplate;
use crate::ecs::scene::SceneHost;

/// The live object owned for one anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRecord {
    pub anchor: AnchorId,
    pub instance: Entity,
    pub template: TemplateId,
    pub visibility: AnchorVisibility,
    /// Last pose applied while visible.
    pub pose: Pose,
    /// Consecutive cycles reported without full tracking.
    pub lost_cycles: u32,
}

/// Anchor identity -> owned spawned object. At most one record per anchor.
///
/// The table is the sole owner of every instance it records: instances are
/// only destroyed through [`SpawnTable::remove`], [`SpawnTable::replace_template`]
/// or [`SpawnTable::clear`].
#[derive(Resource, Debug, Default)]
pub struct SpawnTable {
    records: HashMap<AnchorId, SpawnRecord>,
}

impl SpawnTable {
    pub fn has(&self, anchor: AnchorId) -> bool {
        self.records.contains_key(&anchor)
    }

    pub fn get(&self, anchor: AnchorId) -> Option<&SpawnRecord> {
        self.records.get(&anchor)
    }

    pub fn instance(&self, anchor: AnchorId) -> Option<Entity> {
        self.records.get(&anchor).map(|record| record.instance)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpawnRecord> {
        self.records.values()
    }

    pub fn visible_count(&self) -> usize {
        self.records
            .values()
            .filter(|record| record.visibility.is_visible())
            .count()
    }

    /// Instantiates `template` for `anchor` at `pose`, initially visible.
    ///
    /// Refuses (and logs) if the anchor already has a record.
    pub fn create(
        &mut self,
        anchor: AnchorId,
        template: &MealTemplate,
        pose: Pose,
        host: &mut impl SceneHost,
    ) -> Result<&SpawnRecord, OverlayError> {
        match self.records.entry(anchor) {
            Entry::Occupied(existing) => {
                warn!(
                    "refusing second spawn for anchor {anchor}: instance {:?} is live",
                    existing.get().instance
                );
                Err(OverlayError::DuplicateSpawnAttempt(anchor))
            }
            Entry::Vacant(slot) => {
                let instance = host.instantiate(anchor, template, pose);
                Ok(slot.insert(SpawnRecord {
                    anchor,
                    instance,
                    template: template.id.clone(),
                    visibility: AnchorVisibility::Visible,
                    pose,
                    lost_cycles: 0,
                }))
            }
        }
    }

    /// Returns `true` if the visibility changed. Becoming visible resets the
    /// lost-tracking counter.
    pub fn set_visibility(
        &mut self,
        anchor: AnchorId,
        visibility: AnchorVisibility,
        host: &mut impl SceneHost,
    ) -> bool {
        let Some(record) = self.records.get_mut(&anchor) else {
            return false;
        };
        if visibility.is_visible() {
            record.lost_cycles = 0;
        }
        if record.visibility == visibility {
            return false;
        }
        record.visibility = visibility;
        host.set_visibility(record.instance, visibility);
        true
    }

    /// Moves a visible object. Hidden objects keep their last pose.
    pub fn update_pose(&mut self, anchor: AnchorId, pose: Pose, host: &mut impl SceneHost) -> bool {
        let Some(record) = self.records.get_mut(&anchor) else {
            return false;
        };
        if !record.visibility.is_visible() || record.pose == pose {
            return false;
        }
        record.pose = pose;
        host.set_pose(record.instance, pose);
        true
    }

    /// Counts one more cycle without full tracking; returns the new count.
    pub fn mark_lost(&mut self, anchor: AnchorId) -> Option<u32> {
        self.records.get_mut(&anchor).map(|record| {
            record.lost_cycles = record.lost_cycles.saturating_add(1);
            record.lost_cycles
        })
    }

    /// Destroys the anchor's object and forgets it. Absent anchors are a no-op.
    pub fn remove(&mut self, anchor: AnchorId, host: &mut impl SceneHost) -> Option<SpawnRecord> {
        let record = self.records.remove(&anchor)?;
        host.destroy(record.instance);
        Some(record)
    }

    /// Swaps the anchor's object for a fresh instance of `template` at the
    /// same pose and visibility. Returns `(previous, replacement)`.
    pub fn replace_template(
        &mut self,
        anchor: AnchorId,
        template: &MealTemplate,
        host: &mut impl SceneHost,
    ) -> Option<(Entity, Entity)> {
        let record = self.records.get_mut(&anchor)?;
        let previous = record.instance;
        let replacement = host.instantiate(anchor, template, record.pose);
        if !record.visibility.is_visible() {
            host.set_visibility(replacement, record.visibility);
        }
        host.destroy(previous);
        record.instance = replacement;
        record.template = template.id.clone();
        Some((previous, replacement))
    }

    /// Releases every record, destroying all owned objects.
    pub fn clear(&mut self, host: &mut impl SceneHost) -> Vec<SpawnRecord> {
        let released: Vec<SpawnRecord> = self.records.drain().map(|(_, record)| record).collect();
        for record in &released {
            host.destroy(record.instance);
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::core::MealCategory;
    use crate::ecs::scene::testing::RecordingHost;

    fn template() -> MealTemplate {
        MealTemplate::new("main_plate", MealCategory::MainDish)
    }

    #[test]
    fn create_refuses_second_record_for_same_anchor() {
        let mut table = SpawnTable::default();
        let mut host = RecordingHost::default();
        let anchor = AnchorId::from_u128(1);

        let first = table.create(anchor, &template(), Pose::at(1.0, 0.0, 0.0), &mut host).unwrap().instance;
        let second = table.create(anchor, &template(), Pose::at(2.0, 0.0, 0.0), &mut host);

        assert_eq!(second, Err(OverlayError::DuplicateSpawnAttempt(anchor)));
        assert_eq!(host.instantiated.len(), 1);
        assert_eq!(table.instance(anchor), Some(first));
        assert_eq!(table.get(anchor).unwrap().pose, Pose::at(1.0, 0.0, 0.0));
    }

    #[test]
    fn visibility_changes_are_idempotent() {
        let mut table = SpawnTable::default();
        let mut host = RecordingHost::default();
        let anchor = AnchorId::from_u128(1);
        table.create(anchor, &template(), Pose::IDENTITY, &mut host).unwrap();

        assert!(table.set_visibility(anchor, AnchorVisibility::Hidden, &mut host));
        assert!(!table.set_visibility(anchor, AnchorVisibility::Hidden, &mut host));
        assert_eq!(table.visible_count(), 0);
        assert!(!table.set_visibility(AnchorId::from_u128(2), AnchorVisibility::Hidden, &mut host));
    }

    #[test]
    fn hidden_record_ignores_pose_updates() {
        let mut table = SpawnTable::default();
        let mut host = RecordingHost::default();
        let anchor = AnchorId::from_u128(1);
        let instance = table.create(anchor, &template(), Pose::IDENTITY, &mut host).unwrap().instance;

        table.set_visibility(anchor, AnchorVisibility::Hidden, &mut host);
        assert!(!table.update_pose(anchor, Pose::at(5.0, 5.0, 5.0), &mut host));
        assert_eq!(table.get(anchor).unwrap().pose, Pose::IDENTITY);
        assert_eq!(host.poses[&instance], Pose::IDENTITY);

        table.set_visibility(anchor, AnchorVisibility::Visible, &mut host);
        assert!(table.update_pose(anchor, Pose::at(5.0, 5.0, 5.0), &mut host));
        assert_eq!(host.poses[&instance], Pose::at(5.0, 5.0, 5.0));
    }

    #[test]
    fn remove_twice_destroys_once() {
        let mut table = SpawnTable::default();
        let mut host = RecordingHost::default();
        let anchor = AnchorId::from_u128(1);
        let instance = table.create(anchor, &template(), Pose::IDENTITY, &mut host).unwrap().instance;

        assert!(table.remove(anchor, &mut host).is_some());
        assert!(table.remove(anchor, &mut host).is_none());
        assert!(table.remove(AnchorId::from_u128(9), &mut host).is_none());
        assert_eq!(host.destroy_count(instance), 1);
        assert!(!table.has(anchor));
    }

    #[test]
    fn replace_template_keeps_pose_and_hidden_state() {
        let mut table = SpawnTable::default();
        let mut host = RecordingHost::default();
        let anchor = AnchorId::from_u128(1);
        table.create(anchor, &template(), Pose::at(0.0, 1.0, 0.0), &mut host).unwrap();
        table.set_visibility(anchor, AnchorVisibility::Hidden, &mut host);

        let swapped = MealTemplate::new("side_bowl", MealCategory::SideDish);
        let (previous, replacement) = table.replace_template(anchor, &swapped, &mut host).unwrap();

        assert_ne!(previous, replacement);
        assert_eq!(host.destroy_count(previous), 1);
        assert_eq!(host.poses[&replacement], Pose::at(0.0, 1.0, 0.0));
        assert_eq!(host.visibility[&replacement], AnchorVisibility::Hidden);
        let record = table.get(anchor).unwrap();
        assert_eq!(record.instance, replacement);
        assert_eq!(record.template, TemplateId::new("side_bowl"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn clear_releases_everything() {
        let mut table = SpawnTable::default();
        let mut host = RecordingHost::default();
        for n in 1..=3 {
            table.create(AnchorId::from_u128(n), &template(), Pose::IDENTITY, &mut host).unwrap();
        }

        let released = table.clear(&mut host);
        assert_eq!(released.len(), 3);
        assert!(table.is_empty());
        assert!(host.live.is_empty());
    }
}
