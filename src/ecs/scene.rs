/*!
# Scene Host

The seam between the overlay's bookkeeping and whatever actually owns scene
objects. Spawn table, reconciler and meal-component selection only ever
touch instances through this trait; the Bevy implementation below turns
each call into deferred [`Commands`].
*/

use bevy::prelude::*;

use crate::ecs::core::{AnchorId, AnchorVisibility, Pose};
use crate::ecs::plugins::registry::{FoodDefinition, MealTemplate};
use crate::ecs::plugins::selection::{AttachedTo, AttachmentSlot, FoodObject, MealComponent};
use crate::ecs::plugins::tracking::TrackedObjectBundle;

pub trait SceneHost {
    /// Creates the object overlaid on `anchor`, visible, at `pose`.
    fn instantiate(&mut self, anchor: AnchorId, template: &MealTemplate, pose: Pose) -> Entity;

    /// Destroys an object and everything attached to it.
    fn destroy(&mut self, instance: Entity);

    fn set_visibility(&mut self, instance: Entity, visibility: AnchorVisibility);

    fn set_pose(&mut self, instance: Entity, pose: Pose);

    /// Creates a food object owned by `owner` at `slot`.
    fn attach_content(&mut self, owner: Entity, food: &FoodDefinition, slot: AttachmentSlot) -> Entity;

    fn release_content(&mut self, content: Entity);

    /// Moves an existing food object onto another owner.
    fn reparent_content(&mut self, content: Entity, owner: Entity, slot: AttachmentSlot);
}

impl SceneHost for Commands<'_, '_> {
    fn instantiate(&mut self, anchor: AnchorId, template: &MealTemplate, pose: Pose) -> Entity {
        let mut instance = self.spawn(TrackedObjectBundle::new(anchor, template.id.clone(), pose));
        if template.selectable {
            instance.insert(MealComponent::from_template(template));
        }
        instance.id()
    }

    fn destroy(&mut self, instance: Entity) {
        if let Some(entity) = self.get_entity(instance) {
            entity.despawn_recursive();
        }
    }

    fn set_visibility(&mut self, instance: Entity, visibility: AnchorVisibility) {
        if let Some(mut entity) = self.get_entity(instance) {
            entity.insert(visibility);
        }
    }

    fn set_pose(&mut self, instance: Entity, pose: Pose) {
        if let Some(mut entity) = self.get_entity(instance) {
            entity.insert(pose);
        }
    }

    fn attach_content(&mut self, owner: Entity, food: &FoodDefinition, slot: AttachmentSlot) -> Entity {
        let content = self
            .spawn((
                FoodObject {
                    food: food.id.clone(),
                },
                AttachedTo { owner, slot },
            ))
            .id();
        self.entity(owner).add_child(content);
        content
    }

    fn release_content(&mut self, content: Entity) {
        if let Some(entity) = self.get_entity(content) {
            entity.despawn_recursive();
        }
    }

    fn reparent_content(&mut self, content: Entity, owner: Entity, slot: AttachmentSlot) {
        self.entity(content)
            .insert(AttachedTo { owner, slot })
            .set_parent(owner);
    }
}
