use bevy::prelude::*;

use crate::ecs::core::{FoodId, OverlayError};
use crate::ecs::plugins::registry::{FoodDefinition, FoodLibrary};
use crate::ecs::plugins::selection::components::{AttachmentSlot, DeselectPolicy};
use crate::ecs::scene::SceneHost;

/// The food object a meal component currently owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFood {
    pub content: Entity,
    pub food: FoodId,
    pub slot: AttachmentSlot,
}

/// Result of a selection change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub changed: bool,
    pub attached: Option<FoodId>,
    pub released: Option<FoodId>,
}

/// Selection state of one meal component.
///
/// Owns at most one attached food object. Anything that would attach a
/// second one releases (or refuses) first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectableState {
    selected: bool,
    configured_food: Option<FoodId>,
    attached: Option<AttachedFood>,
    platform_visible: bool,
    policy: DeselectPolicy,
}

impl SelectableState {
    pub fn new(configured_food: Option<FoodId>, policy: DeselectPolicy) -> Self {
        Self {
            selected: false,
            configured_food,
            attached: None,
            platform_visible: true,
            policy,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// The highlight follows selection.
    pub fn is_highlighted(&self) -> bool {
        self.selected
    }

    pub fn attached(&self) -> Option<&AttachedFood> {
        self.attached.as_ref()
    }

    pub fn configured_food(&self) -> Option<&FoodId> {
        self.configured_food.as_ref()
    }

    pub fn platform_visible(&self) -> bool {
        self.platform_visible
    }

    pub fn policy(&self) -> DeselectPolicy {
        self.policy
    }

    /// Selects and, the first time, attaches the configured food.
    /// Selecting an already selected component does nothing.
    pub fn select(&mut self, owner: Entity, foods: &FoodLibrary, host: &mut impl SceneHost) -> SelectionOutcome {
        if self.selected {
            return SelectionOutcome::default();
        }
        self.selected = true;

        let mut outcome = SelectionOutcome {
            changed: true,
            ..default()
        };
        if self.attached.is_some() {
            return outcome;
        }
        let Some(food) = self.configured_food.clone() else {
            return outcome;
        };
        match foods.get(&food) {
            Some(definition) => {
                self.attach(owner, definition, host);
                outcome.attached = Some(food);
            }
            None => warn!("{}; {owner:?} selected without food", OverlayError::UnknownFood(food)),
        }
        outcome
    }

    pub fn deselect(&mut self, host: &mut impl SceneHost) -> SelectionOutcome {
        if !self.selected {
            return SelectionOutcome::default();
        }
        self.selected = false;
        let released = match self.policy {
            DeselectPolicy::KeepContent => None,
            DeselectPolicy::DestroyContent => self.clear_food(host),
        };
        SelectionOutcome {
            changed: true,
            attached: None,
            released,
        }
    }

    pub fn toggle_selection(
        &mut self,
        owner: Entity,
        foods: &FoodLibrary,
        host: &mut impl SceneHost,
    ) -> SelectionOutcome {
        if self.selected {
            self.deselect(host)
        } else {
            self.select(owner, foods, host)
        }
    }

    /// Releases the current food (if any) and attaches `food` in its place.
    /// Returns the food that was released.
    pub fn swap_food(
        &mut self,
        owner: Entity,
        food: &FoodId,
        foods: &FoodLibrary,
        host: &mut impl SceneHost,
    ) -> Result<Option<FoodId>, OverlayError> {
        let definition = foods
            .get(food)
            .ok_or_else(|| OverlayError::UnknownFood(food.clone()))?;
        let previous = self.clear_food(host);
        self.attach(owner, definition, host);
        self.configured_food = Some(food.clone());
        Ok(previous)
    }

    /// Destroys the attached food, if any.
    pub fn clear_food(&mut self, host: &mut impl SceneHost) -> Option<FoodId> {
        let attached = self.attached.take()?;
        host.release_content(attached.content);
        Some(attached.food)
    }

    /// Moves this component's food onto `target`. The source gives up the
    /// food in the same step the target takes it.
    pub fn transfer_food_to(
        &mut self,
        source: Entity,
        target_state: &mut SelectableState,
        target: Entity,
        foods: &FoodLibrary,
        host: &mut impl SceneHost,
    ) -> Result<FoodId, OverlayError> {
        if target_state.attached.is_some() {
            return Err(OverlayError::SlotOccupied(target));
        }
        let attached = self
            .attached
            .take()
            .ok_or(OverlayError::NoAttachedContent(source))?;

        let slot = foods
            .get(&attached.food)
            .map(AttachmentSlot::for_food)
            .unwrap_or(attached.slot);
        host.reparent_content(attached.content, target, slot);
        target_state.platform_visible = slot == AttachmentSlot::Platform;

        let food = attached.food.clone();
        target_state.attached = Some(AttachedFood { slot, ..attached });
        Ok(food)
    }

    fn attach(&mut self, owner: Entity, food: &FoodDefinition, host: &mut impl SceneHost) {
        debug_assert!(self.attached.is_none(), "meal component already owns a food object");
        let slot = AttachmentSlot::for_food(food);
        self.platform_visible = slot == AttachmentSlot::Platform;
        let content = host.attach_content(owner, food, slot);
        self.attached = Some(AttachedFood {
            content,
            food: food.id.clone(),
            slot,
        });
    }
}
