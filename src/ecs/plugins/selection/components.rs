use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ecs::core::{FoodId, MealCategory};
use crate::ecs::plugins::registry::{FoodDefinition, MealTemplate};
use crate::ecs::plugins::selection::selectable::SelectableState;

// ============================================================================
// POLICY & SLOTS
// ============================================================================

/// What happens to a meal component's food when it is deselected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeselectPolicy {
    /// Food stays attached; only the highlight is cleared.
    #[default]
    KeepContent,
    /// Food is destroyed along with the highlight.
    DestroyContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentSlot {
    /// On the component's platform (platform shown).
    Platform,
    /// At the component's centre (platform hidden).
    Centre,
}

impl AttachmentSlot {
    pub fn for_food(food: &FoodDefinition) -> Self {
        if food.requires_platform {
            AttachmentSlot::Platform
        } else {
            AttachmentSlot::Centre
        }
    }
}

// ============================================================================
// COMPONENTS
// ============================================================================

/// A selectable meal component spawned on a tracked anchor.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct MealComponent {
    pub category: MealCategory,
    pub selection: SelectableState,
}

impl MealComponent {
    pub fn from_template(template: &MealTemplate) -> Self {
        Self {
            category: template.category,
            selection: SelectableState::new(template.food.clone(), template.deselect_policy),
        }
    }
}

/// A food model attached to a meal component.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct FoodObject {
    pub food: FoodId,
}

/// Back-reference from a food object to the meal component that owns it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachedTo {
    pub owner: Entity,
    pub slot: AttachmentSlot,
}

// ============================================================================
// RESOURCES
// ============================================================================

/// The single currently selected meal component, if any.
#[derive(Resource, Debug, Default)]
pub struct SelectionState {
    pub selected: Option<Entity>,
}

// ============================================================================
// EVENTS
// ============================================================================

/// One user tap, already hit-tested to the entity under it (if any).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractEvent {
    pub hit: Option<Entity>,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChanged {
    pub selected: Option<Entity>,
    pub category: Option<MealCategory>,
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SelectedFoodChanged {
    pub owner: Entity,
    pub food: Option<FoodId>,
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum FoodRequest {
    /// Replace whatever food `target` holds with `food`.
    Swap { target: Entity, food: FoodId },
    /// Move the food held by `from` onto `to`.
    Transfer { from: Entity, to: Entity },
    Clear { target: Entity },
}
