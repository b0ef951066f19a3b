use bevy::prelude::*;

use crate::ecs::core::OverlaySet;
use crate::ecs::plugins::selection::components::*;
use crate::ecs::plugins::selection::systems::*;

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<InteractEvent>()
            .add_event::<SelectionChanged>()
            .add_event::<SelectedFoodChanged>()
            .add_event::<FoodRequest>()
            .insert_resource(SelectionState::default())
            .add_systems(
                Update,
                (
                    selection_lifecycle_system,
                    interaction_system,
                    food_request_system,
                )
                    .chain()
                    .in_set(OverlaySet::Selection),
            );
    }
}
