use bevy::prelude::*;

use crate::ecs::plugins::registry::FoodLibrary;
use crate::ecs::plugins::selection::components::*;
use crate::ecs::plugins::tracking::{AnchorTransition, TransitionKind};

/// Resolves a hit to the meal component it belongs to.
///
/// Hitting a food object selects the meal component that owns it; anything
/// else is not selectable.
pub fn as_selectable(
    hit: Entity,
    meals: &Query<&mut MealComponent>,
    foods: &Query<&AttachedTo, With<FoodObject>>,
) -> Option<Entity> {
    if meals.contains(hit) {
        return Some(hit);
    }
    foods
        .get(hit)
        .ok()
        .map(|attached| attached.owner)
        .filter(|owner| meals.contains(*owner))
}

/// Clears the selection when the selected object is destroyed by tracking.
pub fn selection_lifecycle_system(
    mut transitions: EventReader<AnchorTransition>,
    mut selection: ResMut<SelectionState>,
    mut selection_changed: EventWriter<SelectionChanged>,
) {
    for transition in transitions.read() {
        let Some(selected) = selection.selected else {
            continue;
        };
        let destroyed = match transition.kind {
            TransitionKind::Removed => transition.instance,
            TransitionKind::Swapped { previous } => previous,
            _ => continue,
        };
        if destroyed == selected {
            debug!("selected {selected:?} left the scene ({:?})", transition.kind);
            selection.selected = None;
            selection_changed.send(SelectionChanged {
                selected: None,
                category: None,
            });
        }
    }
}

/// Applies user taps: one selected meal component at a time.
///
/// A tap on nothing clears the selection. A tap on something that is not a
/// meal component (or its food) leaves the selection as it is.
pub fn interaction_system(
    mut commands: Commands,
    mut interactions: EventReader<InteractEvent>,
    mut meals: Query<&mut MealComponent>,
    food_objects: Query<&AttachedTo, With<FoodObject>>,
    food_library: Res<FoodLibrary>,
    mut selection: ResMut<SelectionState>,
    mut selection_changed: EventWriter<SelectionChanged>,
    mut food_changed: EventWriter<SelectedFoodChanged>,
) {
    for interaction in interactions.read() {
        let target = match interaction.hit {
            None => None,
            Some(hit) => match as_selectable(hit, &meals, &food_objects) {
                Some(entity) => Some(entity),
                None => {
                    debug!("tap on {hit:?} ignored: not a meal component");
                    continue;
                }
            },
        };

        // Re-selecting the selected component changes nothing; its food is
        // already attached.
        if target == selection.selected {
            continue;
        }

        if let Some(previous) = selection.selected.take() {
            if let Ok(mut meal) = meals.get_mut(previous) {
                let outcome = meal.selection.deselect(&mut commands);
                if outcome.released.is_some() {
                    food_changed.send(SelectedFoodChanged { owner: previous, food: None });
                }
            }
        }

        let mut category = None;
        if let Some(entity) = target {
            if let Ok(mut meal) = meals.get_mut(entity) {
                let outcome = meal.selection.select(entity, &food_library, &mut commands);
                if let Some(food) = outcome.attached {
                    food_changed.send(SelectedFoodChanged {
                        owner: entity,
                        food: Some(food),
                    });
                }
                category = Some(meal.category);
            }
            selection.selected = Some(entity);
        }

        selection_changed.send(SelectionChanged {
            selected: target,
            category,
        });
    }
}

pub fn food_request_system(
    mut commands: Commands,
    mut requests: EventReader<FoodRequest>,
    mut meals: Query<&mut MealComponent>,
    food_library: Res<FoodLibrary>,
    mut food_changed: EventWriter<SelectedFoodChanged>,
) {
    for request in requests.read() {
        match request {
            FoodRequest::Swap { target, food } => {
                let Ok(mut meal) = meals.get_mut(*target) else {
                    warn!("food swap on {target:?} ignored: not a meal component");
                    continue;
                };
                match meal.selection.swap_food(*target, food, &food_library, &mut commands) {
                    Ok(previous) => {
                        debug!("{target:?} food {previous:?} -> {food}");
                        food_changed.send(SelectedFoodChanged {
                            owner: *target,
                            food: Some(food.clone()),
                        });
                    }
                    Err(err) => warn!("food swap on {target:?} failed: {err}"),
                }
            }
            FoodRequest::Transfer { from, to } => {
                let Ok([mut source, mut destination]) = meals.get_many_mut([*from, *to]) else {
                    warn!("food transfer {from:?} -> {to:?} ignored: both must be distinct meal components");
                    continue;
                };
                let result = source.selection.transfer_food_to(
                    *from,
                    &mut destination.selection,
                    *to,
                    &food_library,
                    &mut commands,
                );
                match result {
                    Ok(food) => {
                        food_changed.send(SelectedFoodChanged { owner: *from, food: None });
                        food_changed.send(SelectedFoodChanged {
                            owner: *to,
                            food: Some(food),
                        });
                    }
                    Err(err) => warn!("food transfer {from:?} -> {to:?} failed: {err}"),
                }
            }
            FoodRequest::Clear { target } => {
                let Ok(mut meal) = meals.get_mut(*target) else {
                    continue;
                };
                if meal.selection.clear_food(&mut commands).is_some() {
                    food_changed.send(SelectedFoodChanged {
                        owner: *target,
                        food: None,
                    });
                }
            }
        }
    }
}
