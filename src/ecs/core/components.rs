use bevy::prelude::*;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// IDENTITY
// ============================================================================

/// Stable identity of a physical reference image.
///
/// This is the reference-image GUID, not the per-frame tracking handle, so it
/// survives pose updates, tracking loss and reacquisition of the same marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorId(pub Uuid);

impl AnchorId {
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a spawnable template (the prefab a tracked image overlays).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoodId(pub String);

impl FoodId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// MEAL CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum MealCategory {
    #[default]
    MainDish,
    SideDish,
    Beverage,
    Dessert,
}

impl MealCategory {
    pub fn label(&self) -> &'static str {
        match self {
            MealCategory::MainDish => "Main Dish",
            MealCategory::SideDish => "Side Dish",
            MealCategory::Beverage => "Beverage",
            MealCategory::Dessert => "Dessert",
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// POSE & TRACKING STATE
// ============================================================================

/// World-space placement of an anchor (and of the object spawned on it).
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            rotation: Quat::IDENTITY,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Tracking quality reported by the tracking subsystem for one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackingQuality {
    Tracking,
    Limited,
    None,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnchorVisibility {
    #[default]
    Visible,
    Hidden,
}

impl AnchorVisibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, AnchorVisibility::Visible)
    }
}

/// Marks an entity as the object spawned for a tracked anchor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedAnchor {
    pub id: AnchorId,
}

/// Template the tracked object was instantiated from.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct SpawnedFrom {
    pub template: TemplateId,
}
