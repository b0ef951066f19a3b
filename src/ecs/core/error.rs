use bevy::prelude::Entity;
use std::path::PathBuf;

use crate::ecs::core::components::{AnchorId, FoodId, TemplateId};

/// Faults raised while driving one anchor or one meal component.
///
/// All of these are contained to the identity (or entity) they name: the
/// reconciler logs them, records them in its report and moves on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OverlayError {
    #[error("anchor {0} already has a spawned instance")]
    DuplicateSpawnAttempt(AnchorId),

    #[error("update for anchor {0} which was never added")]
    UnknownIdentityUpdate(AnchorId),

    #[error("no template binding or category template for anchor {0}")]
    UnresolvableTemplate(AnchorId),

    #[error("anchor {anchor} resolved to template '{template}' which is not in the template library")]
    UnknownTemplate { anchor: AnchorId, template: TemplateId },

    #[error("food '{0}' is not in the food library")]
    UnknownFood(FoodId),

    #[error("meal component {0:?} already holds a food object")]
    SlotOccupied(Entity),

    #[error("meal component {0:?} holds no food object")]
    NoAttachedContent(Entity),

    #[error("entity {0:?} is not a meal component")]
    NotSelectable(Entity),
}

/// Errors while loading or importing menu configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("anchor {0} is bound more than once")]
    DuplicateBinding(AnchorId),

    #[error("template '{0}' is defined more than once")]
    DuplicateTemplate(TemplateId),

    #[error("food '{0}' is defined more than once")]
    DuplicateFood(FoodId),

    #[error("'{referenced_by}' references template '{template}' which is not defined")]
    MissingTemplate { template: TemplateId, referenced_by: String },

    #[error("template '{template}' references food '{food}' which is not defined")]
    MissingFood { food: FoodId, template: TemplateId },
}
