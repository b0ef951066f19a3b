use bevy::prelude::*;

use crate::ecs::core::OverlayConfig;

/// Ordering of the overlay's work inside one `Update` tick.
///
/// Tracking reconciliation always completes before selection input is
/// processed, so a selection never observes a half-applied batch.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlaySet {
    Tracking,
    Selection,
    Diagnostics,
}

pub struct CorePlugin {
    pub config: OverlayConfig,
}

impl CorePlugin {
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone())
            .configure_sets(
                Update,
                (
                    OverlaySet::Tracking,
                    OverlaySet::Selection,
                    OverlaySet::Diagnostics,
                )
                    .chain(),
            );
    }
}
