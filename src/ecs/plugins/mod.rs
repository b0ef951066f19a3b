pub mod debug;
pub mod registry;
pub mod selection;
pub mod tracking;

pub use debug::DebugPlugin;
pub use registry::RegistryPlugin;
pub use selection::SelectionPlugin;
pub use tracking::TrackingPlugin;

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

use crate::ecs::core::{CorePlugin, OverlayConfig};

/// Everything the overlay needs, configured from one [`OverlayConfig`].
#[derive(Default)]
pub struct MealOverlayPlugins {
    pub config: OverlayConfig,
}

impl MealOverlayPlugins {
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }
}

impl PluginGroup for MealOverlayPlugins {
    fn build(self) -> PluginGroupBuilder {
        let menu = self.config.menu.clone();
        PluginGroupBuilder::start::<Self>()
            .add(CorePlugin::new(self.config))
            .add(RegistryPlugin::new(menu))
            .add(TrackingPlugin)
            .add(SelectionPlugin)
            .add(DebugPlugin)
    }
}
