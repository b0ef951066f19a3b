use bevy::prelude::*;

use crate::ecs::plugins::registry::components::{MenuConfig, MenuResources};

/// Installs the identity registry and the template/food libraries.
pub struct RegistryPlugin {
    pub menu: MenuConfig,
}

impl RegistryPlugin {
    pub fn new(menu: MenuConfig) -> Self {
        Self { menu }
    }
}

impl Default for RegistryPlugin {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}

impl Plugin for RegistryPlugin {
    fn build(&self, app: &mut App) {
        // An invalid menu leaves the overlay running with nothing bound;
        // every anchor then fails resolution and is skipped per cycle.
        let resources = self.menu.build().unwrap_or_else(|err| {
            error!("menu configuration rejected: {err}");
            MenuResources::default()
        });

        info!(
            "registry ready: {} bindings, {} templates, default category {}",
            resources.registry.len(),
            resources.templates.len(),
            resources.registry.default_category()
        );

        app.insert_resource(resources.registry)
            .insert_resource(resources.templates)
            .insert_resource(resources.foods);
    }
}
