pub mod components;
pub mod plugin;
pub mod resources;

pub use components::{BindingEntry, CategoryTemplate, FoodDefinition, MealTemplate, MenuConfig, MenuResources};
pub use plugin::RegistryPlugin;
pub use resources::{BindingSource, FoodLibrary, IdentityRegistry, TemplateBinding, TemplateLibrary};
