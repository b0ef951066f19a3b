pub mod core;
pub mod plugins;
pub mod scene;

pub use plugins::MealOverlayPlugins;
