pub mod components;
pub mod plugin;
pub mod selectable;
pub mod systems;

pub use components::*;
pub use plugin::SelectionPlugin;
pub use selectable::{AttachedFood, SelectableState, SelectionOutcome};
