pub mod plugin;
pub mod systems;

pub use plugin::DebugPlugin;
pub use systems::DebugTimer;
