pub mod components;
pub mod error;
pub mod plugin;
pub mod resources;

pub use components::*;
pub use error::{ConfigError, OverlayError};
pub use plugin::{CorePlugin, OverlaySet};
pub use resources::OverlayConfig;
