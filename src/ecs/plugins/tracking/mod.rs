pub mod components;
pub mod plugin;
pub mod reconciler;
pub mod spawn_table;
pub mod systems;

pub use components::*;
pub use plugin::TrackingPlugin;
pub use reconciler::{ReconcileReport, TrackingReconciler};
pub use spawn_table::{SpawnRecord, SpawnTable};
