mod balloons;
mod clouds;
mod core;
mod hud;
mod scenery;
mod sync;

pub use balloons::BalloonsPlugin;
pub use clouds::CloudsPlugin;
pub use core::CorePlugin;
pub(crate) use core::UpdateSet;
pub use hud::HudPlugin;
pub use scenery::SceneryPlugin;
pub use sync::SyncPlugin;
