// ARCLS Services
// Business logic layer

mod events;
mod source_registry;
mod device_discovery;
mod scene_registry;
mod switcher;
mod hardware_switcher;
mod commerce;
mod graphics;
mod audio_engine;
mod compositor;
mod automation;
mod config_store;
mod settings_manager;
mod studio;

pub use events::*;
pub use source_registry::*;
pub use device_discovery::*;
pub use scene_registry::*;
pub use switcher::*;
pub use hardware_switcher::*;
pub use commerce::*;
pub use graphics::*;
pub use audio_engine::*;
pub use compositor::*;
pub use automation::*;
pub use config_store::*;
pub use settings_manager::*;
pub use studio::*;
