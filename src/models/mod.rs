// ARCLS Models
// Data structures shared by the engines and persisted configuration

mod source;
mod scene;
mod switcher;
mod overlay;
mod commerce;
mod audio;
mod rtmp;
mod automation;
mod settings;

pub use source::*;
pub use scene::*;
pub use switcher::*;
pub use overlay::*;
pub use commerce::*;
pub use audio::*;
pub use rtmp::*;
pub use automation::*;
pub use settings::*;
