// Preference store module.
// Persistent flat key/value map plus the typed views built on top of it.

pub mod backend;
pub mod keys;
pub mod paths;
pub mod preferences;
pub mod settings;
pub mod strips;

pub use backend::{Backend, JsonFileBackend, MemoryBackend, PrefMap, PrefValue};
pub use preferences::{Editor, PreferenceStore};
pub use settings::{Orientation, Settings};
pub use strips::PendingMove;
