// Preference and cache store for a daily comic-strip viewer.
// Dates, cached strip URLs, favorites, widget state and strip downloads.

pub mod date;
pub mod download;
pub mod error;
pub mod favorites;
pub mod quality;
pub mod store;

pub use date::{DATE_FORMAT, DateKey, TIME_ZONE, first_strip_date};
pub use error::{PrefsError, Result};
pub use quality::{Quality, to_high_quality, to_low_quality};
pub use store::{PreferenceStore, keys};
