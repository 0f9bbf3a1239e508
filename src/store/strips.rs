// Strip state kept in the preference store.
// Last viewed date, resolved URL cache, widget dates and pending file moves.

use std::path::Path;

use crate::date::DateKey;
use crate::error::Result;

use super::keys;
use super::paths;
use super::preferences::PreferenceStore;

/// A staged download waiting to be moved to its intended destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    /// Strip date with underscores, as it appears in the key.
    pub date: String,
    /// `file://` URI of the intended destination.
    pub destination: String,
}

impl PreferenceStore {
    /// Last viewed strip, or today when nothing is stored or the viewer
    /// should open at the latest strip.
    pub fn current_date(&self) -> Result<DateKey> {
        match self.get_string(keys::CURRENT_DATE, None) {
            Some(saved) if !self.is_open_at_latest_strip() => DateKey::parse(&saved),
            _ => Ok(DateKey::today()),
        }
    }

    pub fn save_current_date(&self, date: DateKey) -> bool {
        self.set_string(keys::CURRENT_DATE, &date.to_string())
    }

    /// Most recently resolved strip URL.
    pub fn current_url(&self) -> Option<String> {
        self.get_string(keys::CURRENT_URL, None)
    }

    /// Record a resolved URL as both the current URL and the date's cache entry.
    pub fn save_current_url(&self, date: DateKey, url: &str) -> bool {
        self.edit()
            .put_string(keys::CURRENT_URL, url)
            .put_string(&keys::cache_key(date), url)
            .commit()
    }

    pub fn cached_url(&self, date: DateKey) -> Option<String> {
        self.cached_url_for_key(&keys::cache_key(date))
    }

    /// Cached URL by raw date string.
    pub fn cached_url_for_key(&self, date: &str) -> Option<String> {
        self.get_string(date, None)
    }

    /// Drop the cached URL for `date` so it is resolved again.
    pub fn remove_cache(&self, date: DateKey) -> bool {
        self.remove(&keys::cache_key(date))
    }

    /// Store the date selected in a widget. The date is clamped first.
    pub fn save_date_for_widget(&self, widget_id: i32, date: DateKey) -> bool {
        let date = date.validate();
        self.set_string(&keys::widget_key(widget_id), &date.to_string())
    }

    /// Date shown by a widget, or today when unset or pinned to the latest strip.
    pub fn date_for_widget(&self, widget_id: i32) -> Result<DateKey> {
        match self.get_string(&keys::widget_key(widget_id), None) {
            Some(saved) if !self.is_widget_always_show_latest() => DateKey::parse(&saved),
            _ => Ok(DateKey::today()),
        }
    }

    /// Forget a widget after it is removed from its host.
    pub fn delete_date_for_widget(&self, widget_id: i32) -> bool {
        self.remove(&keys::widget_key(widget_id))
    }

    /// Record that the strip staged for `date` belongs at `destination`.
    pub fn schedule_move(&self, date: DateKey, destination: &Path) -> bool {
        self.set_string(&keys::move_key(&date.to_string()), &paths::file_uri(destination))
    }

    /// Intended destination for a staged strip, by `YYYY-MM-DD` date.
    pub fn scheduled_target_path(&self, date: &str) -> Option<String> {
        self.get_string(&keys::move_key(date), None)
    }

    pub fn remove_pending_move(&self, date: &str) -> bool {
        self.remove(&keys::move_key(date))
    }

    /// Every recorded move, ordered by key.
    pub fn pending_moves(&self) -> Vec<PendingMove> {
        self.entries_with_prefix(keys::MOVE_PREFIX)
            .into_iter()
            .filter_map(|(date, value)| {
                value.as_str().map(|destination| PendingMove {
                    date,
                    destination: destination.to_string(),
                })
            })
            .collect()
    }
}
