// Persisted key layout.
// Every key name and prefix lives here so the on-disk format stays fixed.

use crate::date::DateKey;

pub const CURRENT_DATE: &str = "dilbert_current_date";
pub const CURRENT_URL: &str = "dilbert_current_url";
pub const HIGH_QUALITY_ENABLED: &str = "dilbert_use_high_quality";
pub const DARK_LAYOUT: &str = "dilbert_dark_layout";
pub const DARK_WIDGET_LAYOUT: &str = "dilbert_dark_layout_widget";
pub const FORCE_LANDSCAPE: &str = "dilbert_force_landscape";
pub const HIDE_TOOLBARS: &str = "dilbert_hide_toolbars";
pub const DOWNLOAD_TARGET: &str = "dilbert_download_target_folder";
pub const SHARE_IMAGE: &str = "dilbert_share_with_image";
pub const SLOW_NETWORK: &str = "dilbert_using_slow_network";
pub const REVERSE_LANDSCAPE: &str = "dilbert_reverse_landscape";
pub const OPEN_AT_LATEST: &str = "dilbert_open_at_latest_strip";
pub const WIDGET_ALWAYS_SHOW_LATEST: &str = "dilbert_widget_always_show_latest";

pub const FAVORITE_PREFIX: &str = "favorite_";
pub const WIDGET_PREFIX: &str = "widget_";
pub const MOVE_PREFIX: &str = "move_";

/// Cached URL entries are keyed by the bare date string.
pub fn cache_key(date: DateKey) -> String {
    date.to_string()
}

pub fn favorite_key(date: DateKey) -> String {
    format!("{FAVORITE_PREFIX}{date}")
}

pub fn widget_key(widget_id: i32) -> String {
    format!("{WIDGET_PREFIX}{widget_id}")
}

/// `move_` key for a date string. Dashes become underscores.
pub fn move_key(date: &str) -> String {
    format!("{MOVE_PREFIX}{}", date.replace('-', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let date = DateKey::parse("2014-03-09").unwrap();
        assert_eq!(cache_key(date), "2014-03-09");
        assert_eq!(favorite_key(date), "favorite_2014-03-09");
        assert_eq!(widget_key(42), "widget_42");
        assert_eq!(move_key("2014-03-09"), "move_2014_03_09");
        assert_eq!(move_key(&date.to_string()), format!("move_{}", date.underscored()));
    }
}
