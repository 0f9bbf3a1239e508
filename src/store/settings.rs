// Named user settings.
// Typed accessors with defaults for every flag the viewer exposes.

use std::path::PathBuf;

use serde::Serialize;

use super::keys;
use super::paths;
use super::preferences::PreferenceStore;

/// Screen orientation requested by the landscape settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Sensor,
    Landscape,
    ReverseLandscape,
}

/// Point-in-time view of every named setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub high_quality: bool,
    pub dark_layout: bool,
    pub dark_widget_layout: bool,
    pub force_landscape: bool,
    pub reverse_landscape: bool,
    pub hide_toolbars: bool,
    pub download_target: PathBuf,
    pub share_image: bool,
    pub slow_network: bool,
    pub open_at_latest: bool,
    pub widget_always_latest: bool,
}

impl PreferenceStore {
    pub fn settings(&self) -> Settings {
        Settings {
            high_quality: self.is_high_quality_on(),
            dark_layout: self.is_dark_layout_enabled(),
            dark_widget_layout: self.is_dark_widget_layout_enabled(),
            force_landscape: self.is_force_landscape(),
            reverse_landscape: self.is_reversed_landscape(),
            hide_toolbars: self.is_toolbars_hidden(),
            download_target: self.download_target(),
            share_image: self.is_sharing_image(),
            slow_network: self.is_slow_network(),
            open_at_latest: self.is_open_at_latest_strip(),
            widget_always_latest: self.is_widget_always_show_latest(),
        }
    }

    /// Whether strips are displayed in high quality.
    pub fn is_high_quality_on(&self) -> bool {
        self.get_bool(keys::HIGH_QUALITY_ENABLED, true)
    }

    pub fn set_high_quality_on(&self, enabled: bool) -> bool {
        self.set_bool(keys::HIGH_QUALITY_ENABLED, enabled)
    }

    pub fn is_dark_layout_enabled(&self) -> bool {
        self.get_bool(keys::DARK_LAYOUT, false)
    }

    pub fn set_dark_layout_enabled(&self, dark: bool) -> bool {
        self.set_bool(keys::DARK_LAYOUT, dark)
    }

    pub fn is_dark_widget_layout_enabled(&self) -> bool {
        self.get_bool(keys::DARK_WIDGET_LAYOUT, false)
    }

    pub fn set_dark_widget_layout_enabled(&self, dark: bool) -> bool {
        self.set_bool(keys::DARK_WIDGET_LAYOUT, dark)
    }

    pub fn is_force_landscape(&self) -> bool {
        self.get_bool(keys::FORCE_LANDSCAPE, false)
    }

    pub fn set_force_landscape(&self, force: bool) -> bool {
        self.set_bool(keys::FORCE_LANDSCAPE, force)
    }

    pub fn is_reversed_landscape(&self) -> bool {
        self.get_bool(keys::REVERSE_LANDSCAPE, false)
    }

    pub fn set_reversed_landscape(&self, reversed: bool) -> bool {
        self.set_bool(keys::REVERSE_LANDSCAPE, reversed)
    }

    pub fn is_toolbars_hidden(&self) -> bool {
        self.get_bool(keys::HIDE_TOOLBARS, false)
    }

    pub fn set_toolbars_hidden(&self, hidden: bool) -> bool {
        self.set_bool(keys::HIDE_TOOLBARS, hidden)
    }

    /// Folder strips are downloaded into. Defaults to the user's download directory.
    pub fn download_target(&self) -> PathBuf {
        self.get_string(keys::DOWNLOAD_TARGET, None)
            .map(PathBuf::from)
            .unwrap_or_else(paths::default_download_dir)
    }

    /// Store a new download folder. An empty path is refused without writing.
    pub fn set_download_target(&self, path: &str) -> bool {
        !path.is_empty() && self.set_string(keys::DOWNLOAD_TARGET, path)
    }

    pub fn is_sharing_image(&self) -> bool {
        self.get_bool(keys::SHARE_IMAGE, true)
    }

    pub fn set_sharing_image(&self, share: bool) -> bool {
        self.set_bool(keys::SHARE_IMAGE, share)
    }

    /// Whether the viewer assumes a slow connection. Defaults to true.
    pub fn is_slow_network(&self) -> bool {
        self.get_bool(keys::SLOW_NETWORK, true)
    }

    pub fn set_slow_network(&self, slow: bool) -> bool {
        self.set_bool(keys::SLOW_NETWORK, slow)
    }

    pub fn is_open_at_latest_strip(&self) -> bool {
        self.get_bool(keys::OPEN_AT_LATEST, false)
    }

    pub fn set_open_at_latest_strip(&self, latest: bool) -> bool {
        self.set_bool(keys::OPEN_AT_LATEST, latest)
    }

    pub fn is_widget_always_show_latest(&self) -> bool {
        self.get_bool(keys::WIDGET_ALWAYS_SHOW_LATEST, false)
    }

    pub fn set_widget_always_show_latest(&self, latest: bool) -> bool {
        self.set_bool(keys::WIDGET_ALWAYS_SHOW_LATEST, latest)
    }

    pub fn landscape_orientation(&self) -> Orientation {
        match (self.is_force_landscape(), self.is_reversed_landscape()) {
            (false, _) => Orientation::Sensor,
            (true, false) => Orientation::Landscape,
            (true, true) => Orientation::ReverseLandscape,
        }
    }
}
