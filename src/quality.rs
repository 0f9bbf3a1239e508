// Image quality URL rewriting.
// Maps strip image URLs between the zoomed, plain and Sunday variants.

use crate::date::DateKey;

const ZOOM_GIF: &str = ".zoom.gif";
const SUNDAY_GIF: &str = ".sunday.gif";
const GIF: &str = ".gif";

/// Quality tier requested for a strip image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    High,
    Low,
}

impl Quality {
    pub fn from_high_quality_flag(high: bool) -> Self {
        if high { Quality::High } else { Quality::Low }
    }

    /// Rewrite `url` for this tier.
    pub fn apply(&self, date: DateKey, url: &str) -> String {
        match self {
            Quality::High => to_high_quality(url),
            Quality::Low => to_low_quality(date, url),
        }
    }
}

/// Rewrite a URL to its zoomed variant. Empty input passes through.
pub fn to_high_quality(url: &str) -> String {
    collapse_zoom(url.replace(GIF, ZOOM_GIF))
}

/// Rewrite a zoomed URL to the low quality variant: `.sunday.gif` on
/// Sundays, plain `.gif` otherwise.
pub fn to_low_quality(date: DateKey, url: &str) -> String {
    let target = if date.is_sunday() { SUNDAY_GIF } else { GIF };
    collapse_zoom(url.replace(ZOOM_GIF, target))
}

fn collapse_zoom(url: String) -> String {
    url.replace("zoom.zoom", "zoom")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://dilbert.com/dyn/str_strip/000000/00000/0000/000/123456/123456.strip";

    fn date(text: &str) -> DateKey {
        DateKey::parse(text).unwrap()
    }

    #[test]
    fn test_high_quality_rewrites_gif() {
        let url = format!("{BASE}.gif");
        assert_eq!(to_high_quality(&url), format!("{BASE}.zoom.gif"));
    }

    #[test]
    fn test_high_quality_is_idempotent() {
        for url in [
            format!("{BASE}.gif"),
            format!("{BASE}.zoom.gif"),
            format!("{BASE}.sunday.gif"),
            "http://example.com/no-image".to_string(),
            String::new(),
        ] {
            let once = to_high_quality(&url);
            assert_eq!(to_high_quality(&once), once, "not idempotent for {url:?}");
        }
    }

    #[test]
    fn test_empty_passes_through() {
        assert_eq!(to_high_quality(""), "");
        assert_eq!(to_low_quality(date("2023-01-01"), ""), "");
    }

    #[test]
    fn test_low_quality_weekday() {
        let url = format!("{BASE}.zoom.gif");
        let low = to_low_quality(date("2023-01-04"), &url);
        assert_eq!(low, format!("{BASE}.gif"));
        assert!(!low.contains("zoom"));
    }

    #[test]
    fn test_low_quality_sunday() {
        let url = format!("{BASE}.zoom.gif");
        let low = to_low_quality(date("2023-01-01"), &url);
        assert!(low.ends_with(".sunday.gif"));
    }

    #[test]
    fn test_low_quality_collapses_double_zoom() {
        let url = format!("{BASE}.zoom.zoom.gif");
        assert_eq!(to_low_quality(date("2023-01-02"), &url), format!("{BASE}.zoom.gif"));
    }

    #[test]
    fn test_low_quality_round_trips_every_weekday() {
        let start = date("2023-01-01");
        for offset in 0..7 {
            let day = DateKey::new(start.date() + chrono::Days::new(offset));
            let low = to_low_quality(day, &to_high_quality(&format!("{BASE}.gif")));
            if day.is_sunday() {
                assert!(low.ends_with(".sunday.gif"));
            } else {
                assert!(low.ends_with(".strip.gif"));
            }
        }
    }

    #[test]
    fn test_quality_apply() {
        let url = format!("{BASE}.gif");
        let day = date("2023-01-03");
        assert_eq!(Quality::from_high_quality_flag(true).apply(day, &url), to_high_quality(&url));
        assert_eq!(Quality::from_high_quality_flag(false).apply(day, &url), url);
    }
}
