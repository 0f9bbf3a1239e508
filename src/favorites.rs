// Favorite strips.
// The favorites set is derived from `favorite_` flags in the store on demand.

use crate::date::DateKey;
use crate::store::{PreferenceStore, PrefValue, keys};

impl PreferenceStore {
    pub fn is_favorited(&self, date: DateKey) -> bool {
        self.get_bool(&keys::favorite_key(date), false)
    }

    /// Flip the favorite flag and return the new state.
    ///
    /// Read and write are separate steps, so concurrent toggles of the same
    /// date race and the last commit wins.
    pub fn toggle_favorite(&self, date: DateKey) -> bool {
        let new_state = !self.is_favorited(date);
        if !self.set_bool(&keys::favorite_key(date), new_state) {
            tracing::warn!(%date, "favorite flag not persisted");
        }
        new_state
    }

    /// Favorited dates in ascending order. Keys that do not hold a valid date
    /// are skipped.
    pub fn list_favorites(&self) -> Vec<DateKey> {
        let mut favorites: Vec<DateKey> = self
            .entries_with_prefix(keys::FAVORITE_PREFIX)
            .into_iter()
            .filter(|(_, value)| matches!(value, PrefValue::Bool(true)))
            .filter_map(|(date, _)| match DateKey::parse(&date) {
                Ok(date) => Some(date),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed favorite key");
                    None
                }
            })
            .collect();
        favorites.sort();
        favorites
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> DateKey {
        DateKey::parse(text).unwrap()
    }

    #[test]
    fn test_toggle_twice() {
        let store = PreferenceStore::in_memory();
        let day = date("2003-03-03");

        assert!(!store.is_favorited(day));
        assert!(store.toggle_favorite(day));
        assert!(store.is_favorited(day));
        assert_eq!(store.list_favorites(), vec![day]);

        assert!(!store.toggle_favorite(day));
        assert!(!store.is_favorited(day));
        assert!(store.list_favorites().is_empty());
        assert!(store.contains("favorite_2003-03-03"));
    }

    #[test]
    fn test_list_is_sorted() {
        let store = PreferenceStore::in_memory();
        for text in ["2010-01-05", "1990-12-01", "2010-01-04", "1999-06-30"] {
            assert!(store.toggle_favorite(date(text)));
        }

        assert_eq!(
            store.list_favorites(),
            vec![
                date("1990-12-01"),
                date("1999-06-30"),
                date("2010-01-04"),
                date("2010-01-05"),
            ]
        );
    }

    #[test]
    fn test_list_skips_malformed_and_false() {
        let store = PreferenceStore::in_memory();
        assert!(
            store
                .edit()
                .put_bool("favorite_2001-02-03", true)
                .put_bool("favorite_2001-02-04", false)
                .put_bool("favorite_garbage", true)
                .put_bool("favorite_2001-2-5", true)
                .put_string("favorite_2001-02-06", "true")
                .put_string("2001-02-07", "http://example.com/x.gif")
                .commit()
        );

        assert_eq!(store.list_favorites(), vec![date("2001-02-03")]);
    }
}
