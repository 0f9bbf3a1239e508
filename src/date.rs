// Canonical strip dates.
// Parses and formats YYYY-MM-DD keys, clamps dates to the published range,
// and picks random strips.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use rand::Rng;

use crate::error::{PrefsError, Result};

/// Pattern used for every stored date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Zone that defines "today" for the strip archive.
pub const TIME_ZONE: Tz = chrono_tz::America::Chicago;

const FIRST_STRIP: NaiveDate = match NaiveDate::from_ymd_opt(1989, 4, 16) {
    Some(date) => date,
    None => panic!("invalid first strip date"),
};

/// A validated-format calendar date identifying one strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from calendar parts. Returns `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a canonical `YYYY-MM-DD` string.
    ///
    /// Anything that is not exactly four digits, dash, two digits, dash, two
    /// digits (or names a day that does not exist) is rejected.
    pub fn parse(text: &str) -> Result<Self> {
        if !is_canonical(text) {
            return Err(PrefsError::InvalidDateFormat(text.to_string()));
        }
        NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(Self)
            .map_err(|_| PrefsError::InvalidDateFormat(text.to_string()))
    }

    /// Today's date in the archive's time zone.
    pub fn today() -> Self {
        Self(Utc::now().with_timezone(&TIME_ZONE).date_naive())
    }

    /// The first published strip.
    pub fn first_strip() -> Self {
        Self(FIRST_STRIP)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn is_sunday(&self) -> bool {
        self.0.weekday() == Weekday::Sun
    }

    /// Clamp into `[first strip, today]`. Out-of-range dates are corrected,
    /// never rejected.
    pub fn validate(self) -> Self {
        self.clamp_to(Self::today())
    }

    /// Clamp into `[first strip, today]` for an explicit `today`.
    pub fn clamp_to(self, today: DateKey) -> Self {
        let mut date = self;
        if date > today {
            date = today;
        }
        if date < Self::first_strip() {
            date = Self::first_strip();
        }
        date
    }

    /// Date with dashes replaced by underscores, as used in `move_` keys.
    pub fn underscored(&self) -> String {
        self.to_string().replace('-', "_")
    }

    /// Random strip date between the first strip and today.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng(), Self::today())
    }

    /// Pick a year before the current one, any month, and a day offset of
    /// 0..=30 from the first of that month. Offsets past the end of a short
    /// month roll into the next month. The result is always clamped.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R, today: DateKey) -> Self {
        let first_year = FIRST_STRIP.year();
        let year = rng.gen_range(first_year..today.0.year().max(first_year + 1));
        let month = rng.gen_range(1..=12);
        let offset = rng.gen_range(0..31u64);

        match month_day_offset(year, month, offset) {
            Some(date) => Self(date).clamp_to(today),
            None => Self::first_strip(),
        }
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// First strip was published on 1989-04-16.
pub fn first_strip_date() -> DateKey {
    DateKey::first_strip()
}

/// First of `year`/`month` plus `offset` days, rolling past the month end.
fn month_day_offset(year: i32, month: u32, offset: u64) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(offset))
}

fn is_canonical(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn date(text: &str) -> DateKey {
        DateKey::parse(text).unwrap()
    }

    #[test]
    fn test_parse_and_format() {
        for text in ["1989-04-16", "2000-02-29", "2012-12-31", "2023-01-01"] {
            assert_eq!(date(text).to_string(), text);
        }
    }

    #[test]
    fn test_from_ymd() {
        assert_eq!(DateKey::from_ymd(1989, 4, 16), Some(first_strip_date()));
        assert_eq!(DateKey::from_ymd(2023, 2, 29), None);
        assert_eq!(DateKey::from_ymd(2023, 13, 1), None);
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        for text in [
            "", "2020-1-05", "2020/01/05", "20200105", "2020-01-5", "2021-02-29",
            "2020-13-01", " 2020-01-05", "abcd-ef-gh",
        ] {
            assert!(
                matches!(DateKey::parse(text), Err(PrefsError::InvalidDateFormat(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_clamp_before_first_strip() {
        let today = date("2020-06-01");
        assert_eq!(date("1970-01-01").clamp_to(today), date("1989-04-16"));
        assert_eq!(date("1989-04-15").clamp_to(today), date("1989-04-16"));
        assert_eq!(date("1989-04-16").clamp_to(today), date("1989-04-16"));
    }

    #[test]
    fn test_clamp_after_today() {
        let today = date("2020-06-01");
        assert_eq!(date("2020-06-02").clamp_to(today), today);
        assert_eq!(date("2999-01-01").clamp_to(today), today);
        assert_eq!(date("2010-05-05").clamp_to(today), date("2010-05-05"));
    }

    #[test]
    fn test_validate_uses_today() {
        let today = DateKey::today();
        let future = DateKey::new(today.date() + Days::new(10));
        assert_eq!(future.validate(), today);
        assert_eq!(date("1900-01-01").validate(), first_strip_date());
    }

    #[test]
    fn test_random_stays_in_range() {
        let today = DateKey::today();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let random = DateKey::random_with(&mut rng, today);
            assert!(random >= first_strip_date());
            assert!(random <= today);
        }
        for _ in 0..1000 {
            let random = DateKey::random();
            assert!(random >= first_strip_date() && random <= DateKey::today());
        }
    }

    #[test]
    fn test_random_never_picks_current_year() {
        let today = date("1995-07-01");
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let random = DateKey::random_with(&mut rng, today);
            assert!(random <= date("1994-12-31"));
        }
    }

    #[test]
    fn test_random_rolls_short_months_forward() {
        let rolled = month_day_offset(2001, 2, 30).unwrap();
        assert_eq!(DateKey::new(rolled), date("2001-03-03"));

        let april = month_day_offset(2001, 4, 30).unwrap();
        assert_eq!(DateKey::new(april), date("2001-05-01"));
        assert!(month_day_offset(2001, 13, 0).is_none());
    }

    #[test]
    fn test_sunday_and_underscored() {
        assert!(date("2023-01-01").is_sunday());
        assert!(!date("2023-01-02").is_sunday());
        assert_eq!(date("2023-01-02").underscored(), "2023_01_02");
    }
}
