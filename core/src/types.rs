use alloc::string::ToString;
use core::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{PuzzleError, Result};

/// Single board axis, used for board width and height.
pub type Dim = u8;

/// Linear row-major tile position, also used for tile counts.
pub type TileIndex = u16;

/// Board size as `(width, height)`.
pub type Size2 = (Dim, Dim);

pub const fn area(width: Dim, height: Dim) -> TileIndex {
    let width = width as TileIndex;
    let height = height as TileIndex;
    width.saturating_mul(height)
}

/// Calendar day identifier in `YYYYMMDD` form.
///
/// Seeds the daily puzzle and keys the streak ledger. Only real calendar dates
/// can be represented.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DayKey(u32);

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        // year is clamped to four digits so the key stays eight digits wide
        let year = date.year().clamp(0, 9999) as u32;
        Self(year * 10_000 + date.month() * 100 + date.day())
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub fn date(self) -> NaiveDate {
        // constructors only admit valid dates
        NaiveDate::from_ymd_opt(self.year(), self.0 / 100 % 100, self.0 % 100)
            .unwrap_or(NaiveDate::MIN)
    }

    /// The day before this one, `None` at the start of the representable range.
    pub fn previous(self) -> Option<Self> {
        self.date().pred_opt().map(Self::from_date)
    }

    pub fn next(self) -> Option<Self> {
        let next = self.date().succ_opt()?;
        (next.year() <= 9999).then(|| Self::from_date(next))
    }

    const fn year(self) -> i32 {
        (self.0 / 10_000) as i32
    }
}

impl TryFrom<u32> for DayKey {
    type Error = PuzzleError;

    fn try_from(value: u32) -> Result<Self> {
        let year = (value / 10_000) as i32;
        let month = value / 100 % 100;
        let day = value % 100;
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(_) if value <= 99_991_231 => Ok(Self(value)),
            _ => Err(PuzzleError::InvalidDayKey(value)),
        }
    }
}

impl From<DayKey> for u32 {
    fn from(key: DayKey) -> Self {
        key.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl core::str::FromStr for DayKey {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || PuzzleError::MalformedDayKey(s.to_string());
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let value = s.parse::<u32>().map_err(|_| malformed())?;
        Self::try_from(value)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_key_is_zero_padded() {
        let key = DayKey::from_date(date(2024, 3, 7));

        assert_eq!(key.value(), 20240307);
        assert_eq!(key.to_string(), "20240307");
    }

    #[test]
    fn previous_crosses_month_and_year_boundaries() {
        let key = DayKey::from_date(date(2024, 3, 1));
        assert_eq!(key.previous(), Some(DayKey::from_date(date(2024, 2, 29))));

        let key = DayKey::from_date(date(2023, 1, 1));
        assert_eq!(key.previous().map(DayKey::value), Some(20221231));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(DayKey::try_from(20230230), Err(PuzzleError::InvalidDayKey(20230230)));
        assert!(DayKey::try_from(20231301).is_err());
        assert!("2023-1-01".parse::<DayKey>().is_err());
        assert_eq!("20231225".parse::<DayKey>().map(DayKey::value), Ok(20231225));
    }

    #[test]
    fn malformed_text_is_reported_verbatim() {
        assert_eq!(
            "2023-1-01".parse::<DayKey>(),
            Err(PuzzleError::MalformedDayKey("2023-1-01".to_string()))
        );
        assert_eq!("20230230".parse::<DayKey>(), Err(PuzzleError::InvalidDayKey(20230230)));
    }

    #[test]
    fn area_saturates() {
        assert_eq!(area(4, 4), 16);
        assert_eq!(area(255, 255), 65025);
    }
}
