//! Relative date computation for the `due:`, `created:` and `modified:`
//! operators.
//!
//! Everything is anchored to a captured "now". Rollover dates are the first
//! day of the next week, month, quarter or year; offsets move today's midnight
//! forward or backward by a number of units.

use std::fmt;

use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, TimeZone, Weekday};

use super::operator::Period;

/// Calendar-date format used for rollover boundaries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Full timestamp format used for day offsets (`2026-10-26T00:00:00+02:00`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Unit of a relative offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetUnit {
    Days,
    Week,
    Month,
    Quarter,
    Year,
}

impl From<Period> for OffsetUnit {
    fn from(period: Period) -> Self {
        match period {
            Period::Week => Self::Week,
            Period::Month => Self::Month,
            Period::Quarter => Self::Quarter,
            Period::Year => Self::Year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Date context for one parse, capturing the current date and time zone.
#[derive(Debug, Clone)]
pub struct RelativeDates<Tz: TimeZone = Local> {
    today: NaiveDate,
    timezone: Tz,
}

impl RelativeDates<Local> {
    /// Anchors to the local clock.
    pub fn now() -> Self {
        Self::anchored_at(&Local::now())
    }
}

impl<Tz: TimeZone> RelativeDates<Tz>
where
    Tz::Offset: fmt::Display,
{
    pub fn anchored_at(now: &DateTime<Tz>) -> Self {
        Self {
            today: now.date_naive(),
            timezone: now.timezone(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Monday of the next ISO week. Week 52 always rolls into week 1 of the
    /// following ISO year.
    pub fn next_week_start(&self) -> Option<NaiveDate> {
        let week = self.today.iso_week();
        if week.week() == 52 {
            return NaiveDate::from_isoywd_opt(week.year() + 1, 1, Weekday::Mon);
        }
        NaiveDate::from_isoywd_opt(week.year(), week.week() + 1, Weekday::Mon)
            .or_else(|| NaiveDate::from_isoywd_opt(week.year() + 1, 1, Weekday::Mon))
    }

    pub fn next_month_start(&self) -> Option<NaiveDate> {
        // month0() is zero-based, so 11 is December
        if self.today.month0() == 11 {
            return NaiveDate::from_ymd_opt(self.today.year() + 1, 1, 1);
        }
        NaiveDate::from_ymd_opt(self.today.year(), self.today.month() + 1, 1)
    }

    pub fn next_quarter_start(&self) -> Option<NaiveDate> {
        let quarter = self.today.month0() / 3 + 1;
        if quarter == 4 {
            return NaiveDate::from_ymd_opt(self.today.year() + 1, 1, 1);
        }
        NaiveDate::from_ymd_opt(self.today.year(), quarter * 3 + 1, 1)
    }

    pub fn next_year_start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.today.year() + 1, 1, 1)
    }

    /// Rollover boundary for a calendar period.
    pub fn rollover(&self, period: Period) -> Option<NaiveDate> {
        match period {
            Period::Week => self.next_week_start(),
            Period::Month => self.next_month_start(),
            Period::Quarter => self.next_quarter_start(),
            Period::Year => self.next_year_start(),
        }
    }

    /// Today's midnight shifted by `amount` units, in the anchor's time zone.
    ///
    /// Returns `None` when the shifted date falls outside the calendar chrono
    /// can represent.
    pub fn offset_date(
        &self,
        amount: u32,
        unit: OffsetUnit,
        direction: Direction,
    ) -> Option<DateTime<Tz>> {
        let date = match (unit, direction) {
            (OffsetUnit::Days, Direction::Forward) => {
                self.today.checked_add_days(Days::new(amount.into()))
            }
            (OffsetUnit::Days, Direction::Backward) => {
                self.today.checked_sub_days(Days::new(amount.into()))
            }
            (OffsetUnit::Week, Direction::Forward) => self
                .today
                .checked_add_days(Days::new(u64::from(amount) * 7)),
            (OffsetUnit::Week, Direction::Backward) => self
                .today
                .checked_sub_days(Days::new(u64::from(amount) * 7)),
            (OffsetUnit::Month | OffsetUnit::Quarter | OffsetUnit::Year, direction) => {
                let months = match unit {
                    OffsetUnit::Quarter => amount.checked_mul(3)?,
                    OffsetUnit::Year => amount.checked_mul(12)?,
                    _ => amount,
                };
                match direction {
                    Direction::Forward => self.today.checked_add_months(Months::new(months)),
                    Direction::Backward => self.today.checked_sub_months(Months::new(months)),
                }
            }
        }?;
        self.midnight(date)
    }

    pub fn format_date(date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    pub fn format_timestamp(timestamp: &DateTime<Tz>) -> String {
        timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    fn midnight(&self, date: NaiveDate) -> Option<DateTime<Tz>> {
        let naive = date.and_hms_opt(0, 0, 0)?;
        // A DST gap can swallow midnight; the earliest valid instant of the
        // day is used instead.
        self.timezone
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| {
                let one_am = date.and_hms_opt(1, 0, 0)?;
                self.timezone.from_local_datetime(&one_am).earliest()
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    fn anchored(year: i32, month: u32, day: u32) -> RelativeDates<Utc> {
        let now = Utc.with_ymd_and_hms(year, month, day, 15, 30, 0).unwrap();
        RelativeDates::anchored_at(&now)
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn next_week_starts_on_monday() {
        // Sunday 2026-10-18 is in ISO week 42
        let dates = anchored(2026, 10, 18);
        assert_eq!(dates.next_week_start(), Some(ymd(2026, 10, 19)));

        let dates = anchored(2026, 10, 19);
        assert_eq!(dates.next_week_start(), Some(ymd(2026, 10, 26)));
    }

    #[test]
    fn week_52_rolls_into_next_year() {
        // 2025-12-24 is in ISO week 52 of 2025
        let dates = anchored(2025, 12, 24);
        assert_eq!(dates.today().iso_week().week(), 52);
        assert_eq!(dates.next_week_start(), Some(ymd(2025, 12, 29)));
    }

    #[test]
    fn week_53_rolls_into_next_year() {
        // 2026-12-31 is in ISO week 53 of 2026
        let dates = anchored(2026, 12, 31);
        assert_eq!(dates.today().iso_week().week(), 53);
        assert_eq!(dates.next_week_start(), Some(ymd(2027, 1, 4)));
    }

    #[test]
    fn next_month_start() {
        assert_eq!(anchored(2026, 10, 18).next_month_start(), Some(ymd(2026, 11, 1)));
        assert_eq!(anchored(2026, 1, 31).next_month_start(), Some(ymd(2026, 2, 1)));
        assert_eq!(anchored(2026, 12, 5).next_month_start(), Some(ymd(2027, 1, 1)));
    }

    #[test]
    fn next_quarter_start() {
        assert_eq!(anchored(2026, 2, 10).next_quarter_start(), Some(ymd(2026, 4, 1)));
        assert_eq!(anchored(2026, 6, 30).next_quarter_start(), Some(ymd(2026, 7, 1)));
        assert_eq!(anchored(2026, 7, 1).next_quarter_start(), Some(ymd(2026, 10, 1)));
        assert_eq!(anchored(2026, 10, 18).next_quarter_start(), Some(ymd(2027, 1, 1)));
    }

    #[test]
    fn next_year_start() {
        assert_eq!(anchored(2026, 10, 18).next_year_start(), Some(ymd(2027, 1, 1)));
        assert_eq!(anchored(2026, 1, 1).rollover(Period::Year), Some(ymd(2027, 1, 1)));
    }

    #[test]
    fn day_offsets_are_midnight_timestamps() {
        let dates = anchored(2026, 10, 18);
        let forward = dates
            .offset_date(8, OffsetUnit::Days, Direction::Forward)
            .unwrap();
        assert_eq!(
            RelativeDates::<Utc>::format_timestamp(&forward),
            "2026-10-26T00:00:00+00:00"
        );

        let backward = dates
            .offset_date(18, OffsetUnit::Days, Direction::Backward)
            .unwrap();
        assert_eq!(
            RelativeDates::<Utc>::format_timestamp(&backward),
            "2026-09-30T00:00:00+00:00"
        );
    }

    #[test]
    fn offsets_keep_anchor_timezone() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2026, 10, 18, 23, 10, 0).unwrap();
        let dates = RelativeDates::anchored_at(&now);
        let due = dates
            .offset_date(1, OffsetUnit::Days, Direction::Forward)
            .unwrap();
        assert_eq!(
            RelativeDates::<FixedOffset>::format_timestamp(&due),
            "2026-10-19T00:00:00+02:00"
        );
    }

    #[test]
    fn unit_offsets() {
        let dates = anchored(2026, 1, 31);
        let month = dates
            .offset_date(1, OffsetUnit::Month, Direction::Forward)
            .unwrap();
        assert_eq!(month.date_naive(), ymd(2026, 2, 28));

        let quarter = dates
            .offset_date(1, OffsetUnit::Quarter, Direction::Backward)
            .unwrap();
        assert_eq!(quarter.date_naive(), ymd(2025, 10, 31));

        let week = dates
            .offset_date(2, OffsetUnit::Week, Direction::Backward)
            .unwrap();
        assert_eq!(week.date_naive(), ymd(2026, 1, 17));

        let year = dates
            .offset_date(1, OffsetUnit::from(Period::Year), Direction::Forward)
            .unwrap();
        assert_eq!(year.date_naive(), ymd(2027, 1, 31));
    }

    #[test]
    fn out_of_range_offset_is_none() {
        let dates = anchored(2026, 10, 18);
        assert!(dates
            .offset_date(u32::MAX, OffsetUnit::Days, Direction::Forward)
            .is_none());
    }

    #[test]
    fn same_anchor_same_output() {
        let first = anchored(2026, 3, 14);
        let second = anchored(2026, 3, 14);
        for period in [Period::Week, Period::Month, Period::Quarter, Period::Year] {
            assert_eq!(first.rollover(period), second.rollover(period));
        }
    }
}
