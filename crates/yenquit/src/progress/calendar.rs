use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::DailyLogEntry;
use super::streak::authoritative_days;
use crate::error::InvalidInputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    SmokeFree,
    Smoked,
    Unlogged,
}

impl DayStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SmokeFree => "Smoke-free",
            Self::Smoked => "Smoked",
            Self::Unlogged => "No log",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub status: DayStatus,
}

/// One month of the dashboard calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
    pub smoke_free_days: u32,
    pub smoked_days: u32,
    pub unlogged_days: u32,
}

pub fn month_calendar(
    entries: &[DailyLogEntry],
    year: i32,
    month: u32,
) -> Result<MonthCalendar, InvalidInputError> {
    if !(1..=12).contains(&month) {
        return Err(InvalidInputError::InvalidMonth(month));
    }

    let first_day =
        NaiveDate::from_ymd_opt(year, month, 1).ok_or(InvalidInputError::InvalidYear(year))?;
    let next_month = first_day
        .checked_add_months(Months::new(1))
        .ok_or(InvalidInputError::InvalidYear(year))?;

    let logged = authoritative_days(entries);
    let mut calendar = MonthCalendar {
        year,
        month,
        days: Vec::with_capacity(31),
        smoke_free_days: 0,
        smoked_days: 0,
        unlogged_days: 0,
    };

    for date in first_day.iter_days().take_while(|date| *date < next_month) {
        let status = match logged.get(&date) {
            Some(false) => {
                calendar.smoke_free_days += 1;
                DayStatus::SmokeFree
            }
            Some(true) => {
                calendar.smoked_days += 1;
                DayStatus::Smoked
            }
            None => {
                calendar.unlogged_days += 1;
                DayStatus::Unlogged
            }
        };
        calendar.days.push(CalendarDay { date, status });
    }

    Ok(calendar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn marks_each_day_of_the_month() {
        let entries = [
            DailyLogEntry::smoke_free(day(2024, 2, 1)),
            DailyLogEntry::smoked(day(2024, 2, 2)),
            DailyLogEntry::smoke_free(day(2024, 2, 2)),
            DailyLogEntry::smoked(day(2024, 2, 29)),
            DailyLogEntry::smoke_free(day(2024, 3, 1)),
        ];

        let calendar = month_calendar(&entries, 2024, 2).expect("valid month");
        assert_eq!(calendar.days.len(), 29);
        assert_eq!(calendar.days[0].status, DayStatus::SmokeFree);
        assert_eq!(calendar.days[1].status, DayStatus::SmokeFree);
        assert_eq!(calendar.days[2].status, DayStatus::Unlogged);
        assert_eq!(calendar.days[28].status, DayStatus::Smoked);
        assert_eq!(calendar.smoke_free_days, 2);
        assert_eq!(calendar.smoked_days, 1);
        assert_eq!(calendar.unlogged_days, 26);
    }

    #[test]
    fn december_ends_on_the_31st() {
        let calendar = month_calendar(&[], 2025, 12).expect("valid month");
        assert_eq!(calendar.days.len(), 31);
        assert_eq!(calendar.days.last().map(|d| d.date), Some(day(2025, 12, 31)));
    }

    #[test]
    fn rejects_out_of_range_month() {
        assert_eq!(
            month_calendar(&[], 2025, 13),
            Err(InvalidInputError::InvalidMonth(13))
        );
        assert_eq!(
            month_calendar(&[], 2025, 0),
            Err(InvalidInputError::InvalidMonth(0))
        );
    }
}
