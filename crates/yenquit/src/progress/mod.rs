//! Daily smoke-free logs and the dashboard statistics derived from them.

mod calendar;
pub mod domain;
mod import;
pub mod router;
mod streak;


pub use calendar::{month_calendar, CalendarDay, DayStatus, MonthCalendar};
pub use domain::{entries_from_records, parse_log_date, DailyLogEntry, DailyLogRecord};
pub use import::{DailyLogImporter, LogImportError};
pub use router::progress_router;
pub use streak::{authoritative_days, longest_smoke_free_streak, summarize, StreakSummary};
