use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::DailyLogEntry;

/// Dashboard view of a user's smoke-free progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    pub longest_streak: u32,
    /// Run still open after the most recent logged day; zero once that day was smoked.
    pub current_streak: u32,
    pub smoke_free_days: u32,
    pub smoked_days: u32,
    pub logged_days: u32,
    pub last_logged: Option<NaiveDate>,
}

/// Collapses the logs to one authoritative `smoked` flag per calendar day.
///
/// When a day is logged more than once, the entry appearing last in the input wins.
/// The returned map iterates in ascending date order.
pub fn authoritative_days(entries: &[DailyLogEntry]) -> BTreeMap<NaiveDate, bool> {
    let mut days = BTreeMap::new();
    for entry in entries {
        days.insert(entry.log_date, entry.smoked);
    }
    days
}

/// Longest run of consecutive smoke-free calendar days.
///
/// A smoked day ends the run, and so does a day with no log at all: the next
/// smoke-free day starts over at one.
pub fn longest_smoke_free_streak(entries: &[DailyLogEntry]) -> u32 {
    summarize(entries).longest_streak
}

pub fn summarize(entries: &[DailyLogEntry]) -> StreakSummary {
    let days = authoritative_days(entries);

    let mut summary = StreakSummary::default();
    let mut previous: Option<NaiveDate> = None;

    for (&day, &smoked) in &days {
        summary.logged_days += 1;
        summary.last_logged = Some(day);

        if smoked {
            summary.smoked_days += 1;
            summary.current_streak = 0;
            previous = None;
            continue;
        }

        summary.smoke_free_days += 1;
        summary.current_streak = match previous {
            Some(prev) if (day - prev).num_days() == 1 => summary.current_streak + 1,
            _ => 1,
        };
        summary.longest_streak = summary.longest_streak.max(summary.current_streak);
        previous = Some(day);
    }

    tracing::debug!(
        logged = summary.logged_days,
        duplicates = entries.len() - days.len(),
        longest = summary.longest_streak,
        current = summary.current_streak,
        "computed smoke-free streak"
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date") + chrono::Duration::days(offset)
    }

    #[test]
    fn empty_logs_have_no_streak() {
        assert_eq!(longest_smoke_free_streak(&[]), 0);
        assert_eq!(summarize(&[]), StreakSummary::default());
    }

    #[test]
    fn consecutive_smoke_free_days_accumulate() {
        let entries = [
            DailyLogEntry::smoke_free(day(0)),
            DailyLogEntry::smoke_free(day(1)),
            DailyLogEntry::smoke_free(day(2)),
        ];
        assert_eq!(longest_smoke_free_streak(&entries), 3);
    }

    #[test]
    fn smoked_day_splits_runs() {
        let entries = [
            DailyLogEntry::smoke_free(day(0)),
            DailyLogEntry::smoked(day(1)),
            DailyLogEntry::smoke_free(day(2)),
        ];
        assert_eq!(longest_smoke_free_streak(&entries), 1);
    }

    #[test]
    fn unlogged_gap_resets_instead_of_bridging() {
        let entries = [
            DailyLogEntry::smoke_free(day(0)),
            DailyLogEntry::smoke_free(day(2)),
        ];
        assert_eq!(longest_smoke_free_streak(&entries), 1);
    }

    #[test]
    fn duplicate_day_uses_last_entry() {
        let entries = [
            DailyLogEntry::smoke_free(day(0)),
            DailyLogEntry::smoke_free(day(1)),
            DailyLogEntry::smoked(day(1)),
            DailyLogEntry::smoke_free(day(2)),
        ];
        assert_eq!(longest_smoke_free_streak(&entries), 1);

        let reversed = [
            DailyLogEntry::smoke_free(day(0)),
            DailyLogEntry::smoked(day(1)),
            DailyLogEntry::smoke_free(day(1)),
            DailyLogEntry::smoke_free(day(2)),
        ];
        assert_eq!(longest_smoke_free_streak(&reversed), 3);
    }

    #[test]
    fn summary_tracks_current_run_and_counts() {
        let entries = [
            DailyLogEntry::smoke_free(day(5)),
            DailyLogEntry::smoke_free(day(0)),
            DailyLogEntry::smoke_free(day(1)),
            DailyLogEntry::smoke_free(day(2)),
            DailyLogEntry::smoked(day(3)),
            DailyLogEntry::smoke_free(day(4)),
            DailyLogEntry::smoke_free(day(4)),
        ];

        let summary = summarize(&entries);
        assert_eq!(summary.longest_streak, 3);
        assert_eq!(summary.current_streak, 2);
        assert_eq!(summary.smoke_free_days, 5);
        assert_eq!(summary.smoked_days, 1);
        assert_eq!(summary.logged_days, 6);
        assert_eq!(summary.last_logged, Some(day(5)));
    }

    #[test]
    fn current_streak_is_zero_after_smoked_day() {
        let entries = [
            DailyLogEntry::smoke_free(day(0)),
            DailyLogEntry::smoked(day(1)),
        ];
        let summary = summarize(&entries);
        assert_eq!(summary.current_streak, 0);
        assert_eq!(summary.longest_streak, 1);
    }
}
