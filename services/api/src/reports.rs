use clap::Args;
use std::path::PathBuf;
use yenquit::assessment::{assess, FagerstromScore, HealthFlags, Modality};
use yenquit::error::AppError;
use yenquit::progress::{month_calendar, summarize, DailyLogImporter, DayStatus, MonthCalendar};

#[derive(Args, Debug)]
pub(crate) struct StreakArgs {
    /// Daily log CSV export with `log_date,smoked` columns
    #[arg(long)]
    pub(crate) logs: PathBuf,
    /// Also render the calendar for this month (YYYY-MM)
    #[arg(long, value_parser = crate::infra::parse_month)]
    pub(crate) month: Option<(i32, u32)>,
    /// Print JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Fagerström total score (0-10)
    #[arg(long)]
    pub(crate) score: i64,
    /// Tobacco modality: smoked or smokeless
    #[arg(long, value_parser = crate::infra::parse_modality)]
    pub(crate) modality: Modality,
    /// Recent cardiac event (heart attack, stroke, unstable angina)
    #[arg(long)]
    pub(crate) cardiac: bool,
    /// Currently pregnant
    #[arg(long)]
    pub(crate) pregnant: bool,
    /// Print JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_streak_report(args: StreakArgs) -> Result<(), AppError> {
    let entries = DailyLogImporter::from_path(&args.logs)?;
    let summary = summarize(&entries);
    let calendar = args
        .month
        .map(|(year, month)| month_calendar(&entries, year, month))
        .transpose()?;

    if args.json {
        let payload = serde_json::json!({ "summary": summary, "calendar": calendar });
        println!("{}", render_json(&payload));
        return Ok(());
    }

    println!("Smoke-free progress ({})", args.logs.display());
    println!("- Longest streak: {} day(s)", summary.longest_streak);
    println!("- Current streak: {} day(s)", summary.current_streak);
    println!(
        "- Logged days: {} ({} smoke-free, {} smoked)",
        summary.logged_days, summary.smoke_free_days, summary.smoked_days
    );
    if let Some(last) = summary.last_logged {
        println!("- Last log: {last}");
    }

    if let Some(calendar) = calendar {
        render_calendar(&calendar);
    }

    Ok(())
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let score = FagerstromScore::new(args.score)?;
    let flags = HealthFlags {
        recent_cardiac_event: args.cardiac,
        is_pregnant: args.pregnant,
    };
    let report = assess(score, args.modality, Some(&flags));

    if args.json {
        println!("{}", render_json(&report));
        return Ok(());
    }

    println!(
        "Fagerström score {} ({}): {}",
        report.score.value(),
        report.modality,
        report.label
    );
    println!("Recommended plan: {}", report.plan);
    if !report.warnings.is_empty() {
        println!("Safety warnings:");
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }

    Ok(())
}

fn render_calendar(calendar: &MonthCalendar) {
    println!(
        "\nCalendar {:04}-{:02}: {} smoke-free | {} smoked | {} not logged",
        calendar.year,
        calendar.month,
        calendar.smoke_free_days,
        calendar.smoked_days,
        calendar.unlogged_days
    );
    println!("  {}", calendar_strip(calendar));
    println!("  {}", calendar_legend());
}

fn day_marker(status: DayStatus) -> char {
    match status {
        DayStatus::SmokeFree => '+',
        DayStatus::Smoked => 'x',
        DayStatus::Unlogged => '.',
    }
}

fn calendar_strip(calendar: &MonthCalendar) -> String {
    calendar.days.iter().map(|day| day_marker(day.status)).collect()
}

fn calendar_legend() -> String {
    [DayStatus::SmokeFree, DayStatus::Smoked, DayStatus::Unlogged]
        .into_iter()
        .map(|status| format!("{} {}", day_marker(status), status.label()))
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("{{\"error\":\"{err}\"}}"))
}
