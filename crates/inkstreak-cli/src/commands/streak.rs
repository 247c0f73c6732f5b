use clap::Args;
use inkstreak_core::streak::today_utc;
use inkstreak_core::{Config, DateInput, StreakReport};

use super::{open_book, print_json};

#[derive(Args)]
pub struct StreakArgs {
    /// Reference date (YYYY-MM-DD); defaults to the current UTC date
    #[arg(long)]
    today: Option<String>,
    /// Print the raw report as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: StreakArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let book = open_book(config)?;
    let today = match args.today {
        Some(raw) => DateInput::Key(raw),
        None => DateInput::Date(today_utc()),
    };

    let report = book.streak(&today)?;
    if args.json {
        return print_json(&report, config);
    }

    let longest = book.longest_streak(&today)?;
    print!("{}", render(&report, longest));
    Ok(())
}

fn render(report: &StreakReport, longest: u32) -> String {
    let date_or_dash = |date: Option<chrono::NaiveDate>| {
        date.map_or_else(|| "-".to_string(), |d| d.to_string())
    };

    let mut out = String::new();
    out.push_str(&format!(
        "Streak:         {} {} ({})\n",
        report.streak_length,
        plural_days(report.streak_length),
        report.health().label()
    ));
    out.push_str(&format!(
        "Last complete:  {}\n",
        date_or_dash(report.last_complete_date)
    ));
    out.push_str(&format!(
        "Last activity:  {}\n",
        date_or_dash(report.last_activity_date)
    ));
    out.push_str(&format!(
        "Grace:          {} of {} used, {} remaining\n",
        report.days_used_in_grace, report.max_grace_days, report.days_remaining_in_grace
    ));
    out.push_str(&format!(
        "Longest streak: {} {}\n",
        longest,
        plural_days(longest)
    ));
    out.push_str(&format!("Today:          {}\n", report.today));
    out
}

fn plural_days(n: u32) -> &'static str {
    if n == 1 {
        "day"
    } else {
        "days"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkstreak_core::{compute_streak, DayRecord};

    #[test]
    fn render_shows_health_and_grace() {
        let records = vec![
            DayRecord::new("2024-01-04", true, false),
            DayRecord::complete("2024-01-02"),
            DayRecord::complete("2024-01-01"),
        ];
        let report = compute_streak(&records, &"2024-01-04".into()).unwrap();
        let text = render(&report, 2);
        assert!(text.contains("Streak:         2 days (grace)"));
        assert!(text.contains("Grace:          2 of 2 used, 0 remaining"));
        assert!(text.contains("Last activity:  2024-01-04"));
    }

    #[test]
    fn render_uses_dash_for_missing_dates() {
        let report = compute_streak(&[], &"2024-01-04".into()).unwrap();
        let text = render(&report, 0);
        assert!(text.contains("Last complete:  -"));
        assert!(text.contains("(broken)"));
    }
}
