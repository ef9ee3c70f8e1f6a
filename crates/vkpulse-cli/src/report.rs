//! Console tables printed by the CLI.

use vkpulse_core::DailyAggregate;
use vkpulse_newsfeed::FetchWindow;
use vkpulse_sentiment::SentimentLabel;

pub(crate) fn print_windows(windows: &[FetchWindow]) {
    if windows.is_empty() {
        println!("no windows: end date is before start date");
        return;
    }

    println!(
        "{:<5}{:<13}{:<13}{:<6}{:<13}END_TIME",
        "#", "START", "END", "DAYS", "START_TIME"
    );
    for (idx, window) in windows.iter().enumerate() {
        println!(
            "{:<5}{:<13}{:<13}{:<6}{:<13}{}",
            idx + 1,
            window.start.to_string(),
            window.end.to_string(),
            window.days(),
            window.start_timestamp(),
            window.end_timestamp()
        );
    }
}

pub(crate) fn print_fetch_summary(
    posts: usize,
    duplicates_removed: usize,
    issues: usize,
    skipped_items: usize,
) {
    println!(
        "{posts} post(s) after normalization ({duplicates_removed} duplicate(s) removed, \
         {issues} field issue(s), {skipped_items} malformed item(s) skipped)"
    );
}

/// Publications and engagement per day, plus a total row.
pub(crate) fn print_daily(daily: &[DailyAggregate]) {
    if daily.is_empty() {
        println!("no publications in range");
        return;
    }

    println!(
        "{:<12}{:<14}{:<14}UNDEFINED_ER",
        "DATE", "PUBLICATIONS", "ER_VIEW_SUM"
    );
    for day in daily {
        println!(
            "{:<12}{:<14}{:<14.2}{}",
            day.date.to_string(),
            day.publications,
            day.engagement_sum,
            day.undefined_ratios
        );
    }

    let publications: usize = daily.iter().map(|d| d.publications).sum();
    let engagement: f64 = daily.iter().map(|d| d.engagement_sum).sum();
    let undefined: usize = daily.iter().map(|d| d.undefined_ratios).sum();
    println!("{:<12}{publications:<14}{engagement:<14.2}{undefined}", "TOTAL");
}

pub(crate) fn print_distribution(distribution: &[(SentimentLabel, usize)]) {
    let total: usize = distribution.iter().map(|(_, n)| n).sum();
    println!();
    println!("{:<12}POSTS", "SENTIMENT");
    for (label, count) in distribution {
        println!("{:<12}{count}", label.as_str());
    }
    println!("{:<12}{total}", "TOTAL");
}
