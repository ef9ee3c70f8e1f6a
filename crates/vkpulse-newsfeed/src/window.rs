//! Splitting a date range into fixed-size fetch windows.
//!
//! `newsfeed.search` returns at most one page of results per call, so long
//! ranges are walked in windows of `window_days` calendar days. Windows are
//! contiguous and never overlap; the last one is clipped at the range end.
//!
//! ```text
//! 2023-10-01 ..= 2023-12-31, 30 days
//!   2023-10-01 ..= 2023-10-30
//!   2023-10-31 ..= 2023-11-29
//!   2023-11-30 ..= 2023-12-29
//!   2023-12-30 ..= 2023-12-31
//! ```

use std::fmt;

use chrono::{Days, NaiveDate, NaiveTime};

const SECONDS_PER_DAY: i64 = 86_400;

/// An inclusive range of calendar days fetched with one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FetchWindow {
    /// `start_time` parameter: midnight UTC at the start of the first day.
    #[must_use]
    pub fn start_timestamp(&self) -> i64 {
        self.start.and_time(NaiveTime::MIN).and_utc().timestamp()
    }

    /// `end_time` parameter: the last second (UTC) of the final day.
    #[must_use]
    pub fn end_timestamp(&self) -> i64 {
        self.end.and_time(NaiveTime::MIN).and_utc().timestamp() + SECONDS_PER_DAY - 1
    }

    /// Number of calendar days covered.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for FetchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Partitions `start ..= end` into windows of `window_days` days.
///
/// Returns no windows when `end` is before `start`. A `window_days` of zero
/// is treated as one.
#[must_use]
pub fn plan_windows(start: NaiveDate, end: NaiveDate, window_days: u32) -> Vec<FetchWindow> {
    let span = Days::new(u64::from(window_days.max(1)) - 1);
    let mut windows = Vec::new();
    let mut cursor = start;

    while cursor <= end {
        let last = cursor
            .checked_add_days(span)
            .map_or(end, |candidate| candidate.min(end));
        windows.push(FetchWindow {
            start: cursor,
            end: last,
        });
        match last.succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }

    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_before_start_yields_no_windows() {
        assert!(plan_windows(date(2023, 12, 31), date(2023, 10, 1), 30).is_empty());
    }

    #[test]
    fn single_day_range_yields_one_window() {
        let windows = plan_windows(date(2023, 10, 1), date(2023, 10, 1), 30);
        assert_eq!(
            windows,
            vec![FetchWindow {
                start: date(2023, 10, 1),
                end: date(2023, 10, 1)
            }]
        );
    }

    #[test]
    fn quarter_splits_into_thirty_day_windows_with_clipped_tail() {
        let windows = plan_windows(date(2023, 10, 1), date(2023, 12, 31), 30);
        let bounds: Vec<(NaiveDate, NaiveDate)> =
            windows.iter().map(|w| (w.start, w.end)).collect();
        assert_eq!(
            bounds,
            vec![
                (date(2023, 10, 1), date(2023, 10, 30)),
                (date(2023, 10, 31), date(2023, 11, 29)),
                (date(2023, 11, 30), date(2023, 12, 29)),
                (date(2023, 12, 30), date(2023, 12, 31)),
            ]
        );
    }

    #[test]
    fn windows_cover_every_day_exactly_once() {
        for window_days in [1, 7, 30, 45, 400] {
            let start = date(2023, 1, 15);
            let end = date(2024, 3, 2);
            let windows = plan_windows(start, end, window_days);

            assert_eq!(windows.first().map(|w| w.start), Some(start));
            assert_eq!(windows.last().map(|w| w.end), Some(end));
            for pair in windows.windows(2) {
                assert_eq!(
                    pair[0].end.succ_opt(),
                    Some(pair[1].start),
                    "gap or overlap between {} and {}",
                    pair[0],
                    pair[1]
                );
            }
            for w in &windows {
                assert!(w.days() <= i64::from(window_days));
                assert!(w.start <= w.end);
            }
            let covered: i64 = windows.iter().map(FetchWindow::days).sum();
            assert_eq!(covered, (end - start).num_days() + 1);
        }
    }

    #[test]
    fn zero_window_days_behaves_like_one() {
        let windows = plan_windows(date(2023, 10, 1), date(2023, 10, 3), 0);
        assert_eq!(windows.len(), 3);
    }

    #[test]
    fn timestamps_span_whole_days_in_utc() {
        let window = FetchWindow {
            start: date(2023, 10, 1),
            end: date(2023, 10, 30),
        };
        // 2023-10-01T00:00:00Z
        assert_eq!(window.start_timestamp(), 1_696_118_400);
        // 2023-10-30T23:59:59Z
        assert_eq!(window.end_timestamp(), 1_698_710_399);
    }

    #[test]
    fn adjacent_windows_have_adjacent_timestamps() {
        let windows = plan_windows(date(2023, 10, 1), date(2023, 12, 31), 30);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end_timestamp() + 1, pair[1].start_timestamp());
        }
    }

    #[test]
    fn display_shows_inclusive_range() {
        let window = FetchWindow {
            start: date(2023, 10, 1),
            end: date(2023, 10, 30),
        };
        assert_eq!(window.to_string(), "2023-10-01..=2023-10-30");
    }
}
