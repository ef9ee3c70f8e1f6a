//! Windowed fetch loop for `NewsfeedClient`.

use std::time::Duration;

use chrono::NaiveDate;

use crate::error::NewsfeedError;
use crate::types::RawPost;
use crate::window::plan_windows;

use super::NewsfeedClient;

/// Result of walking a date range window by window.
///
/// A walk stops at the first failing window. Posts from the windows fetched
/// before the failure are kept in `posts`, and the failure is in `halted`.
#[derive(Debug)]
pub struct FetchOutcome {
    pub posts: Vec<RawPost>,
    pub windows_total: usize,
    pub windows_fetched: usize,
    /// Items dropped because they did not match the expected shape.
    pub skipped_items: usize,
    pub halted: Option<NewsfeedError>,
}

impl FetchOutcome {
    /// `true` when every planned window was fetched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.halted.is_none()
    }

    /// Converts into a plain `Result`, discarding partial posts on failure.
    ///
    /// # Errors
    ///
    /// Returns the error that halted the walk, if any.
    pub fn into_result(self) -> Result<Vec<RawPost>, NewsfeedError> {
        match self.halted {
            Some(err) => Err(err),
            None => Ok(self.posts),
        }
    }
}

impl NewsfeedClient {
    /// Fetches every post matching `query` published between `start` and
    /// `end` (both inclusive).
    ///
    /// The range is split into windows of `window_days` days (see
    /// [`plan_windows`]) and requested strictly one after another, sleeping
    /// `inter_window_delay_ms` between consecutive requests. There is no
    /// retry: the first failing window ends the walk and is reported in
    /// [`FetchOutcome::halted`].
    ///
    /// An `end` before `start` plans no windows and returns an empty,
    /// complete outcome without any request.
    pub async fn fetch_all(
        &self,
        query: &str,
        start: NaiveDate,
        end: NaiveDate,
        window_days: u32,
        inter_window_delay_ms: u64,
    ) -> FetchOutcome {
        let windows = plan_windows(start, end, window_days);
        let mut outcome = FetchOutcome {
            posts: Vec::new(),
            windows_total: windows.len(),
            windows_fetched: 0,
            skipped_items: 0,
            halted: None,
        };

        if windows.is_empty() {
            tracing::info!(query, %start, %end, "empty date range; nothing to fetch");
            return outcome;
        }

        for (idx, window) in windows.into_iter().enumerate() {
            if idx > 0 && inter_window_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_window_delay_ms)).await;
            }

            match self.search_window(query, window).await {
                Ok(page) => {
                    tracing::info!(
                        query,
                        %window,
                        items = page.items.len(),
                        skipped = page.skipped,
                        "fetched newsfeed window"
                    );
                    outcome.posts.extend(page.items);
                    outcome.skipped_items += page.skipped;
                    outcome.windows_fetched += 1;
                }
                Err(err) => {
                    tracing::warn!(
                        query,
                        %window,
                        fetched = outcome.windows_fetched,
                        total = outcome.windows_total,
                        error = %err,
                        "newsfeed fetch halted"
                    );
                    outcome.halted = Some(err);
                    break;
                }
            }
        }

        outcome
    }
}
