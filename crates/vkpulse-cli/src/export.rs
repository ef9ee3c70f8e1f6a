//! CSV export of posts, daily aggregates and per-post metric series.

use std::io::Write;

use vkpulse_core::{
    engagement_ratio, engagement_series, publication_series, DailyAggregate, MetricPoint, Post,
};
use vkpulse_sentiment::SentimentResult;

const POST_HEADER: [&str; 10] = [
    "id",
    "date",
    "owner_id",
    "text",
    "comments.count",
    "likes.count",
    "reposts.count",
    "views.count",
    "er_view",
    "attachments",
];

const DAILY_HEADER: [&str; 4] = ["date", "publications", "er_view_sum", "undefined_er_view"];

const METRIC_HEADER: [&str; 5] = [
    "date",
    "likes.count",
    "reposts.count",
    "views.count",
    "comments.count",
];

/// Write `posts` as CSV, one row per post in the given order.
///
/// Missing counters and undefined engagement ratios are written as empty
/// cells. When `sentiments` is given, `sentiment` and `polarity` columns are
/// appended; `sentiments[i]` must describe `posts[i]`.
pub(crate) fn write_posts<W: Write>(
    writer: W,
    posts: &[Post],
    sentiments: Option<&[SentimentResult]>,
) -> anyhow::Result<()> {
    if let Some(results) = sentiments {
        anyhow::ensure!(
            results.len() == posts.len(),
            "{} sentiment results for {} posts",
            results.len(),
            posts.len()
        );
    }

    let mut csv = csv::Writer::from_writer(writer);

    let mut header = POST_HEADER.to_vec();
    if sentiments.is_some() {
        header.extend(["sentiment", "polarity"]);
    }
    csv.write_record(&header)?;

    for (idx, post) in posts.iter().enumerate() {
        let mut record = vec![
            post.id.to_string(),
            post.published_at.to_rfc3339(),
            post.owner_id.to_string(),
            post.text.clone(),
            cell(post.comments),
            cell(post.likes),
            cell(post.reposts),
            cell(post.views),
            cell(engagement_ratio(post)),
            post.attachments
                .as_ref()
                .map(serde_json::Value::to_string)
                .unwrap_or_default(),
        ];
        if let Some(results) = sentiments {
            let sentiment = results[idx].sentiment;
            record.push(sentiment.label().to_string());
            record.push(cell(sentiment.polarity()));
        }
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write one row per day: date, publication count, summed engagement ratio
/// and the number of posts whose ratio was undefined.
pub(crate) fn write_daily<W: Write>(writer: W, daily: &[DailyAggregate]) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(DAILY_HEADER)?;
    let rows = publication_series(daily)
        .into_iter()
        .zip(engagement_series(daily))
        .zip(daily);
    for (((date, publications), (_, engagement)), day) in rows {
        csv.write_record([
            date.to_string(),
            publications.to_string(),
            engagement.to_string(),
            day.undefined_ratios.to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the per-post counter series, one row per post in time order.
pub(crate) fn write_metric_series<W: Write>(
    writer: W,
    series: &[MetricPoint],
) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(METRIC_HEADER)?;
    for point in series {
        csv.write_record([
            point.at.to_rfc3339(),
            cell(point.likes),
            cell(point.reposts),
            cell(point.views),
            cell(point.comments),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
