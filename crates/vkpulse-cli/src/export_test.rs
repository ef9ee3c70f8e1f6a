use chrono::{NaiveDate, TimeZone, Utc};
use vkpulse_core::metric_series;
use serde_json::json;
use vkpulse_sentiment::{Sentiment, SentimentLabel};

use super::*;

fn post(id: i64, views: Option<u64>) -> Post {
    Post {
        id,
        owner_id: -2001,
        published_at: Utc.with_ymd_and_hms(2023, 10, 1, 8, 30, 0).unwrap(),
        text: format!("post {id}, with \"quotes\""),
        comments: Some(5),
        likes: Some(10),
        reposts: Some(5),
        views,
        attachments: None,
    }
}

fn read_rows(bytes: &[u8]) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes);
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_owned).collect())
        .collect()
}

#[test]
fn writes_header_and_one_row_per_post() {
    let mut buf = Vec::new();
    write_posts(&mut buf, &[post(1, Some(200)), post(2, Some(100))], None).unwrap();

    let rows = read_rows(&buf);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], POST_HEADER.map(str::to_owned).to_vec());
    assert_eq!(
        rows[1],
        vec![
            "1",
            "2023-10-01T08:30:00+00:00",
            "-2001",
            "post 1, with \"quotes\"",
            "5",
            "10",
            "5",
            "200",
            "10",
            "",
        ]
    );
    assert_eq!(rows[2][0], "2");
    assert_eq!(rows[2][8], "20");
}

#[test]
fn undefined_values_are_empty_cells() {
    let mut zero_views = post(1, Some(0));
    zero_views.likes = None;
    let mut buf = Vec::new();
    write_posts(&mut buf, &[zero_views, post(2, None)], None).unwrap();

    let rows = read_rows(&buf);
    // likes.count and er_view
    assert_eq!(rows[1][5], "");
    assert_eq!(rows[1][7], "0");
    assert_eq!(rows[1][8], "");
    assert_eq!(rows[2][7], "");
    assert_eq!(rows[2][8], "");
}

#[test]
fn attachments_are_compact_json() {
    let mut with_photo = post(1, Some(10));
    with_photo.attachments = Some(json!([{"type": "photo"}, {"type": "link"}]));
    let mut buf = Vec::new();
    write_posts(&mut buf, &[with_photo], None).unwrap();

    let rows = read_rows(&buf);
    assert_eq!(rows[1][9], r#"[{"type":"photo"},{"type":"link"}]"#);
}

#[test]
fn sentiment_columns_are_appended() {
    let posts = [post(1, Some(200)), post(2, Some(200))];
    let results = [
        SentimentResult {
            index: 0,
            owner_id: -2001,
            post_id: 1,
            sentiment: Sentiment::Polarity(0.5),
        },
        SentimentResult {
            index: 1,
            owner_id: -2001,
            post_id: 2,
            sentiment: Sentiment::Label(SentimentLabel::Negative),
        },
    ];
    let mut buf = Vec::new();
    write_posts(&mut buf, &posts, Some(&results[..])).unwrap();

    let rows = read_rows(&buf);
    assert_eq!(rows[0][10..], ["sentiment", "polarity"]);
    assert_eq!(rows[1][10..], ["positive", "0.5"]);
    assert_eq!(rows[2][10..], ["negative", ""]);
}

#[test]
fn misaligned_sentiments_are_rejected() {
    let mut buf = Vec::new();
    let err = write_posts(&mut buf, &[post(1, Some(1))], Some(&[][..])).unwrap_err();
    assert!(err.to_string().contains("0 sentiment results for 1 posts"));
    assert!(buf.is_empty());
}

#[test]
fn empty_post_set_writes_header_only() {
    let mut buf = Vec::new();
    write_posts(&mut buf, &[], None).unwrap();
    assert_eq!(read_rows(&buf).len(), 1);
}

#[test]
fn writes_daily_rows() {
    let daily = [
        DailyAggregate {
            date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
            publications: 3,
            engagement_sum: 12.5,
            undefined_ratios: 1,
        },
        DailyAggregate {
            date: NaiveDate::from_ymd_opt(2023, 10, 2).unwrap(),
            publications: 2,
            engagement_sum: 0.0,
            undefined_ratios: 2,
        },
    ];
    let mut buf = Vec::new();
    write_daily(&mut buf, &daily).unwrap();

    let rows = read_rows(&buf);
    assert_eq!(rows[0], DAILY_HEADER.map(str::to_owned).to_vec());
    assert_eq!(rows[1], ["2023-10-01", "3", "12.5", "1"]);
    assert_eq!(rows[2], ["2023-10-02", "2", "0", "2"]);
}

#[test]
fn writes_per_post_metric_rows() {
    let mut unknown_views = post(2, None);
    unknown_views.published_at = Utc.with_ymd_and_hms(2023, 10, 2, 9, 0, 0).unwrap();
    let posts = [post(1, Some(200)), unknown_views];

    let mut buf = Vec::new();
    write_metric_series(&mut buf, &metric_series(&posts)).unwrap();

    let rows = read_rows(&buf);
    assert_eq!(rows[0], METRIC_HEADER.map(str::to_owned).to_vec());
    assert_eq!(rows[1], ["2023-10-01T08:30:00+00:00", "10", "5", "200", "5"]);
    assert_eq!(rows[2], ["2023-10-02T09:00:00+00:00", "10", "5", "", "5"]);
}
