//! The `fetch` command: search, normalize, measure, classify and export.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use vkpulse_core::{daily_aggregates, metric_series, AppConfig, Post};
use vkpulse_newsfeed::{normalize_posts, plan_windows, FetchOutcome, NewsfeedClient};
use vkpulse_sentiment::{
    classify_posts, filter_by_label, label_distribution, LexiconClassifier, ModelClassifier,
    SentimentError, SentimentLabel, SentimentResult,
};

use crate::{export, report};

/// Sentiment strategy selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ClassifierKind {
    /// Bundled Russian/English lexicon (polarity score)
    Lexicon,
    /// Remote text-classification model at `VKPULSE_CLASSIFIER_URL`
    Model,
}

#[derive(Debug, Args)]
pub(crate) struct FetchArgs {
    /// Search query, plain or percent-encoded (e.g. `%23hashtag`)
    #[arg(long, short)]
    pub query: String,

    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// VK access token; defaults to `VK_ACCESS_TOKEN`
    #[arg(long)]
    pub access_token: Option<String>,

    /// Where to write the post CSV
    #[arg(long, short, default_value = "vk_data.csv")]
    pub output: PathBuf,

    /// Also write the per-day aggregates to this CSV
    #[arg(long)]
    pub daily_output: Option<PathBuf>,

    /// Also write per-post likes, reposts, views and comments over time
    #[arg(long)]
    pub metrics_output: Option<PathBuf>,

    /// Classify post sentiment with this strategy
    #[arg(long, value_enum)]
    pub classifier: Option<ClassifierKind>,

    /// Keep only posts with this sentiment (uses the lexicon unless
    /// `--classifier` says otherwise)
    #[arg(long)]
    pub sentiment: Option<SentimentLabel>,

    /// Print the window plan without calling VK
    #[arg(long)]
    pub dry_run: bool,
}

impl FetchArgs {
    /// The strategy to run, if any. A sentiment filter needs one.
    pub(crate) fn effective_classifier(&self) -> Option<ClassifierKind> {
        self.classifier
            .or_else(|| self.sentiment.map(|_| ClassifierKind::Lexicon))
    }
}

/// Run the `fetch` command.
///
/// A fetch that stops part-way still exports what the earlier windows
/// returned; the command only fails when the fetch failed with nothing
/// retrieved. Classification failures are reported and the export proceeds
/// without sentiment columns.
///
/// # Errors
///
/// Returns an error if no access token is configured, the VK client cannot
/// be built, nothing could be fetched, or an output file cannot be written.
#[allow(clippy::too_many_lines)]
pub(crate) async fn run_fetch(config: &AppConfig, args: &FetchArgs) -> anyhow::Result<()> {
    if args.dry_run {
        let windows = plan_windows(args.start, args.end, config.window_days);
        println!(
            "dry-run: would search {:?} in {} window(s) of up to {} day(s)",
            args.query,
            windows.len(),
            config.window_days
        );
        report::print_windows(&windows);
        return Ok(());
    }

    let token = args
        .access_token
        .as_deref()
        .or(config.access_token.as_deref())
        .ok_or_else(|| {
            anyhow::anyhow!("VK_ACCESS_TOKEN is not set; pass --access-token or set it in .env")
        })?;

    let client = NewsfeedClient::with_base_url(
        token,
        config.request_timeout_secs,
        &config.user_agent,
        &config.api_base_url,
    )
    .context("failed to build VK client")?
    .with_api_version(&config.api_version)
    .with_page_size(config.page_size);

    let FetchOutcome {
        posts: raw,
        windows_total,
        windows_fetched,
        skipped_items,
        halted,
    } = client
        .fetch_all(
            &args.query,
            args.start,
            args.end,
            config.window_days,
            config.inter_window_delay_ms,
        )
        .await;

    if let Some(err) = halted {
        tracing::error!(
            query = %args.query,
            windows_fetched,
            windows_total,
            error = %err,
            "fetch stopped early"
        );
        if raw.is_empty() {
            return Err(anyhow::Error::new(err).context("no posts were fetched"));
        }
        eprintln!(
            "warning: fetch stopped after {windows_fetched}/{windows_total} window(s): {err}"
        );
    }

    let normalized = normalize_posts(raw);
    report::print_fetch_summary(
        normalized.posts.len(),
        normalized.duplicates_removed,
        normalized.issues.len(),
        skipped_items,
    );

    let mut posts = normalized.posts;
    report::print_daily(&daily_aggregates(&posts));

    let mut sentiments = None;
    if let Some(kind) = args.effective_classifier() {
        match classify(config, kind, &posts).await {
            Ok(results) => {
                report::print_distribution(&label_distribution(&results));
                if let Some(label) = args.sentiment {
                    let (filtered, kept) = keep_label(&posts, results, label);
                    println!();
                    println!("{} post(s) with {label} sentiment", filtered.len());
                    report::print_daily(&daily_aggregates(&filtered));
                    posts = filtered;
                    sentiments = Some(kept);
                } else {
                    sentiments = Some(results);
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "sentiment classification failed");
                eprintln!("warning: sentiment classification failed, exporting without it: {err}");
            }
        }
    }

    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    export::write_posts(file, &posts, sentiments.as_deref())
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("saved {} post(s) to {}", posts.len(), args.output.display());

    if let Some(path) = &args.daily_output {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        export::write_daily(file, &daily_aggregates(&posts))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("saved daily aggregates to {}", path.display());
    }

    if let Some(path) = &args.metrics_output {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        export::write_metric_series(file, &metric_series(&posts))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("saved per-post metrics to {}", path.display());
    }

    Ok(())
}

async fn classify(
    config: &AppConfig,
    kind: ClassifierKind,
    posts: &[Post],
) -> Result<Vec<SentimentResult>, SentimentError> {
    match kind {
        ClassifierKind::Lexicon => classify_posts(&LexiconClassifier, posts).await,
        ClassifierKind::Model => {
            let url = config.classifier_url.as_deref().ok_or_else(|| {
                SentimentError::Model("VKPULSE_CLASSIFIER_URL is not set".to_owned())
            })?;
            let model = ModelClassifier::new(
                url,
                config.request_timeout_secs,
                config.classifier_batch_size,
            )?;
            classify_posts(&model, posts).await
        }
    }
}

/// Narrows `posts` to `label`, keeping the results aligned with the
/// narrowed set.
pub(crate) fn keep_label(
    posts: &[Post],
    results: Vec<SentimentResult>,
    label: SentimentLabel,
) -> (Vec<Post>, Vec<SentimentResult>) {
    let filtered = filter_by_label(posts, &results, label);
    let kept = results
        .into_iter()
        .filter(|r| r.sentiment.label() == label)
        .enumerate()
        .map(|(index, r)| SentimentResult { index, ..r })
        .collect();
    (filtered, kept)
}

#[cfg(test)]
#[path = "fetch_test.rs"]
mod tests;
