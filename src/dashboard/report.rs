use std::fmt::Write;

use crate::pipelines::{aggregation::BigramCount, sentiment::Sentiment};

use super::Dashboard;

/// Width of the distribution bars
const BAR_WIDTH: usize = 40;

/// Longest review text shown in the sample table
const SAMPLE_TEXT_WIDTH: usize = 72;

/// Render the KPI cards, sentiment distribution, sample rows and bigram table for the selected
/// sentiment
pub fn render(
    dashboard: &Dashboard,
    sentiment: Sentiment,
    sample_size: usize,
    top_n: usize,
) -> String {
    let mut out = String::new();
    let kpis = dashboard.kpis();

    let _ = writeln!(out, "Total reviews: {}", kpis.total);
    for sentiment in [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative] {
        let _ = writeln!(out, "{:<9} {}", sentiment.as_str(), kpis.count(sentiment));
    }
    if kpis.unlabeled > 0 {
        let _ = writeln!(out, "{:<9} {}", "Unlabeled", kpis.unlabeled);
    }

    let _ = writeln!(out, "\nSentiment distribution");
    for sentiment in Sentiment::ALL {
        let share = kpis.share(sentiment);
        let filled = ((share / 100.0) * BAR_WIDTH as f64).round() as usize;

        let _ = writeln!(
            out,
            "{:<9} {:<width$} {:>5.1}%",
            sentiment.as_str(),
            "#".repeat(filled),
            share,
            width = BAR_WIDTH
        );
    }

    let _ = writeln!(out, "\nSample data");
    for review in dashboard.sample(sample_size) {
        let _ = writeln!(
            out,
            "{:<9} {}",
            review.sentiment.as_str(),
            truncate(&review.text, SAMPLE_TEXT_WIDTH)
        );
    }

    let _ = writeln!(out, "\nTop bigrams ({})", sentiment);
    let bigrams = dashboard.top_bigrams(sentiment, top_n);
    if bigrams.is_empty() {
        let _ = writeln!(out, "Not enough data to form bigrams.");
    } else {
        out.push_str(&bigram_table(&bigrams));
    }

    out
}

fn bigram_table(bigrams: &[BigramCount]) -> String {
    let width = bigrams
        .iter()
        .map(|b| b.bigram.chars().count())
        .max()
        .unwrap_or(0);

    bigrams
        .iter()
        .map(|b| format!("{:<width$} {}\n", b.bigram, b.frequency, width = width))
        .collect()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(width.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}
