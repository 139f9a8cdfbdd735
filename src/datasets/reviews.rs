use std::path::Path;

use crate::pipelines::sentiment::Sentiment;

use super::{DatasetError, Table};

/// Accepted names for the sentiment label column, in order of preference
pub static LABEL_COLUMNS: &[&str] = &["label", "predicted_label", "sentiment_pred"];

/// Accepted names for the review text column, in order of preference
pub static TEXT_COLUMNS: &[&str] = &["content", "clean_text", "Review Text"];

/// A review with its sentiment, the canonical record consumed by the dashboard
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Review {
    /// The review text
    pub text: String,

    /// The labeled or predicted sentiment
    pub sentiment: Sentiment,
}

/// Which columns of a table hold the text and the label
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    /// The text column
    pub text_column: String,

    /// The label column
    pub label_column: String,
}

impl Schema {
    /// Pick the text and label columns of a table
    pub fn detect(table: &Table) -> Result<Self, DatasetError> {
        let text_column = first_present(table, TEXT_COLUMNS, "text")?;
        let label_column = first_present(table, LABEL_COLUMNS, "label")?;

        Ok(Self {
            text_column,
            label_column,
        })
    }

    /// Convert every row into a review. Rows whose label names no sentiment are skipped.
    pub fn reviews(&self, table: &Table) -> Result<Vec<Review>, DatasetError> {
        let texts = table.column(&self.text_column)?;
        let labels = table.column(&self.label_column)?;

        let mut reviews = Vec::with_capacity(texts.len());
        let mut skipped = 0;

        for (text, label) in texts.into_iter().zip(labels) {
            match label.parse::<Sentiment>() {
                Ok(sentiment) => reviews.push(Review {
                    text: text.to_string(),
                    sentiment,
                }),
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!(
                "Skipped {} rows with unrecognized values in column {}",
                skipped,
                self.label_column
            );
        }

        Ok(reviews)
    }
}

fn first_present(
    table: &Table,
    candidates: &[&str],
    kind: &'static str,
) -> Result<String, DatasetError> {
    candidates
        .iter()
        .find(|name| table.has_column(name))
        .map(|name| name.to_string())
        .ok_or_else(|| DatasetError::MissingColumn {
            kind,
            candidates: candidates.join(", "),
        })
}

/// Normalize a labeled table into reviews
pub fn normalize(table: &Table) -> Result<Vec<Review>, DatasetError> {
    Schema::detect(table)?.reviews(table)
}

/// Load the historical dataset shown on the default dashboard. A missing or unreadable file
/// yields `None`, since the dashboard can run without it.
pub fn load_history(path: impl AsRef<Path>) -> Option<Table> {
    let path = path.as_ref();

    if !path.exists() {
        log::info!("No historical dataset at {}", path.display());
        return None;
    }

    match Table::from_path(path) {
        Ok(table) => Some(table),
        Err(e) => {
            log::error!("Error loading data from {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(headers.iter().copied());
        for row in rows {
            table.push_row(row.iter().copied());
        }
        table
    }

    #[test]
    fn prefers_historical_column_names() {
        let table = table(
            &["clean_text", "content", "predicted_label", "label"],
            &[&["bagus", "Bagus!", "Positive", "2"]],
        );

        assert_eq!(
            Schema::detect(&table).unwrap(),
            Schema {
                text_column: "content".to_string(),
                label_column: "label".to_string(),
            }
        );
    }

    #[test]
    fn maps_numeric_and_named_labels() {
        let table = table(
            &["Review Text", "sentiment_pred"],
            &[
                &["mantap", "2"],
                &["biasa", "Netral"],
                &["lemot", "negative"],
                &["???", "unknown"],
            ],
        );

        let reviews = normalize(&table).unwrap();

        let sentiments: Vec<_> = reviews.iter().map(|r| r.sentiment).collect();
        assert_eq!(
            sentiments,
            vec![Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative]
        );
        assert_eq!(reviews[0].text, "mantap");
    }

    #[test]
    fn missing_label_column_is_reported() {
        let table = table(&["content"], &[&["bagus"]]);

        assert!(matches!(
            normalize(&table),
            Err(DatasetError::MissingColumn { kind: "label", .. })
        ));
    }

    #[test]
    fn missing_history_is_not_fatal() {
        assert_eq!(load_history("does/not/exist.csv"), None);
    }
}
