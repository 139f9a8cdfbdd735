/// Plain-text rendering of the dashboard
pub mod report;

pub use report::render;

use crate::{
    datasets::{DatasetError, Review, Schema, Table},
    pipelines::{
        aggregation::{top_bigrams, BigramCount, WordCloud, WordCloudConfig},
        sentiment::Sentiment,
    },
};

/// Headline review counts. `total` covers every row of the source table, so rows whose label
/// was not recognized count toward it (as `unlabeled`) but toward no sentiment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Kpis {
    /// All rows, labeled or not
    pub total: usize,

    /// Positive reviews
    pub positive: usize,

    /// Neutral reviews
    pub neutral: usize,

    /// Negative reviews
    pub negative: usize,

    /// Rows whose label names no sentiment
    pub unlabeled: usize,
}

impl Kpis {
    /// The count for one sentiment
    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
            Sentiment::Positive => self.positive,
        }
    }

    /// The share of one sentiment among all rows, in percent. Zero when there are no rows.
    pub fn share(&self, sentiment: Sentiment) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        self.count(sentiment) as f64 * 100.0 / self.total as f64
    }
}

/// The dashboard view over a set of labeled reviews. Used for both the historical dataset and
/// freshly scored uploads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dashboard {
    reviews: Vec<Review>,
    unlabeled: usize,
}

impl Dashboard {
    /// Create a dashboard over reviews
    pub fn new(reviews: Vec<Review>) -> Self {
        Self {
            reviews,
            unlabeled: 0,
        }
    }

    /// Normalize a labeled table and build a dashboard over it
    pub fn from_table(table: &Table) -> Result<Self, DatasetError> {
        Self::from_schema(table, &Schema::detect(table)?)
    }

    /// Build a dashboard over a table with known text and label columns. Rows with unrecognized
    /// labels are kept out of the reviews but still counted.
    pub fn from_schema(table: &Table, schema: &Schema) -> Result<Self, DatasetError> {
        let reviews = schema.reviews(table)?;

        Ok(Self {
            unlabeled: table.len() - reviews.len(),
            reviews,
        })
    }

    /// All reviews
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Review counts by sentiment
    pub fn kpis(&self) -> Kpis {
        self.reviews
            .iter()
            .fold(
                Kpis {
                    total: self.unlabeled,
                    unlabeled: self.unlabeled,
                    ..Kpis::default()
                },
                |mut kpis, review| {
                    kpis.total += 1;
                    match review.sentiment {
                        Sentiment::Negative => kpis.negative += 1,
                        Sentiment::Neutral => kpis.neutral += 1,
                        Sentiment::Positive => kpis.positive += 1,
                    }
                    kpis
                },
            )
    }

    /// The first `n` reviews
    pub fn sample(&self, n: usize) -> &[Review] {
        &self.reviews[..n.min(self.reviews.len())]
    }

    /// The texts of every review with the given sentiment
    pub fn slice(&self, sentiment: Sentiment) -> Vec<&str> {
        self.reviews
            .iter()
            .filter(|review| review.sentiment == sentiment)
            .map(|review| review.text.as_str())
            .collect()
    }

    /// The most frequent bigrams for one sentiment
    pub fn top_bigrams(&self, sentiment: Sentiment, n: usize) -> Vec<BigramCount> {
        top_bigrams(&self.slice(sentiment), n)
    }

    /// The word cloud for one sentiment, if it has any words
    pub fn word_cloud(&self, sentiment: Sentiment, config: &WordCloudConfig) -> Option<WordCloud> {
        let slice = self.slice(sentiment);

        if slice.is_empty() {
            return None;
        }

        WordCloud::generate(&slice, config)
    }
}
