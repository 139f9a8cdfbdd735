use std::{cell::RefCell, rc::Rc};

use pretty_assertions::assert_eq;
use sentiment_dashboard::{
    dashboard::{Dashboard, Kpis},
    datasets::Table,
    pipelines::sentiment::{
        Classifier, InferenceClient, InferenceError, Padding, Pipeline, PipelineError,
        Probabilities, Sentiment, Status,
    },
    text::Cleaner,
};

/// Scores by keyword and records the size of every call
#[derive(Clone, Default)]
struct KeywordClassifier {
    calls: Rc<RefCell<Vec<(usize, Padding)>>>,
}

impl KeywordClassifier {
    fn score(text: &str) -> Probabilities {
        if text.contains("bagus") || text.contains("mantap") {
            [0.1, 0.2, 0.7]
        } else if text.contains("buruk") || text.contains("lambat") {
            [0.8, 0.15, 0.05]
        } else {
            [0.25, 0.5, 0.25]
        }
    }
}

impl Classifier for KeywordClassifier {
    fn classify(
        &self,
        texts: Vec<String>,
        padding: Padding,
    ) -> Result<Vec<Probabilities>, InferenceError> {
        self.calls.borrow_mut().push((texts.len(), padding));

        Ok(texts.iter().map(|text| Self::score(text)).collect())
    }

    fn device_name(&self) -> String {
        "MOCK".to_string()
    }
}

/// Always returns one result too few
struct ShortClassifier;

impl Classifier for ShortClassifier {
    fn classify(
        &self,
        texts: Vec<String>,
        _padding: Padding,
    ) -> Result<Vec<Probabilities>, InferenceError> {
        Ok(vec![[0.0, 0.0, 1.0]; texts.len().saturating_sub(1)])
    }

    fn device_name(&self) -> String {
        "MOCK".to_string()
    }
}

fn pipeline(chunk_size: usize) -> (Pipeline, KeywordClassifier) {
    let classifier = KeywordClassifier::default();
    let client = InferenceClient::new(classifier.clone());

    (Pipeline::new(client, Cleaner::default(), chunk_size), classifier)
}

fn reviews(texts: &[&str]) -> Table {
    let mut table = Table::new(["reviewId", "content"]);

    for (i, text) in texts.iter().enumerate() {
        table.push_row([format!("r{}", i), text.to_string()]);
    }

    table
}

#[test]
fn batch_scores_and_aggregates() {
    let (pipeline, _) = pipeline(32);

    let table = reviews(&[
        "Aplikasinya BAGUS!!",
        "mantap, dokternya ramah",
        "lemot bgt :(",
        "biasa aja",
    ]);

    let scored = pipeline.predict_batch(table, "content").unwrap();

    assert_eq!(
        scored.headers(),
        &["reviewId", "content", "clean_text", "predicted_label", "confidence_score"]
    );
    assert_eq!(
        scored.column("predicted_label").unwrap(),
        vec!["Positive", "Positive", "Negative", "Neutral"]
    );
    assert_eq!(
        scored.column("clean_text").unwrap(),
        vec!["aplikasinya bagus", "mantap dokternya ramah", "lambat banget", "biasa aja"]
    );

    let dashboard = Dashboard::from_table(&scored).unwrap();

    assert_eq!(
        dashboard.kpis(),
        Kpis {
            total: 4,
            positive: 2,
            neutral: 1,
            negative: 1,
            unlabeled: 0,
        }
    );
}

#[test]
fn batch_drops_rows_that_clean_to_nothing() {
    let (pipeline, _) = pipeline(32);

    let table = reviews(&["👍👍", "bagus", "https://halodoc.com", "", "lemot"]);
    let scored = pipeline.predict_batch(table, "content").unwrap();

    assert_eq!(scored.len(), 2);
    assert_eq!(
        scored.rows().iter().map(|row| row.index).collect::<Vec<_>>(),
        vec![1, 4]
    );
    assert_eq!(scored.column("reviewId").unwrap(), vec!["r1", "r4"]);
}

#[test]
fn batch_of_only_empty_rows_is_empty() {
    let (pipeline, classifier) = pipeline(32);

    let scored = pipeline
        .predict_batch(reviews(&["!!!", "123", "  "]), "content")
        .unwrap();

    assert!(scored.is_empty());
    assert!(scored.has_column("predicted_label"));
    assert!(classifier.calls.borrow().is_empty());
}

#[test]
fn batch_runs_one_pass_per_chunk() {
    let (pipeline, classifier) = pipeline(2);

    let scored = pipeline
        .predict_batch(reviews(&["bagus", "buruk", "oke", "mantap", "lemot"]), "content")
        .unwrap();

    assert_eq!(scored.len(), 5);
    assert_eq!(
        *classifier.calls.borrow(),
        vec![
            (2, Padding::Longest),
            (2, Padding::Longest),
            (1, Padding::Longest)
        ]
    );
}

#[test]
fn batch_requires_the_text_column() {
    let (pipeline, _) = pipeline(32);

    let err = pipeline
        .predict_batch(reviews(&["bagus"]), "Review Text")
        .unwrap_err();

    assert!(matches!(err, PipelineError::ColumnNotFound(ref column) if column == "Review Text"));
}

#[test]
fn unavailable_model_returns_the_table_untouched() {
    let client = InferenceClient::unavailable("missing weights");
    let pipeline = Pipeline::new(client, Cleaner::default(), 32);

    let table = reviews(&["bagus", "!!!"]);
    let scored = pipeline.predict_batch(table.clone(), "content").unwrap();

    assert_eq!(scored, table);

    let prediction = pipeline.predict_sentiment("bagus");

    assert!(prediction.is_error());
    assert_eq!(prediction.label(), "Error");
    assert_eq!(prediction.confidence, 0.0);
    assert_eq!(
        pipeline.client().status(),
        Status::Offline("missing weights".to_string())
    );
}

#[test]
fn live_prediction_cleans_first_and_is_deterministic() {
    let (pipeline, classifier) = pipeline(32);

    let first = pipeline.predict_sentiment("Pelayanannya BAGUS bgt!!");
    let second = pipeline.predict_sentiment("Pelayanannya BAGUS bgt!!");

    assert_eq!(first, second);
    assert_eq!(first.sentiment, Some(Sentiment::Positive));
    assert_eq!(first.confidence, 0.7);
    assert!((first.probabilities.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    assert_eq!(classifier.calls.borrow()[0], (1, Padding::Fixed));
    assert_eq!(pipeline.client().status().to_string(), "ONLINE (MOCK)");
}

#[test]
fn short_results_are_an_error() {
    let client = InferenceClient::new(ShortClassifier);

    let err = client
        .predict_many(&["a".to_string(), "b".to_string()], 32)
        .unwrap_err();

    assert!(matches!(
        err,
        InferenceError::BatchSize {
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn failed_loads_degrade_the_client() {
    let client = InferenceClient::from_load::<KeywordClassifier>(
        Err(anyhow::anyhow!("Model directory model was not found")),
    );

    assert!(!client.is_available());
    assert_eq!(
        client.status().to_string(),
        "OFFLINE (Model Error: Model directory model was not found)"
    );
    assert_eq!(
        client.predict_many(&["bagus".to_string()], 32).unwrap()[0].label(),
        "Error"
    );
}
