use std::fmt::Display;

use super::{
    batcher::Padding,
    classifier::{Classifier, Probabilities},
    labels::{Sentiment, ERROR_LABEL},
};

/// A single sentiment prediction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    /// The predicted sentiment, or `None` for the sentinel error result
    pub sentiment: Option<Sentiment>,

    /// The probability of the predicted sentiment
    pub confidence: f32,

    /// Probabilities in class order: Negative, Neutral, Positive
    pub probabilities: Probabilities,
}

impl Prediction {
    /// The sentinel returned when no model is available
    pub const ERROR: Prediction = Prediction {
        sentiment: None,
        confidence: 0.0,
        probabilities: [0.0; 3],
    };

    /// Take the most probable class. Ties go to the lowest class id.
    pub fn from_probabilities(probabilities: Probabilities) -> Self {
        let (id, confidence) = probabilities.iter().copied().enumerate().fold(
            (0, f32::NEG_INFINITY),
            |best, (id, p)| if p > best.1 { (id, p) } else { best },
        );

        Self {
            sentiment: Sentiment::from_id(id),
            confidence,
            probabilities,
        }
    }

    /// The display label, "Error" for the sentinel
    pub fn label(&self) -> &'static str {
        self.sentiment.map(|s| s.as_str()).unwrap_or(ERROR_LABEL)
    }

    /// Whether this is the sentinel error result
    pub fn is_error(&self) -> bool {
        self.sentiment.is_none()
    }
}

/// Whether a model could be loaded
enum ModelState {
    /// The classifier is loaded and ready for inference
    Ready(Box<dyn Classifier>),

    /// Loading failed; the reason is kept for display
    Unavailable(String),
}

/// Model status as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The model is loaded on the named device
    Online(String),

    /// The model failed to load
    Offline(String),
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Online(device) => write!(f, "ONLINE ({})", device),
            Status::Offline(reason) => write!(f, "OFFLINE (Model Error: {})", reason),
        }
    }
}

/// Owns the classifier for the life of the process. Created once at startup and read-only
/// afterwards; there is no reload path.
pub struct InferenceClient {
    state: ModelState,
}

impl InferenceClient {
    /// Wrap a ready classifier
    pub fn new(classifier: impl Classifier + 'static) -> Self {
        Self {
            state: ModelState::Ready(Box::new(classifier)),
        }
    }

    /// A client whose model could not be loaded
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: ModelState::Unavailable(reason.into()),
        }
    }

    /// Build a client from the outcome of loading a classifier. Failures put the client in
    /// degraded mode instead of propagating.
    pub fn from_load<C: Classifier + 'static>(loaded: anyhow::Result<C>) -> Self {
        match loaded {
            Ok(classifier) => {
                let client = Self::new(classifier);
                log::info!("Model loaded: {}", client.status());
                client
            }
            Err(e) => {
                log::error!("Error loading model: {:#}", e);
                Self::unavailable(format!("{:#}", e))
            }
        }
    }

    /// Whether predictions can be made
    pub fn is_available(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    /// The user-facing model status
    pub fn status(&self) -> Status {
        match &self.state {
            ModelState::Ready(classifier) => Status::Online(classifier.device_name()),
            ModelState::Unavailable(reason) => Status::Offline(reason.clone()),
        }
    }

    /// Predict the sentiment of one text, padded to the classifier's sequence length. Returns
    /// the sentinel error result if the model is unavailable or inference fails.
    pub fn predict_one(&self, text: &str) -> Prediction {
        let ModelState::Ready(classifier) = &self.state else {
            return Prediction::ERROR;
        };

        match classifier.classify(vec![text.to_string()], Padding::Fixed) {
            Ok(probabilities) => probabilities
                .into_iter()
                .next()
                .map(Prediction::from_probabilities)
                .unwrap_or(Prediction::ERROR),
            Err(e) => {
                log::error!("Inference failed: {}", e);
                Prediction::ERROR
            }
        }
    }

    /// Predict many texts with one forward pass per chunk of `chunk_size` texts, each chunk
    /// padded to its longest sequence. Results are in input order.
    pub fn predict_many(
        &self,
        texts: &[String],
        chunk_size: usize,
    ) -> Result<Vec<Prediction>, InferenceError> {
        let ModelState::Ready(classifier) = &self.state else {
            return Ok(vec![Prediction::ERROR; texts.len()]);
        };

        let chunk_size = chunk_size.max(1);
        let mut predictions = Vec::with_capacity(texts.len());

        for (index, chunk) in texts.chunks(chunk_size).enumerate() {
            log::debug!("Running inference on chunk {} ({} texts)", index, chunk.len());

            let probabilities = classifier.classify(chunk.to_vec(), Padding::Longest)?;

            if probabilities.len() != chunk.len() {
                return Err(InferenceError::BatchSize {
                    expected: chunk.len(),
                    actual: probabilities.len(),
                });
            }

            predictions.extend(probabilities.into_iter().map(Prediction::from_probabilities));
        }

        Ok(predictions)
    }
}

/// Inference Error
#[derive(thiserror::Error, Debug)]
pub enum InferenceError {
    /// The tokenizer rejected the input
    #[error("unable to encode text: {0}")]
    Tokenizer(String),

    /// A batch with no texts was submitted
    #[error("cannot run inference on an empty batch")]
    EmptyBatch,

    /// The model head does not produce three classes
    #[error("expected 3 sentiment classes, the model produces {0}")]
    Classes(usize),

    /// The model returned a different number of rows than it was given
    #[error("expected {expected} predictions, got {actual}")]
    BatchSize {
        /// Texts submitted
        expected: usize,

        /// Predictions returned
        actual: usize,
    },
}
