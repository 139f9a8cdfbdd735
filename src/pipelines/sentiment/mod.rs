/// Sentiment classes and label parsing
pub mod labels;

/// Tokenizing and padding text into model input
pub mod batcher;

/// The classifier seam and its Burn implementation
pub mod classifier;

/// Loading tokenizers from artifact directories
pub mod tokenizer;

/// The inference client
pub mod inference;

/// Cleaning plus inference over single texts and tables
pub mod pipeline;

pub use batcher::{Batcher, Infer, Padding};
pub use classifier::{BurnClassifier, Classifier, Probabilities};
pub use inference::{InferenceClient, InferenceError, Prediction, Status};
pub use labels::{Sentiment, ERROR_LABEL};
pub use pipeline::{Pipeline, PipelineError};
