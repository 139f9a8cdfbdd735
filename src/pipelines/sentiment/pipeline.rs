use crate::{
    datasets::{DatasetError, Table},
    text::Cleaner,
};

use super::{InferenceClient, InferenceError, Prediction};

/// Column holding the cleaned review text
pub static CLEAN_TEXT_COLUMN: &str = "clean_text";

/// Column holding the predicted sentiment label
pub static LABEL_COLUMN: &str = "predicted_label";

/// Column holding the prediction confidence
pub static CONFIDENCE_COLUMN: &str = "confidence_score";

/// The default number of texts per forward pass
pub const DEFAULT_CHUNK_SIZE: usize = 32;

/// Cleans review text and runs it through the inference client
pub struct Pipeline {
    client: InferenceClient,
    cleaner: Cleaner,

    /// Texts per forward pass during batch prediction
    chunk_size: usize,
}

impl Pipeline {
    /// Create a pipeline
    pub fn new(client: InferenceClient, cleaner: Cleaner, chunk_size: usize) -> Self {
        Self {
            client,
            cleaner,
            chunk_size: chunk_size.max(1),
        }
    }

    /// The inference client
    pub fn client(&self) -> &InferenceClient {
        &self.client
    }

    /// The text cleaner
    pub fn cleaner(&self) -> &Cleaner {
        &self.cleaner
    }

    /// The number of texts per forward pass
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Clean and score a single raw review
    pub fn predict_sentiment(&self, text: &str) -> Prediction {
        if !self.client.is_available() {
            return Prediction::ERROR;
        }

        self.client.predict_one(&self.cleaner.clean(text))
    }

    /// Score every row of `table` by the text in `text_column`.
    ///
    /// Rows whose text cleans to nothing are dropped, so the result may be shorter than the
    /// input; surviving rows keep their order and original index. The result gains the
    /// `clean_text`, `predicted_label` and `confidence_score` columns. If the model is
    /// unavailable the table is returned untouched.
    pub fn predict_batch(&self, mut table: Table, text_column: &str) -> Result<Table, PipelineError> {
        if !self.client.is_available() {
            log::warn!("Model unavailable, returning the table without predictions");
            return Ok(table);
        }

        let cleaned: Vec<String> = table
            .column(text_column)
            .map_err(|_| PipelineError::ColumnNotFound(text_column.to_string()))?
            .into_iter()
            .map(|text| self.cleaner.clean(text))
            .collect();

        table.set_column(CLEAN_TEXT_COLUMN, cleaned)?;

        let clean_index = table
            .column_index(CLEAN_TEXT_COLUMN)
            .ok_or_else(|| PipelineError::ColumnNotFound(CLEAN_TEXT_COLUMN.to_string()))?;

        let before = table.len();
        table.retain(|row| !row.values[clean_index].trim().is_empty());

        if table.len() < before {
            log::info!("Dropped {} rows that were empty after cleaning", before - table.len());
        }

        let texts: Vec<String> = table
            .column(CLEAN_TEXT_COLUMN)?
            .into_iter()
            .map(str::to_string)
            .collect();

        let predictions = self.client.predict_many(&texts, self.chunk_size)?;

        table.set_column(
            LABEL_COLUMN,
            predictions.iter().map(|p| p.label().to_string()).collect(),
        )?;
        table.set_column(
            CONFIDENCE_COLUMN,
            predictions.iter().map(|p| p.confidence.to_string()).collect(),
        )?;

        Ok(table)
    }
}

/// Pipeline Error
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The requested text column does not exist
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Inference failed part way through the batch
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// The table could not be updated
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
