use burn::{
    nn::attention::generate_padding_mask,
    tensor::{backend::Backend, Bool, Int, Tensor},
};
use derive_new::new;
use tokenizers::Tokenizer;

use crate::utils::tensors::pad_to;

use super::InferenceError;

/// An inference batch for sequence classification
#[derive(Debug, Clone, new)]
pub struct Infer<B: Backend> {
    /// Tokenized text as 2D tensor: [batch_size, seq_length]
    pub tokens: Tensor<B, 2, Int>,

    /// Padding mask for the tokenized text containing booleans for padding locations
    pub mask_pad: Tensor<B, 2, Bool>,
}

/// How a batch is padded
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Padding {
    /// Pad every sequence to exactly the maximum sequence length
    Fixed,

    /// Pad to the longest sequence in the batch, never beyond the maximum sequence length
    Longest,
}

/// Struct for batching text for sequence classification
#[derive(Clone)]
pub struct Batcher<B: Backend> {
    /// Tokenizer for converting text to token IDs
    pub tokenizer: Tokenizer,

    /// Maximum sequence length for tokenized text
    pub max_seq_length: usize,

    /// ID of the padding token
    pub pad_token_id: usize,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    pub device: B::Device,
}

impl<B: Backend> Batcher<B> {
    /// Creates a new batcher
    pub fn new(
        tokenizer: Tokenizer,
        pad_token_id: usize,
        max_seq_length: usize,
        device: B::Device,
    ) -> Self {
        Self {
            tokenizer,
            max_seq_length,
            pad_token_id,
            device,
        }
    }

    /// Tokenize each item, truncating to the maximum sequence length
    pub fn token_ids(&self, items: Vec<String>) -> Result<Vec<Vec<usize>>, InferenceError> {
        let encodings = self
            .tokenizer
            .encode_batch(items, true)
            .map_err(|e| InferenceError::Tokenizer(e.to_string()))?;

        Ok(encodings
            .iter()
            .map(|encoding| {
                encoding
                    .get_ids()
                    .iter()
                    .take(self.max_seq_length)
                    .map(|t| *t as usize)
                    .collect()
            })
            .collect())
    }

    /// Collects a list of texts into an inference batch
    pub fn batch(&self, items: Vec<String>, padding: Padding) -> Result<Infer<B>, InferenceError> {
        if items.is_empty() {
            return Err(InferenceError::EmptyBatch);
        }

        let token_ids_list = self.token_ids(items)?;

        let batch = match padding {
            Padding::Longest => {
                let padding = generate_padding_mask(
                    self.pad_token_id,
                    token_ids_list,
                    Some(self.max_seq_length),
                    &self.device,
                );

                Infer::new(padding.tensor, padding.mask)
            }
            Padding::Fixed => {
                let tokens = pad_to::<B>(
                    self.pad_token_id,
                    token_ids_list,
                    self.max_seq_length,
                    &self.device,
                );
                let mask_pad = tokens.clone().equal_elem(self.pad_token_id as i64);

                Infer::new(tokens, mask_pad)
            }
        };

        Ok(batch)
    }
}
