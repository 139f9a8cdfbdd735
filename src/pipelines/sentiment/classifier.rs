use std::path::Path;

use burn::{module::Module, tensor::backend::Backend};

use crate::models::classifier::{self, Model};

use super::{
    batcher::{Batcher, Padding},
    tokenizer::load_tokenizer,
    InferenceError,
};

/// Model configuration file of an artifact directory
pub static CONFIG_FILE: &str = "config.json";

/// Model weights of an artifact directory
pub static WEIGHTS_FILE: &str = "model.safetensors";

/// Probabilities over the three sentiment classes, in class-id order
pub type Probabilities = [f32; 3];

/// The number of classes every classifier must produce
pub const N_CLASSES: usize = 3;

/// Anything that turns text into class probabilities
pub trait Classifier {
    /// Class probabilities for each text, in input order
    fn classify(
        &self,
        texts: Vec<String>,
        padding: Padding,
    ) -> Result<Vec<Probabilities>, InferenceError>;

    /// A short name for the device inference runs on
    fn device_name(&self) -> String;
}

/// A Burn model paired with its tokenizer
pub struct BurnClassifier<B: Backend> {
    /// The trained model
    model: Model<B>,

    /// Batcher for tokenizing and padding inputs
    batcher: Batcher<B>,
}

impl<B: Backend> BurnClassifier<B> {
    /// Pair an initialized model with a batcher
    pub fn new(model: Model<B>, batcher: Batcher<B>) -> Result<Self, InferenceError> {
        if model.n_classes != N_CLASSES {
            return Err(InferenceError::Classes(model.n_classes));
        }

        Ok(Self { model, batcher })
    }

    /// Load a Hugging Face sequence classification checkpoint from an artifact directory:
    /// `config.json`, `model.safetensors`, and `tokenizer.json` or `vocab.txt`
    pub fn load(
        artifact_dir: impl AsRef<Path>,
        max_seq_length: usize,
        device: B::Device,
    ) -> anyhow::Result<Self> {
        let artifact_dir = artifact_dir.as_ref();

        if !artifact_dir.is_dir() {
            return Err(anyhow!(
                "Model directory {} was not found",
                artifact_dir.display()
            ));
        }

        // Load model configuration
        let mut config = classifier::Config::load_pretrained(artifact_dir.join(CONFIG_FILE))?;

        if config.n_classes() != N_CLASSES {
            return Err(InferenceError::Classes(config.n_classes()).into());
        }

        config.model.hidden_dropout_prob = 0.0;

        let max_seq_length = max_seq_length.min(config.model.max_position_embeddings);

        // Initialize tokenizer
        let tokenizer = load_tokenizer(artifact_dir, max_seq_length)?;

        // Load pretrained model weights
        log::info!("Loading weights from {}...", artifact_dir.display());

        let record = classifier::load_safetensors::<B>(
            artifact_dir.join(WEIGHTS_FILE),
            &config,
            &device,
        )?;

        let model = config.init::<B>(&device).load_record(record);

        let batcher = Batcher::new(tokenizer, config.model.pad_token_id, max_seq_length, device);

        Ok(Self::new(model, batcher)?)
    }
}

impl<B: Backend> Classifier for BurnClassifier<B> {
    fn classify(
        &self,
        texts: Vec<String>,
        padding: Padding,
    ) -> Result<Vec<Probabilities>, InferenceError> {
        let input = self.batcher.batch(texts, padding)?;

        let probabilities = self.model.infer(input);
        let [batch_size, n_classes] = probabilities.dims();

        if n_classes != N_CLASSES {
            return Err(InferenceError::Classes(n_classes));
        }

        let values = probabilities.into_data().convert::<f32>().value;

        let rows = values
            .chunks_exact(N_CLASSES)
            .map(|row| [row[0], row[1], row[2]])
            .collect::<Vec<_>>();

        debug_assert_eq!(rows.len(), batch_size);

        Ok(rows)
    }

    fn device_name(&self) -> String {
        format!("{:?}", self.batcher.device).to_uppercase()
    }
}
