use burn::config::Config as _;

use crate::{
    pipelines::aggregation::WordCloudConfig,
    text::{normalizer::DEFAULT_DICTIONARY, Cleaner},
};

/// Deployment configuration
#[derive(burn::config::Config)]
pub struct DashboardConfig {
    /// Directory holding `config.json`, `model.safetensors`, and `tokenizer.json` or `vocab.txt`
    #[config(default = "\"model\".to_string()")]
    pub model_dir: String,

    /// The historical dataset shown on the default dashboard
    #[config(default = "\"data/reviews_labeled.csv\".to_string()")]
    pub data_path: String,

    /// Texts per forward pass during batch prediction. Raise on accelerated hardware.
    #[config(default = 32)]
    pub chunk_size: usize,

    /// Token ceiling per text
    #[config(default = 128)]
    pub max_seq_length: usize,

    /// Bigrams listed per sentiment
    #[config(default = 10)]
    pub top_n: usize,

    /// Rows shown in the sample table
    #[config(default = 10)]
    pub sample_size: usize,

    /// Extra slang entries, as a JSON object, merged over the built-in dictionary
    pub dictionary_path: Option<String>,

    /// Word cloud layout
    #[config(default = "WordCloudConfig::new()")]
    pub word_cloud: WordCloudConfig,
}

impl DashboardConfig {
    /// Load from a JSON file, or use the defaults when no file is given
    pub fn load_or_default(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path)
                .map_err(|e| anyhow!("Unable to load config file {}: {}", path, e)),
            None => Ok(Self::new()),
        }
    }

    /// Build the text cleaner, with the extra dictionary merged in if configured
    pub fn cleaner(&self) -> anyhow::Result<Cleaner> {
        let mut dictionary = DEFAULT_DICTIONARY.clone();

        if let Some(path) = &self.dictionary_path {
            dictionary.extend_from_file(path)?;
            log::info!("Loaded slang dictionary from {}", path);
        }

        Ok(Cleaner::with_dictionary(dictionary))
    }
}
