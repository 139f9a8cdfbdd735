use std::{collections::BTreeMap, fs, path::Path};

use bert_burn::model::BertModelConfig;
use burn::{config::Config as _, nn::LinearConfig, tensor::backend::Backend};
use serde::Deserialize;

use super::Model;

/// The Model Configuration
#[derive(burn::config::Config)]
pub struct Config {
    /// The base BERT config
    pub model: BertModelConfig,

    /// A map from class ids to class name labels
    pub id2label: BTreeMap<usize, String>,
}

/// The classification fields of a Hugging Face `config.json`
#[derive(Deserialize)]
struct Labels {
    #[serde(default)]
    id2label: BTreeMap<usize, String>,
}

impl Config {
    /// Load a pretrained Hugging Face `config.json`, with its class labels
    pub fn load_pretrained(config_file: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_file = config_file.as_ref();

        let mut bert_config = BertModelConfig::load(config_file)
            .map_err(|e| anyhow!("Unable to load Hugging Face Config file: {}", e))?;

        // Enable the pooling layer for sequence classification
        bert_config.with_pooling_layer = Some(true);

        let raw = fs::read_to_string(config_file)
            .map_err(|e| anyhow!("Unable to read {}: {}", config_file.display(), e))?;

        let Labels { id2label } = serde_json::from_str(&raw)
            .map_err(|e| anyhow!("Unable to read class labels: {}", e))?;

        if id2label.is_empty() {
            return Err(anyhow!("Classes are not defined in the model configuration"));
        }

        Ok(Config::new(bert_config, id2label))
    }

    /// The number of classes the head predicts
    pub fn n_classes(&self) -> usize {
        self.id2label.len()
    }

    /// Initializes a Bert model with default weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        let model = self.model.init(device);

        let n_classes = self.n_classes();

        let output = LinearConfig::new(self.model.hidden_size, n_classes).init(device);

        Model {
            model,
            output,
            n_classes,
        }
    }
}
