use std::{collections::HashMap, path::Path};

use bert_burn::{
    loader::{
        load_embeddings_from_safetensors, load_encoder_from_safetensors,
        load_pooler_from_safetensors,
    },
    model::BertModelRecord,
};
use burn::{
    module::{ConstantRecord, Param},
    nn::LinearRecord,
    tensor::{backend::Backend, Data, Shape, Tensor},
};
use candle_core::{safetensors, DType, Device};

use super::{Config, ModelRecord};

/// Embedding tensors every checkpoint must carry
static EMBEDDING_KEYS: &[&str] = &[
    "embeddings.word_embeddings.weight",
    "embeddings.position_embeddings.weight",
    "embeddings.token_type_embeddings.weight",
    "embeddings.LayerNorm.weight",
    "embeddings.LayerNorm.bias",
];

/// Tensors every encoder layer must carry, relative to `encoder.layer.{i}.`
static LAYER_KEYS: &[&str] = &[
    "attention.self.query.weight",
    "attention.self.query.bias",
    "attention.self.key.weight",
    "attention.self.key.bias",
    "attention.self.value.weight",
    "attention.self.value.bias",
    "attention.output.dense.weight",
    "attention.output.dense.bias",
    "attention.output.LayerNorm.weight",
    "attention.output.LayerNorm.bias",
    "intermediate.dense.weight",
    "intermediate.dense.bias",
    "output.dense.weight",
    "output.dense.bias",
    "output.LayerNorm.weight",
    "output.LayerNorm.bias",
];

/// Pooler and classification head tensors
static HEAD_KEYS: &[&str] = &[
    "pooler.dense.weight",
    "pooler.dense.bias",
    "classifier.weight",
    "classifier.bias",
];

/// Read a Hugging Face `BertForSequenceClassification` safetensors checkpoint into a model
/// record, including the trained classification head
pub fn load_safetensors<B: Backend>(
    file_path: impl AsRef<Path>,
    config: &Config,
    device: &B::Device,
) -> anyhow::Result<ModelRecord<B>> {
    let file_path = file_path.as_ref();

    let weights = safetensors::load(file_path, &Device::Cpu)
        .map_err(|e| anyhow!("Unable to load weights from {}: {}", file_path.display(), e))?;

    // Keys are prefixed with the model type ("bert.", "roberta.") except for the head
    let prefix = format!("{}.", config.model.model_type);
    let weights: HashMap<String, candle_core::Tensor> = weights
        .into_iter()
        .map(|(key, value)| (key.replacen(&prefix, "", 1), value))
        .collect();

    check_keys(&weights, config.model.num_hidden_layers)?;

    let mut encoder_layers = HashMap::new();
    let mut embeddings_layers = HashMap::new();
    let mut pooler_layers = HashMap::new();

    for (key, value) in weights.iter() {
        if key.starts_with("encoder.layer.") {
            encoder_layers.insert(key.clone(), value.clone());
        } else if key.starts_with("embeddings.") {
            embeddings_layers.insert(key.clone(), value.clone());
        } else if key.starts_with("pooler.") {
            pooler_layers.insert(key.clone(), value.clone());
        }
    }

    let output = load_head::<B>(
        &weights["classifier.weight"],
        &weights["classifier.bias"],
        config,
        device,
    )?;

    Ok(ModelRecord {
        model: BertModelRecord {
            embeddings: load_embeddings_from_safetensors(embeddings_layers, device),
            encoder: load_encoder_from_safetensors(encoder_layers, device),
            pooler: Some(load_pooler_from_safetensors(pooler_layers, device)),
        },
        output,
        n_classes: ConstantRecord::new(),
    })
}

fn check_keys(
    weights: &HashMap<String, candle_core::Tensor>,
    n_layers: usize,
) -> anyhow::Result<()> {
    let layer_keys = (0..n_layers).flat_map(|layer| {
        LAYER_KEYS
            .iter()
            .map(move |key| format!("encoder.layer.{}.{}", layer, key))
    });

    let missing = EMBEDDING_KEYS
        .iter()
        .chain(HEAD_KEYS)
        .map(|key| key.to_string())
        .chain(layer_keys)
        .filter(|key| !weights.contains_key(key))
        .collect::<Vec<_>>();

    if !missing.is_empty() {
        return Err(anyhow!(
            "Checkpoint is missing {} tensors, starting with {}",
            missing.len(),
            missing[0]
        ));
    }

    Ok(())
}

fn load_head<B: Backend>(
    weight: &candle_core::Tensor,
    bias: &candle_core::Tensor,
    config: &Config,
    device: &B::Device,
) -> anyhow::Result<LinearRecord<B>> {
    let n_classes = config.n_classes();
    let hidden_size = config.model.hidden_size;

    if weight.dims() != [n_classes, hidden_size] || bias.dims() != [n_classes] {
        return Err(anyhow!(
            "Classification head has shape {:?}, expected [{}, {}] for the configured labels",
            weight.dims(),
            n_classes,
            hidden_size
        ));
    }

    // Hugging Face stores linear weights as [d_output, d_input]
    let weight: Tensor<B, 2> = from_candle(weight, [n_classes, hidden_size], device)?;
    let bias: Tensor<B, 1> = from_candle(bias, [n_classes], device)?;

    Ok(LinearRecord {
        weight: Param::from(weight.transpose()),
        bias: Some(Param::from(bias)),
    })
}

fn from_candle<B: Backend, const D: usize>(
    tensor: &candle_core::Tensor,
    shape: [usize; D],
    device: &B::Device,
) -> anyhow::Result<Tensor<B, D>> {
    let values = tensor
        .to_dtype(DType::F32)
        .and_then(|t| t.flatten_all())
        .and_then(|t| t.to_vec1::<f32>())
        .map_err(|e| anyhow!("Unable to read tensor: {}", e))?;

    let data: Data<B::FloatElem, D> = Data::new(values, Shape::new(shape)).convert();

    Ok(Tensor::from_data(data, device))
}
