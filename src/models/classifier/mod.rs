/// Bert for Sequence Classification
pub mod model;

/// The model configuration
pub mod config;

/// Hugging Face safetensors checkpoints
pub mod loader;

pub use config::Config;
pub use loader::load_safetensors;
pub use model::{Model, ModelRecord};
