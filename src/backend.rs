use crate::{
    config::DashboardConfig,
    pipelines::sentiment::{BurnClassifier, InferenceClient},
};

/// The Burn backend used for inference
#[cfg(not(feature = "tch"))]
pub type Backend = burn::backend::NdArray;

/// The Burn backend used for inference
#[cfg(feature = "tch")]
pub type Backend = burn::backend::LibTorch;

/// The device inference runs on
#[cfg(not(feature = "tch"))]
pub fn device() -> burn::backend::ndarray::NdArrayDevice {
    burn::backend::ndarray::NdArrayDevice::Cpu
}

/// The device inference runs on: the first CUDA device if there is one
#[cfg(feature = "tch")]
pub fn device() -> burn::backend::libtorch::LibTorchDevice {
    if tch::Cuda::is_available() {
        burn::backend::libtorch::LibTorchDevice::Cuda(0)
    } else {
        burn::backend::libtorch::LibTorchDevice::Cpu
    }
}

/// Load the model once for the whole process. Failure leaves the client in degraded mode.
pub fn load_client(config: &DashboardConfig) -> InferenceClient {
    log::info!("Loading model from {}", config.model_dir);

    InferenceClient::from_load(BurnClassifier::<Backend>::load(
        &config.model_dir,
        config.max_seq_length,
        device(),
    ))
}
