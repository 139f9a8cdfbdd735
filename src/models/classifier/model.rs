use bert_burn::{
    data::BertInferenceBatch,
    model::{BertModel, BertModelOutput},
};
use burn::{
    module::Module,
    nn::Linear,
    tensor::{activation::softmax, backend::Backend, Tensor},
};
use derive_new::new;

use crate::pipelines::sentiment::batcher::Infer;

/// BERT for sequence Classification
#[derive(Module, Debug, new)]
pub struct Model<B: Backend> {
    /// The base BERT model
    pub model: BertModel<B>,

    /// Linear layer for sequence classification
    pub output: Linear<B>,

    /// Total number of classes
    pub n_classes: usize,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// Raw class scores for a batch: [batch_size, n_classes]
    pub fn forward(&self, input: Infer<B>) -> Tensor<B, 2> {
        let [batch_size, _seq_length] = input.tokens.dims();

        let BertModelOutput {
            pooled_output,
            hidden_states,
        } = self.model.forward(BertInferenceBatch {
            tokens: input.tokens,
            mask_pad: input.mask_pad,
        });

        self.output
            .forward(pooled_output.unwrap_or(hidden_states))
            .slice([0..batch_size, 0..1])
            .reshape([batch_size, self.n_classes])
    }

    /// Defines forward pass for inference, returning class probabilities
    pub fn infer(&self, input: Infer<B>) -> Tensor<B, 2> {
        softmax(self.forward(input), 1)
    }
}
