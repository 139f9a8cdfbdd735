/// BERT-style encoder for sequence classification
pub mod classifier;
