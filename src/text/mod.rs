/// Slang normalization
pub mod normalizer;

/// Noise stripping for raw review text
pub mod cleaner;

pub use cleaner::Cleaner;
pub use normalizer::{NormalizationDictionary, Normalizer};
