/// Bigram frequency tables
pub mod bigrams;

/// Word-frequency clouds
pub mod wordcloud;

pub use bigrams::{top_bigrams, BigramCount, DEFAULT_TOP_N};
pub use wordcloud::{word_frequencies, PlacedWord, WordCloud, WordCloudConfig};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Words of two or more word characters, the unit counted by both views
    static ref TOKEN: Regex = Regex::new(r"\b\w\w+\b").expect("valid token pattern");
}

/// Lowercase a text and split it into countable words
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    let text = text.to_lowercase();

    TOKEN
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Aggregation Error
#[derive(thiserror::Error, Debug)]
pub enum AggregationError {
    /// The word cloud could not be rendered
    #[error("unable to render word cloud: {0}")]
    Render(#[from] liquid::Error),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tokenize_skips_single_characters() {
        assert_eq!(
            tokenize("Obat di kirim ke RUMAH, a b cepat!"),
            vec!["obat", "di", "kirim", "ke", "rumah", "cepat"]
        );
    }
}
