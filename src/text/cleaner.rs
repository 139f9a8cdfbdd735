use lazy_static::lazy_static;
use regex::Regex;

use super::{NormalizationDictionary, Normalizer};

lazy_static! {
    static ref URL: Regex = Regex::new(r"http\S+|www\S+|https\S+").expect("valid url pattern");
    static ref MENTION_OR_HASHTAG: Regex = Regex::new(r"@\w+|#\w+").expect("valid tag pattern");
    static ref NON_LETTER: Regex = Regex::new(r"[^a-zA-Z\s]").expect("valid letter pattern");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid whitespace pattern");
}

/// Strips noise from raw review text and normalizes slang.
///
/// The output only contains lowercase ASCII letters separated by single spaces, or is empty.
#[derive(Clone, Debug, Default)]
pub struct Cleaner {
    normalizer: Normalizer,
}

impl Cleaner {
    /// Create a cleaner using the given normalizer
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    /// Create a cleaner over a custom dictionary
    pub fn with_dictionary(dictionary: NormalizationDictionary) -> Self {
        Self::new(Normalizer::new(dictionary))
    }

    /// Clean a single piece of text. Each step works on the output of the previous one.
    pub fn clean(&self, text: &str) -> String {
        let text = text.to_lowercase();
        let text = URL.replace_all(&text, "");
        let text = MENTION_OR_HASHTAG.replace_all(&text, "");
        let text = NON_LETTER.replace_all(&text, " ");
        let text = self.normalizer.normalize(&text);

        WHITESPACE.replace_all(&text, " ").trim().to_string()
    }

    /// Clean a possibly-missing value. Missing values clean to the empty string.
    pub fn clean_value(&self, value: Option<&str>) -> String {
        value.map(|text| self.clean(text)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn is_clean(text: &str) -> bool {
        text.chars().all(|c| c.is_ascii_lowercase() || c == ' ')
            && !text.starts_with(' ')
            && !text.ends_with(' ')
            && !text.contains("  ")
    }

    #[test]
    fn strips_noise_and_normalizes() {
        let cleaner = Cleaner::default();

        assert_eq!(
            cleaner.clean("Aplikasinya BAGUS banget!! cek https://x.co @halo #promo 123"),
            "aplikasinya bagus banget cek"
        );
        assert_eq!(
            cleaner.clean("Dr nya ramah, tp obatnya mahal bgt :("),
            "dokter nya ramah tapi obatnya mahal banget"
        );
    }

    #[test]
    fn strips_urls_before_symbols() {
        let cleaner = Cleaner::default();

        assert_eq!(cleaner.clean("lihat www.halodoc.com/promo ya"), "lihat ya");
        assert_eq!(cleaner.clean("http://a.b/c?d=1"), "");
    }

    #[test]
    fn drops_non_latin_and_emoji() {
        let cleaner = Cleaner::default();

        assert_eq!(cleaner.clean("mantap 👍👍 très bien"), "mantap tr s bien");
        assert_eq!(cleaner.clean("日本語"), "");
    }

    #[test]
    fn missing_values_are_empty() {
        let cleaner = Cleaner::default();

        assert_eq!(cleaner.clean_value(None), "");
        assert_eq!(cleaner.clean_value(Some("OK")), "oke");
    }

    #[test]
    fn output_is_clean_and_idempotent() {
        let cleaner = Cleaner::default();

        let samples = [
            "",
            "   ",
            "Pelayanan CEPET!!!\n\tDokter   ramah 10/10",
            "@admin #halodoc gk bisa login\u{a0}\u{a0}lagi",
            "THX min, udh bisa konsul lg 😊",
            "lemot... error terus sejak update v2.3.1",
            "k d org",
        ];

        for sample in samples {
            let once = cleaner.clean(sample);

            assert!(is_clean(&once), "{once:?} is not clean");
            assert_eq!(cleaner.clean(&once), once);
        }
    }
}
