use std::{collections::HashMap, fs, path::Path};

use lazy_static::lazy_static;
use regex::Regex;

/// Slang and abbreviation pairs, mapped to their canonical form
static SLANG: &[(&str, &str)] = &[
    ("yg", "yang"),
    ("gk", "tidak"),
    ("gak", "tidak"),
    ("ga", "tidak"),
    ("g", "tidak"),
    ("bgt", "banget"),
    ("dr", "dokter"),
    ("kalo", "kalau"),
    ("klo", "kalau"),
    ("blm", "belum"),
    ("sdh", "sudah"),
    ("udh", "sudah"),
    ("dgn", "dengan"),
    ("tdk", "tidak"),
    ("tpi", "tapi"),
    ("tp", "tapi"),
    ("krn", "karena"),
    ("pke", "pakai"),
    ("pake", "pakai"),
    ("sy", "saya"),
    ("aku", "saya"),
    ("gw", "saya"),
    ("gue", "saya"),
    ("jd", "jadi"),
    ("jdi", "jadi"),
    ("bisa", "bisa"),
    ("bs", "bisa"),
    ("dpt", "dapat"),
    ("jgn", "jangan"),
    ("utk", "untuk"),
    ("nya", "nya"),
    ("bnyk", "banyak"),
    ("dlm", "dalam"),
    ("bgus", "bagus"),
    ("keren", "keren"),
    ("mantap", "mantap"),
    ("min", "admin"),
    ("apk", "aplikasi"),
    ("app", "aplikasi"),
    ("error", "eror"),
    ("lemot", "lambat"),
    ("lelet", "lambat"),
    ("konsul", "konsultasi"),
    ("obat", "obat"),
    ("resep", "resep"),
    ("chat", "pesan"),
    ("bales", "balas"),
    ("respon", "respons"),
    ("cepet", "cepat"),
    ("cpt", "cepat"),
    ("mksih", "terima kasih"),
    ("makasih", "terima kasih"),
    ("tks", "terima kasih"),
    ("thx", "terima kasih"),
    ("good", "bagus"),
    ("bad", "buruk"),
    ("best", "terbaik"),
    ("oke", "oke"),
    ("ok", "oke"),
    ("sip", "sip"),
    ("mw", "mau"),
    ("mau", "mau"),
    ("trus", "terus"),
    ("trs", "terus"),
    ("lg", "lagi"),
    ("lgi", "lagi"),
    ("sm", "sama"),
    ("sama", "sama"),
    ("d", "di"),
    ("k", "ke"),
    ("org", "orang"),
    ("mlm", "malam"),
    ("pagi", "pagi"),
    ("siang", "siang"),
    ("sore", "sore"),
];

lazy_static! {
    /// The built-in slang dictionary
    pub static ref DEFAULT_DICTIONARY: NormalizationDictionary = SLANG.iter().copied().collect();

    static ref SLANG_TOKEN: Regex = Regex::new(r"^[a-z]+$").expect("valid slang pattern");
    static ref CANONICAL_WORDS: Regex = Regex::new(r"^[a-z]+(?: [a-z]+)*$").expect("valid canonical pattern");
}

/// A lookup from lowercase slang tokens to their canonical form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizationDictionary(HashMap<String, String>);

impl NormalizationDictionary {
    /// Look up the canonical form of a token
    pub fn get(&self, token: &str) -> Option<&str> {
        self.0.get(token).map(String::as_str)
    }

    /// The number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (slang, canonical) pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge the entries of a JSON object file over this dictionary. Entries from the file win.
    pub fn extend_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();

        let raw = fs::read_to_string(path)
            .map_err(|e| anyhow!("Unable to read dictionary {}: {}", path.display(), e))?;

        let entries: HashMap<String, String> = serde_json::from_str(&raw)
            .map_err(|e| anyhow!("Unable to parse dictionary {}: {}", path.display(), e))?;

        let mut merged = self.clone();

        for (slang, canonical) in entries {
            let slang = slang.trim().to_lowercase();
            let canonical = canonical.trim().to_lowercase();

            // Cleaned text only ever holds lowercase letters separated by single spaces
            if !SLANG_TOKEN.is_match(&slang) || !CANONICAL_WORDS.is_match(&canonical) {
                return Err(anyhow!(
                    "Invalid dictionary entry in {}: {:?} -> {:?} (expected lowercase letters)",
                    path.display(),
                    slang,
                    canonical
                ));
            }

            merged.0.insert(slang, canonical);
        }

        merged.check_fixed_points().map_err(|e| anyhow!("{}: {}", path.display(), e))?;

        *self = merged;

        Ok(())
    }

    /// Every word of a canonical form must map to itself, or be absent, so normalizing is
    /// idempotent.
    fn check_fixed_points(&self) -> anyhow::Result<()> {
        for (slang, canonical) in self.iter() {
            for word in canonical.split(' ') {
                match self.get(word) {
                    Some(again) if again != word => {
                        return Err(anyhow!(
                            "{:?} normalizes to {:?}, which is rewritten again to {:?}",
                            slang,
                            word,
                            again
                        ));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NormalizationDictionary {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for NormalizationDictionary {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.0
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

/// Token-level slang substitution
#[derive(Clone, Debug)]
pub struct Normalizer {
    dictionary: NormalizationDictionary,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_DICTIONARY.clone())
    }
}

impl Normalizer {
    /// Create a normalizer over the given dictionary
    pub fn new(dictionary: NormalizationDictionary) -> Self {
        Self { dictionary }
    }

    /// The dictionary in use
    pub fn dictionary(&self) -> &NormalizationDictionary {
        &self.dictionary
    }

    /// Replace every whitespace-separated token found in the dictionary, and rejoin with single
    /// spaces. Lookups are case-sensitive; unknown tokens pass through unchanged.
    pub fn normalize(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.dictionary.get(word).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn replaces_slang() {
        let normalizer = Normalizer::default();

        assert_eq!(normalizer.normalize("gk bgt"), "tidak banget");
        assert_eq!(
            normalizer.normalize("makasih  dr   udh bales"),
            "terima kasih dokter sudah balas"
        );
    }

    #[test]
    fn keeps_unknown_tokens_and_casing() {
        let normalizer = Normalizer::default();

        assert_eq!(normalizer.normalize("aplikasinya GK jelas"), "aplikasinya GK jelas");
        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("   "), "");
    }

    #[test]
    fn canonical_forms_are_fixed_points() {
        // Normalizing twice must give the same result as normalizing once
        for (_, canonical) in DEFAULT_DICTIONARY.iter() {
            for word in canonical.split_whitespace() {
                if let Some(again) = DEFAULT_DICTIONARY.get(word) {
                    assert_eq!(again, word, "{word} is rewritten a second time");
                }
            }
        }

        assert!(DEFAULT_DICTIONARY.check_fixed_points().is_ok());
    }

    fn extended(name: &str, json: &str) -> anyhow::Result<NormalizationDictionary> {
        let path = std::env::temp_dir().join(format!(
            "sentiment-dashboard-{}-{}.json",
            name,
            std::process::id()
        ));
        fs::write(&path, json)?;

        let mut dictionary = DEFAULT_DICTIONARY.clone();
        let result = dictionary.extend_from_file(&path);
        fs::remove_file(&path)?;

        result.map(|_| dictionary)
    }

    #[test]
    fn lowercases_extra_entries() -> anyhow::Result<()> {
        let dictionary = extended("lowercase", r#"{" Mantul ": "MANTAP Betul"}"#)?;

        assert_eq!(dictionary.get("mantul"), Some("mantap betul"));
        assert_eq!(dictionary.get("Mantul"), None);
        assert_eq!(
            Normalizer::new(dictionary).normalize("mantul bgt"),
            "mantap betul banget"
        );

        Ok(())
    }

    #[test]
    fn rejects_entries_cleaning_cannot_produce() {
        for json in [
            r#"{"mantul": "Mantap!"}"#,
            r#"{"2x": "dua kali"}"#,
            r#"{"gpp": "gak  papa"}"#,
            r#"{"": "kosong"}"#,
            r#"{"kosong": ""}"#,
        ] {
            let err = extended("invalid", json).unwrap_err();
            assert!(
                err.to_string().contains("Invalid dictionary entry"),
                "{json} gave {err}"
            );
        }
    }

    #[test]
    fn rejects_entries_that_rewrite_twice() {
        let err = extended("cycle", r#"{"mantul": "mantap betul", "betul": "benar"}"#).unwrap_err();
        assert!(err.to_string().contains("rewritten again"), "{err}");

        // "tidak" is a canonical form of the built-in dictionary
        let err = extended("builtin", r#"{"tidak": "enggak"}"#).unwrap_err();
        assert!(err.to_string().contains("rewritten again"), "{err}");
    }

    #[test]
    fn failed_extensions_leave_the_dictionary_unchanged() -> anyhow::Result<()> {
        let path = std::env::temp_dir().join(format!(
            "sentiment-dashboard-unchanged-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"mantul": "mantap betul", "2x": "dua kali"}"#)?;

        let mut dictionary = DEFAULT_DICTIONARY.clone();
        assert!(dictionary.extend_from_file(&path).is_err());
        fs::remove_file(&path)?;

        assert_eq!(&dictionary, &*DEFAULT_DICTIONARY);

        Ok(())
    }

    #[test]
    fn later_entries_win() {
        let dictionary: NormalizationDictionary =
            [("bgt", "banget"), ("bgt", "sangat")].into_iter().collect();

        assert_eq!(dictionary.len(), 1);
        assert_eq!(Normalizer::new(dictionary).normalize("bgt"), "sangat");
    }
}
