use std::{fs, path::Path};

use serde::Deserialize;
use tokenizers::{
    models::wordpiece::WordPiece,
    normalizers::{BertNormalizer, NormalizerWrapper},
    pre_tokenizers::{bert::BertPreTokenizer, PreTokenizerWrapper},
    processors::{bert::BertProcessing, PostProcessorWrapper},
    Tokenizer, TruncationParams,
};

/// Serialized tokenizer, preferred when present
pub static TOKENIZER_FILE: &str = "tokenizer.json";

/// WordPiece vocabulary shipped with BERT checkpoints
pub static VOCAB_FILE: &str = "vocab.txt";

static TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";

/// The casing fields of a Hugging Face `tokenizer_config.json`
#[derive(Deserialize)]
struct TokenizerConfig {
    #[serde(default = "lower_case")]
    do_lower_case: bool,
}

fn lower_case() -> bool {
    true
}

/// Load the tokenizer of an artifact directory, truncating to `max_seq_length` tokens.
///
/// `tokenizer.json` is used when present. Otherwise a BERT WordPiece tokenizer is assembled
/// from `vocab.txt`, honoring `do_lower_case` from `tokenizer_config.json`.
pub fn load_tokenizer(artifact_dir: &Path, max_seq_length: usize) -> anyhow::Result<Tokenizer> {
    let tokenizer_file = artifact_dir.join(TOKENIZER_FILE);
    let vocab_file = artifact_dir.join(VOCAB_FILE);

    let mut tokenizer = if tokenizer_file.is_file() {
        Tokenizer::from_file(&tokenizer_file)
            .map_err(|e| anyhow!("Unable to load tokenizer: {}", e))?
    } else if vocab_file.is_file() {
        wordpiece(&vocab_file, do_lower_case(artifact_dir)?)?
    } else {
        return Err(anyhow!(
            "No {} or {} found in {}",
            TOKENIZER_FILE,
            VOCAB_FILE,
            artifact_dir.display()
        ));
    };

    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: max_seq_length,
            ..Default::default()
        }))
        .map_err(|e| anyhow!("Unable to configure truncation: {}", e))?;

    Ok(tokenizer)
}

fn do_lower_case(artifact_dir: &Path) -> anyhow::Result<bool> {
    let path = artifact_dir.join(TOKENIZER_CONFIG_FILE);

    if !path.is_file() {
        return Ok(true);
    }

    let raw = fs::read_to_string(&path)
        .map_err(|e| anyhow!("Unable to read {}: {}", path.display(), e))?;

    let config: TokenizerConfig = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("Unable to parse {}: {}", path.display(), e))?;

    Ok(config.do_lower_case)
}

fn wordpiece(vocab_file: &Path, lowercase: bool) -> anyhow::Result<Tokenizer> {
    let vocab = vocab_file
        .to_str()
        .ok_or_else(|| anyhow!("Vocabulary path is not valid UTF-8"))?;

    let model = WordPiece::from_file(vocab)
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(|e| anyhow!("Unable to load vocabulary {}: {}", vocab, e))?;

    let mut tokenizer = Tokenizer::new(model);

    let special = |token: &str| {
        tokenizer
            .token_to_id(token)
            .map(|id| (token.to_string(), id))
            .ok_or_else(|| anyhow!("Vocabulary has no {} token", token))
    };
    let sep = special("[SEP]")?;
    let cls = special("[CLS]")?;

    tokenizer
        .with_normalizer(NormalizerWrapper::from(BertNormalizer::new(
            true, true, None, lowercase,
        )))
        .with_pre_tokenizer(PreTokenizerWrapper::from(BertPreTokenizer))
        .with_post_processor(PostProcessorWrapper::from(BertProcessing::new(sep, cls)));

    Ok(tokenizer)
}

#[cfg(test)]
mod tests {
    use std::env;

    use pretty_assertions::assert_eq;

    use super::*;

    fn vocab_dir(name: &str) -> std::path::PathBuf {
        let dir = env::temp_dir().join(format!("vocab-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(VOCAB_FILE),
            "[PAD]\n[UNK]\n[CLS]\n[SEP]\naplikasi\nbagus\nbanget\n##nya\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn builds_wordpiece_from_vocab() {
        let dir = vocab_dir("wordpiece");

        let tokenizer = load_tokenizer(&dir, 16).unwrap();
        let encoding = tokenizer.encode("Aplikasinya BAGUS kok", true).unwrap();

        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(encoding.get_ids(), &[2, 4, 7, 5, 1, 3]);
    }

    #[test]
    fn truncates_to_max_length() {
        let dir = vocab_dir("truncate");

        let tokenizer = load_tokenizer(&dir, 4).unwrap();
        let encoding = tokenizer.encode("bagus bagus bagus bagus bagus", true).unwrap();

        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(encoding.get_ids().len(), 4);
    }

    #[test]
    fn requires_a_tokenizer_file() {
        let dir = env::temp_dir().join(format!("vocab-none-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let err = load_tokenizer(&dir, 16).unwrap_err();

        fs::remove_dir_all(&dir).unwrap();

        assert!(err.to_string().starts_with("No tokenizer.json or vocab.txt found"));
    }
}
