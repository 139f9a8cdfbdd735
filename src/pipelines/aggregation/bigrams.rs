use std::collections::HashMap;

use super::tokenize;

/// How many bigrams are returned by default
pub const DEFAULT_TOP_N: usize = 10;

/// A bigram and how often it occurs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BigramCount {
    /// The two words joined by a space
    pub bigram: String,

    /// Occurrences across all rows
    pub frequency: usize,
}

/// Count contiguous word pairs within each row and return the `n` most frequent, most frequent
/// first. Bigrams never span two rows. Equal counts keep the order in which the bigrams were
/// first seen. Fewer than two rows give an empty table.
pub fn top_bigrams<S: AsRef<str>>(texts: &[S], n: usize) -> Vec<BigramCount> {
    if texts.len() < 2 {
        return Vec::new();
    }

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<BigramCount> = Vec::new();

    for text in texts {
        let words = tokenize(text.as_ref());

        for pair in words.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);

            match positions.get(&bigram) {
                Some(&position) => counts[position].frequency += 1,
                None => {
                    positions.insert(bigram.clone(), counts.len());
                    counts.push(BigramCount {
                        bigram,
                        frequency: 1,
                    });
                }
            }
        }
    }

    // Stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    counts.truncate(n);

    counts
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn pairs(counts: &[BigramCount]) -> Vec<(&str, usize)> {
        counts
            .iter()
            .map(|c| (c.bigram.as_str(), c.frequency))
            .collect()
    }

    #[test]
    fn needs_two_rows() {
        assert!(top_bigrams::<&str>(&[], 10).is_empty());
        assert!(top_bigrams(&["obat cepat sampai obat cepat sampai"], 10).is_empty());
    }

    #[test]
    fn counts_within_rows_only() {
        let texts = ["dokter ramah", "sekali dokter ramah", "ramah sekali"];

        assert_eq!(
            pairs(&top_bigrams(&texts, 10)),
            vec![("dokter ramah", 2), ("sekali dokter", 1), ("ramah sekali", 1)]
        );
    }

    #[test]
    fn sorted_descending_and_truncated() {
        let texts = [
            "aplikasi bagus aplikasi bagus",
            "pelayanan cepat aplikasi bagus",
            "pelayanan cepat",
        ];

        let counts = top_bigrams(&texts, 2);

        assert_eq!(
            pairs(&counts),
            vec![("aplikasi bagus", 3), ("pelayanan cepat", 2)]
        );
        assert!(counts.windows(2).all(|w| w[0].frequency >= w[1].frequency));
    }

    #[test]
    fn rows_without_pairs_give_nothing() {
        assert!(top_bigrams(&["mantap", "oke", "a b c"], 10).is_empty());
    }
}
