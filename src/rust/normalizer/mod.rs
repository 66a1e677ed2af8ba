use tokenizers::normalizers::Lowercase;
use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{Normalizer, OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

use crate::classifier::ClassifierError;

mod lemmatizer;
mod stopwords;

pub use lemmatizer::lemmatize;
pub use stopwords::is_stop_word;

/// Turns free text into normalized keyword forms.
///
/// The pipeline is:
/// 1. Lower-case the text
/// 2. Split it into word and punctuation pieces
/// 3. Drop stop-words and any piece that is not purely alphabetic
/// 4. Reduce each remaining word to its base form
///
/// The normalizer keeps no state between calls, so the same text always yields
/// the same tokens. Symptom names spanning several words (`skin_rash`) can never
/// match, since pieces are single words.
#[derive(Debug, Default, Clone)]
pub struct TextNormalizer {
    pre_tokenizer: Whitespace,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the normalized tokens of `text`, in reading order.
    ///
    /// # Errors
    /// `TokenizerError` if the text cannot be normalized or split.
    pub fn normalize(&self, text: &str) -> Result<Vec<String>, ClassifierError> {
        let mut pretokenized = PreTokenizedString::from(text);
        pretokenized
            .normalize(|s| Lowercase.normalize(s))
            .map_err(|e| ClassifierError::TokenizerError(e.to_string()))?;
        self.pre_tokenizer
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| ClassifierError::TokenizerError(e.to_string()))?;

        let tokens = pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .map(|(piece, _, _)| piece)
            .filter(|piece| !piece.is_empty() && piece.chars().all(char::is_alphabetic))
            .filter(|piece| !is_stop_word(piece))
            .map(lemmatize)
            .collect();
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_to_keywords() {
        let tokens = TextNormalizer::new().normalize("I have a headache and vomiting").unwrap();
        assert_eq!(tokens, vec!["headache", "vomiting"]);
    }

    #[test]
    fn test_case_punctuation_and_digits() {
        let tokens = TextNormalizer::new()
            .normalize("FEVER, Chills!! since 3 days; skin_rash too")
            .unwrap();
        assert_eq!(tokens, vec!["fever", "chill", "day"]);
    }

    #[test]
    fn test_plural_reduced() {
        let tokens = TextNormalizer::new().normalize("Terrible headaches").unwrap();
        assert_eq!(tokens, vec!["terrible", "headache"]);
    }

    #[test]
    fn test_blank_text() {
        assert!(TextNormalizer::new().normalize("   ").unwrap().is_empty());
        assert!(TextNormalizer::new().normalize("").unwrap().is_empty());
    }

    #[test]
    fn test_restartable() {
        let normalizer = TextNormalizer::new();
        let text = "itching and nausea";
        assert_eq!(normalizer.normalize(text).unwrap(), normalizer.normalize(text).unwrap());
    }
}
