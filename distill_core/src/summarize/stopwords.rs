use std::collections::HashSet;
use std::sync::OnceLock;

/// English function words excluded from the frequency table.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "although", "am", "an",
    "and", "any", "are", "around", "as", "at", "be", "because", "been", "before", "being",
    "below", "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down",
    "during", "each", "either", "else", "ever", "every", "few", "for", "from", "further", "get",
    "gets", "got", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "however", "i", "if", "in", "into", "is", "it", "its", "itself",
    "just", "let", "like", "made", "make", "many", "may", "me", "might", "more", "most", "much",
    "must", "my", "myself", "neither", "no", "nor", "not", "now", "of", "off", "often", "on",
    "once", "one", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "per", "quite", "rather", "really", "said", "same", "say", "says", "she", "should", "since",
    "so", "some", "still", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "though", "through", "thus",
    "to", "too", "under", "until", "up", "upon", "us", "use", "used", "very", "was", "we",
    "were", "what", "when", "where", "whether", "which", "while", "who", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

static STOP_WORD_SET: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Whether a lowercase word is a stopword.
#[must_use]
pub fn is_stopword(word: &str) -> bool {
    STOP_WORD_SET
        .get_or_init(|| STOP_WORDS.iter().copied().collect())
        .contains(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_function_words_are_stopwords() {
        for word in ["the", "and", "however", "because", "would"] {
            assert!(is_stopword(word), "{word} should be a stopword");
        }
    }

    #[test]
    fn content_words_are_not_stopwords() {
        for word in ["bridge", "council", "theorem", "price"] {
            assert!(!is_stopword(word), "{word} should not be a stopword");
        }
    }
}
