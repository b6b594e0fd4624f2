use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "the", "a", "an", "is", "in", "to", "of", "and", "or", "for",
            "on", "with", "this", "that", "it", "be", "as", "at", "by", "we",
            "how", "do", "i", "you", "can", "what", "from", "are", "use", "used",
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Tokenize text into lowercase terms: split on any rune that is not a
/// letter or digit, drop runs shorter than two characters and stop words.
/// Duplicates are kept in input order. The stop list is fixed; query
/// expansion relies on the same vocabulary.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    RE.find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|&tok| tok.chars().count() >= 2 && !is_stopword(tok))
        .map(str::to_string)
        .collect()
}
