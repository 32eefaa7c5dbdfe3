/// Splits text into lowercase word tokens.
///
/// Any character that is not alphanumeric (in the Unicode sense) is a
/// boundary, so punctuation and whitespace never appear inside a token and
/// `"it's"` becomes `["it", "s"]`. Order is preserved and duplicates are kept.
/// Empty or delimiter-only input yields an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::with_capacity(text.len() / 5 + 1);
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_alphanumeric() {
            if start.is_none() {
                start = Some(idx);
            }
        } else if let Some(token_start) = start.take() {
            tokens.push(text[token_start..idx].to_lowercase());
        }
    }

    if let Some(token_start) = start {
        tokens.push(text[token_start..].to_lowercase());
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_whitespace() {
        assert_eq!(
            tokenize("Hello, world! It's PARASIM:\t100% fun."),
            vec!["hello", "world", "it", "s", "parasim", "100", "fun"]
        );
    }

    #[test]
    fn empty_and_delimiter_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ,.;!  \n").is_empty());
    }

    #[test]
    fn keeps_duplicates_and_order() {
        assert_eq!(
            tokenize("the cat sat on the mat"),
            vec!["the", "cat", "sat", "on", "the", "mat"]
        );
    }

    #[test]
    fn non_ascii_letters_are_word_characters() {
        assert_eq!(tokenize("Café Ünïcode—ok"), vec!["café", "ünïcode", "ok"]);
    }

    #[test]
    fn trailing_token_is_flushed() {
        assert_eq!(tokenize("end"), vec!["end"]);
    }
}
