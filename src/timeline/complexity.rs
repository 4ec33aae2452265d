// src/timeline/complexity.rs
//
// Character classes that shape how long a letter takes to draw.

fn any_char_in(grapheme: &str, set: &str) -> bool {
    grapheme.chars().any(|ch| set.contains(ch))
}

pub fn is_punctuation(grapheme: &str) -> bool {
    any_char_in(grapheme, ".,!?;:")
}

pub fn is_whitespace(grapheme: &str) -> bool {
    !grapheme.is_empty() && grapheme.chars().all(char::is_whitespace)
}

/// Dense letters score 1, thin ones 0.25, punctuation 0.1, the rest 0.55.
pub fn complexity_score(grapheme: &str) -> f64 {
    if any_char_in(grapheme, "mwMW@#%&") {
        1.0
    } else if any_char_in(grapheme, "ijlrtf1") {
        0.25
    } else if is_punctuation(grapheme) {
        0.1
    } else {
        0.55
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_by_class() {
        assert_eq!(complexity_score("m"), 1.0);
        assert_eq!(complexity_score("@"), 1.0);
        assert_eq!(complexity_score("i"), 0.25);
        assert_eq!(complexity_score("1"), 0.25);
        assert_eq!(complexity_score("."), 0.1);
        assert_eq!(complexity_score("a"), 0.55);
        assert_eq!(complexity_score("\u{1F600}"), 0.55);
    }

    #[test]
    fn test_dense_wins_over_thin() {
        assert_eq!(complexity_score("m\u{0301}"), 1.0);
        assert!(complexity_score("w") > complexity_score("l"));
        assert!(complexity_score("l") > complexity_score(","));
    }

    #[test]
    fn test_whitespace() {
        assert!(is_whitespace(" "));
        assert!(is_whitespace("\t"));
        assert!(is_whitespace("\r"));
        assert!(!is_whitespace(""));
        assert!(!is_whitespace("a"));
    }
}
