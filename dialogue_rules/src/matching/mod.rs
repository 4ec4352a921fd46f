//! Token matching: the equality rule used for every word and entity comparison.
//!
//! Two strings match when their letters and digits are equal ignoring case.
//! Everything else (spaces, apostrophes, punctuation) is discarded first, so
//! `"it's"` matches `"its"` and `"The Team Lead"` matches `"the team-lead"`.

/// Iterate the significant characters of a string: alphanumerics, lowercased.
fn significant_chars(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
}

/// Reduce a string to its comparison key.
///
/// An empty string (or one made only of punctuation) normalizes to `""`.
pub fn normalize(s: &str) -> String {
    significant_chars(s).collect()
}

/// Check whether two tokens are equal under the matching rule.
pub fn tokens_equal(a: &str, b: &str) -> bool {
    significant_chars(a).eq(significant_chars(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert!(tokens_equal("What", "wHAT"));
        assert!(tokens_equal("SIT", "sit"));
    }

    #[test]
    fn test_punctuation_ignored() {
        assert!(tokens_equal("it's", "its"));
        assert!(tokens_equal("the team lead's name", "the team leads name"));
        assert!(tokens_equal("[what]", "what"));
    }

    #[test]
    fn test_different_words() {
        assert!(!tokens_equal("who", "how"));
        assert!(!tokens_equal("what", "whats"));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(tokens_equal("", ""));
        assert!(tokens_equal("", "?!"));
        assert!(!tokens_equal("", "a"));
        assert_eq!(normalize("  ...  "), "");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Singapore Institute of Technology!"), "singaporeinstituteoftechnology");
        assert_eq!(normalize("ICT-1002"), "ict1002");
    }
}
