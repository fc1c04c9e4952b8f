//! Mention extraction - `@username` tokens in comment content
//!
//! A mention token is `@` followed by one or more word characters
//! (ASCII letters, digits, underscore). Usernames are returned in first-seen
//! order with duplicates removed; resolution against the user store happens
//! at the service layer, where unknown names are silently dropped.

/// Extract the distinct usernames mentioned in `content`, preserving the
/// order of first appearance.
pub fn extract_mention_usernames(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut chars = content.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch != '@' {
            continue;
        }

        let rest = &content[idx + ch.len_utf8()..];
        let len: usize = rest
            .chars()
            .take_while(|c| is_word_char(*c))
            .map(char::len_utf8)
            .sum();
        if len == 0 {
            continue;
        }

        let name = &rest[..len];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }

        // Skip past the consumed username
        while let Some((i, _)) = chars.peek() {
            if *i < idx + ch.len_utf8() + len {
                chars.next();
            } else {
                break;
            }
        }
    }

    names
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_mentions() {
        assert!(extract_mention_usernames("no mentions here").is_empty());
        assert!(extract_mention_usernames("").is_empty());
    }

    #[test]
    fn test_single_mention() {
        assert_eq!(extract_mention_usernames("hi @alice!"), vec!["alice"]);
    }

    #[test]
    fn test_deduplicates_preserving_order() {
        assert_eq!(
            extract_mention_usernames("@alice @bob @alice"),
            vec!["alice", "bob"]
        );
    }

    #[test]
    fn test_word_boundary_ends_token() {
        assert_eq!(
            extract_mention_usernames("ask @mehdi_90, he knows"),
            vec!["mehdi_90"]
        );
    }

    #[test]
    fn test_bare_at_is_not_a_mention() {
        assert!(extract_mention_usernames("email me @ home").is_empty());
        assert_eq!(extract_mention_usernames("@@double"), vec!["double"]);
    }

    #[test]
    fn test_mention_mid_persian_text() {
        assert_eq!(
            extract_mention_usernames("نظر @sara درسته"),
            vec!["sara"]
        );
    }

    #[test]
    fn test_adjacent_punctuation() {
        assert_eq!(
            extract_mention_usernames("(@alice)(@bob)"),
            vec!["alice", "bob"]
        );
    }
}
