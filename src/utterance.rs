//! Utterance normalization.
//!
//! Every entry point lower-cases and trims raw input before routing, so the
//! trigger table and the confirmation tokens only ever see normalized text.

/// Sentinel returned by a recognizer that failed to understand the audio.
///
/// Already normalized. It is deliberately an ordinary utterance: it matches
/// no trigger and falls through to the dialogue engine, which is how the
/// assistant has always reacted to an unintelligible command.
pub const NO_RESULT: &str = "none";

/// Normalize one unit of user input for routing.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Words removed from a note utterance before it is logged.
const NOTE_COMMAND_WORDS: [&str; 3] = ["make", "a", "note"];

/// Strip the note command words from an utterance, preserving every other
/// token and their order.
///
/// Only exact (case-insensitive) matches of "make", "a", "note" are removed;
/// "a" inside another word survives, as does a word like "notebook".
pub fn strip_note_words(utterance: &str) -> String {
    utterance
        .split_whitespace()
        .filter(|word| !NOTE_COMMAND_WORDS.contains(&word.to_lowercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize("  Open Google  "), "open google");
        assert_eq!(normalize("GOODBYE"), "goodbye");
    }

    #[test]
    fn normalize_leaves_interior_whitespace() {
        assert_eq!(normalize("what  time is it"), "what  time is it");
    }

    #[test]
    fn strip_note_words_removes_exact_command_words_only() {
        assert_eq!(strip_note_words("make a note buy milk"), "buy milk");
        assert_eq!(
            strip_note_words("make a note to call amanda"),
            "to call amanda"
        );
    }

    #[test]
    fn strip_note_words_is_case_insensitive() {
        assert_eq!(strip_note_words("Make A Note buy milk"), "buy milk");
    }

    #[test]
    fn strip_note_words_preserves_similar_words() {
        // "notebook" contains "note" but is not an exact match.
        assert_eq!(
            strip_note_words("make a note buy a notebook"),
            "buy notebook"
        );
    }

    #[test]
    fn strip_note_words_preserves_order() {
        assert_eq!(
            strip_note_words("please make a note water the plants friday"),
            "please water the plants friday"
        );
    }

    #[test]
    fn no_result_sentinel_is_normalized() {
        assert_eq!(normalize(NO_RESULT), NO_RESULT);
    }
}
