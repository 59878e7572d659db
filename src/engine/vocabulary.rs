use crate::world::Vocabulary;

/// What the player's input boiled down to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Candidate exit code to look up in the current location's exits.
    pub code: String,
    /// The uppercased words of a multi-character input; empty for a single
    /// character, which is used as a code directly.
    pub words: Vec<String>,
}

/// Turn raw input into a candidate exit code.
///
/// A single character is taken as the code. Anything longer is split into
/// words and the first word the vocabulary knows replaces the whole input;
/// later words are ignored. With no known word the uppercased input is kept
/// and will not match any exit.
pub fn resolve_direction(input: &str, vocabulary: &Vocabulary) -> Resolution {
    let direction = input.trim_end_matches(['\r', '\n']).to_uppercase();

    if direction.chars().count() <= 1 {
        return Resolution {
            code: direction,
            words: Vec::new(),
        };
    }

    let words: Vec<String> = direction.split_whitespace().map(str::to_string).collect();
    let code = words
        .iter()
        .find_map(|w| vocabulary.code_for(w))
        .map(str::to_string)
        .unwrap_or(direction);

    Resolution { code, words }
}
