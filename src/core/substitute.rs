/// Custom template substitution — fills `{adjective}`, `{noun}` and `{verb}`
/// placeholders in user-written text.

use crate::core::capitalize::capitalize_sentences;
use crate::schema::word_bank::{WordBank, WordKind};

/// Fill a user-written template from the word bank.
///
/// Runs one pass per word kind, adjectives first, then nouns, then verbs.
/// Each pass repeatedly replaces the first remaining occurrence of its
/// placeholder with the next word from that list. Once the list runs out, the remaining
/// placeholders of that kind stay in the output verbatim. The result is
/// sentence-capitalized. Any string is a valid template.
pub fn generate_from_template(template: &str, bank: &WordBank) -> String {
    let mut text = template.to_string();
    for kind in WordKind::ALL {
        text = fill_placeholders(&text, kind.placeholder(), bank.words(kind));
    }
    capitalize_sentences(&text)
}

/// Replace occurrences of `token` in `text` with consecutive words.
///
/// Each word replaces the first occurrence in the text as it stands after
/// the previous replacement. A word that contains `token`, or that forms
/// one with its neighbours, is therefore filled by the next word.
fn fill_placeholders(text: &str, token: &str, words: &[String]) -> String {
    let mut out = text.to_string();
    for word in words {
        let Some(pos) = out.find(token) else {
            break;
        };
        out.replace_range(pos..pos + token.len(), word);
    }
    out
}
