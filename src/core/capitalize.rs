/// Sentence capitalization — uppercases the first letter of each sentence.

/// Punctuation that ends a sentence.
const SENTENCE_ENDERS: &[char] = &['.', '!', '?'];

/// Uppercase every ASCII lowercase letter that starts the text or follows
/// a sentence ender and exactly one whitespace character.
///
/// Positions are found against the input as given, so an uppercased letter
/// never shifts or creates another match. Anything else at a matched
/// position (digits, quotes, capitals, non-ASCII letters) is left alone.
pub fn capitalize_sentences(text: &str) -> String {
    let starts = sentence_starts(text);
    if starts.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut next = starts.iter().peekable();
    for (pos, ch) in text.char_indices() {
        if next.peek() == Some(&&pos) {
            next.next();
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Byte offsets of the lowercase letters that begin a sentence.
fn sentence_starts(text: &str) -> Vec<usize> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut starts = Vec::new();

    for (i, &(pos, ch)) in chars.iter().enumerate() {
        if !ch.is_ascii_lowercase() {
            continue;
        }
        let at_start = i == 0;
        let after_ender = i >= 2
            && chars[i - 1].1.is_whitespace()
            && SENTENCE_ENDERS.contains(&chars[i - 2].1);
        if at_start || after_ender {
            starts.push(pos);
        }
    }
    starts
}
