/// Word preparation — raw comma-separated input to ordered word lists.

/// Split `raw` on commas into trimmed, lower-cased, non-empty words.
///
/// Order is preserved and duplicates are kept. Terms that are blank after
/// trimming are dropped, so `""` and `",,,"` both yield an empty list.
pub fn prepare_words(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}
