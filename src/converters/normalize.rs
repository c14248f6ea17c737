use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Remove diacritics ("émincer" -> "emincer")
pub fn strip_accents(text: &str) -> String {
    text.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Lower-case and strip accents, the form every keyword table is matched against
pub fn fold(text: &str) -> String {
    strip_accents(&text.to_lowercase())
}
