//! Username derivation from a full name.
//!
//! Cyrillic letters are transliterated to Latin, everything that is not a
//! lowercase Latin letter or whitespace is dropped, and the first and last
//! remaining words become `First_Last`.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Username used when nothing usable survives transliteration.
pub const FALLBACK_USERNAME: &str = "Student";

lazy_static! {
    /// Russian Cyrillic to Latin. Letters not listed here (ь, ъ, Kazakh-specific
    /// letters) pass through and are removed by the Latin-only filter.
    static ref TRANSLITERATION: HashMap<char, &'static str> = HashMap::from([
        ('а', "a"), ('б', "b"), ('в', "v"), ('г', "g"), ('д', "d"),
        ('е', "e"), ('ё', "e"), ('ж', "zh"), ('з', "z"), ('и', "i"),
        ('й', "y"), ('к', "k"), ('л', "l"), ('м', "m"), ('н', "n"),
        ('о', "o"), ('п', "p"), ('р', "r"), ('с', "s"), ('т', "t"),
        ('у', "u"), ('ф', "f"), ('х', "kh"), ('ц', "ts"), ('ч', "ch"),
        ('ш', "sh"), ('щ', "shch"), ('ы', "y"), ('э', "e"), ('ю', "yu"),
        ('я', "ya"),
    ]);
}

/// Transliterate an already lower-cased string. Unmapped characters are kept.
pub fn transliterate(lowercase: &str) -> String {
    let mut out = String::with_capacity(lowercase.len());
    for c in lowercase.chars() {
        match TRANSLITERATION.get(&c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

/// Word separators: the ECMAScript `\s` class (WhiteSpace plus LineTerminator).
///
/// Differs from `char::is_whitespace`: U+FEFF separates words, U+0085 and
/// U+180E do not.
fn is_separator(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{000B}' | '\u{000C}' | '\r' | ' ' | '\u{00A0}' | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{FEFF}'
    )
}

/// Derive a display username such as `Ivan_Sidorov` from a full name.
pub fn generate_username(full_name: &str) -> String {
    let latin: String = transliterate(&full_name.to_lowercase())
        .chars()
        .filter(|&c| c.is_ascii_lowercase() || is_separator(c))
        .collect();

    let words: Vec<&str> = latin.split(is_separator).filter(|w| !w.is_empty()).collect();

    match words.as_slice() {
        [] => FALLBACK_USERNAME.to_string(),
        [only] => capitalize(only),
        [first, .., last] => format!("{}_{}", capitalize(first), capitalize(last)),
    }
}

/// Uppercase the first character, leave the rest untouched.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
