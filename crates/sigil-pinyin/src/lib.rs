// this_file: crates/sigil-pinyin/src/lib.rs

//! Numbered Pinyin to tone-marked Pinyin, one token per character.
//!
//! `"ni3 hao3"` becomes `["nǐ", "hǎo"]`. Tokens that are not a syllable
//! followed by a tone digit pass through untouched, so already-marked
//! Pinyin or free text works as an annotation too.

/// Tone variants per vowel: tones 1-4, then neutral
static TONE_MARKS: [(char, [char; 5]); 6] = [
    ('a', ['ā', 'á', 'ǎ', 'à', 'a']),
    ('e', ['ē', 'é', 'ě', 'è', 'e']),
    ('i', ['ī', 'í', 'ǐ', 'ì', 'i']),
    ('o', ['ō', 'ó', 'ǒ', 'ò', 'o']),
    ('u', ['ū', 'ú', 'ǔ', 'ù', 'u']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ', 'ü']),
];

/// Uppercase forms, same layout as [`TONE_MARKS`]
static TONE_MARKS_UPPER: [(char, [char; 5]); 6] = [
    ('A', ['Ā', 'Á', 'Ǎ', 'À', 'A']),
    ('E', ['Ē', 'É', 'Ě', 'È', 'E']),
    ('I', ['Ī', 'Í', 'Ǐ', 'Ì', 'I']),
    ('O', ['Ō', 'Ó', 'Ǒ', 'Ò', 'O']),
    ('U', ['Ū', 'Ú', 'Ǔ', 'Ù', 'U']),
    ('Ü', ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ', 'Ü']),
];

const VOWELS: [char; 6] = ['a', 'e', 'o', 'i', 'u', 'ü'];

fn is_delimiter(ch: char) -> bool {
    matches!(ch, ',' | ';' | '/' | '|') || ch.is_whitespace()
}

fn is_syllable_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, 'ü' | 'Ü' | ':')
}

/// Splits a numbered token into its letters and tone index (0-3 for tones
/// 1-4, 4 for neutral). `None` when the token is not `<letters><0-5>`.
fn split_tone(token: &str) -> Option<(&str, usize)> {
    let digit = token.chars().last()?;
    let num = digit.to_digit(10).filter(|n| *n <= 5)?;
    let base = &token[..token.len() - 1];
    if base.is_empty() || !base.chars().all(is_syllable_char) {
        return None;
    }

    let tone_index = match num {
        0 | 5 => 4,
        n => (n - 1) as usize,
    };
    Some((base, tone_index))
}

fn normalize_umlaut(base: &str) -> String {
    base.replace("u:", "ü")
        .replace("U:", "Ü")
        .replace('v', "ü")
        .replace('V', "Ü")
}

fn find_pair(syllable: &[char], first: char, second: char) -> Option<usize> {
    syllable
        .windows(2)
        .position(|pair| pair[0] == first && pair[1] == second)
}

/// Index of the letter that carries the tone mark in a lowercase syllable.
///
/// Rules are tried in order and the first match wins: `a`, `e`, the `o` of
/// `ou`, the `u` of `iu`, the `i` of `ui`, then `o`, `i`, `u`, `ü`, and
/// finally the leftmost vowel.
pub fn tone_mark_position(syllable: &[char]) -> Option<usize> {
    let find = |target: char| syllable.iter().position(|&ch| ch == target);

    find('a')
        .or_else(|| find('e'))
        .or_else(|| find_pair(syllable, 'o', 'u'))
        .or_else(|| find_pair(syllable, 'i', 'u').map(|i| i + 1))
        .or_else(|| find_pair(syllable, 'u', 'i').map(|i| i + 1))
        .or_else(|| ['o', 'i', 'u', 'ü'].into_iter().find_map(find))
        .or_else(|| syllable.iter().position(|ch| VOWELS.contains(ch)))
}

fn marked_vowel(vowel: char, tone_index: usize, uppercase: bool) -> Option<char> {
    let table = if uppercase {
        &TONE_MARKS_UPPER
    } else {
        &TONE_MARKS
    };
    let lower = vowel.to_lowercase().next()?;
    let row = TONE_MARKS.iter().position(|(base, _)| *base == lower)?;
    table[row].1.get(tone_index).copied()
}

/// Converts one numbered token (`"huang2"`) to its marked form (`"huáng"`).
///
/// `v` and `u:` spell `ü`. Digits 0 and 5 mean the neutral tone, which
/// carries no mark. Anything else is returned unchanged.
pub fn to_tone_marks(token: &str) -> String {
    let Some((base, tone_index)) = split_tone(token) else {
        return token.to_string();
    };

    let normalized: Vec<char> = normalize_umlaut(base).chars().collect();
    let lowered: Vec<char> = normalized
        .iter()
        .map(|ch| ch.to_lowercase().next().unwrap_or(*ch))
        .collect();

    let Some(pos) = tone_mark_position(&lowered) else {
        return token.to_string();
    };
    let Some(mark) = marked_vowel(lowered[pos], tone_index, normalized[pos].is_uppercase())
    else {
        return token.to_string();
    };

    let mut out = normalized;
    out[pos] = mark;
    out.into_iter().collect()
}

/// Splits raw Pinyin into tone-marked tokens, one per character.
///
/// Tokens are separated by any run of commas, whitespace, semicolons,
/// slashes or pipes. A single token is repeated for every character.
/// Otherwise the list is padded with empty strings or truncated to
/// `char_count`, with a warning. Missing or empty input yields empty
/// annotations silently.
pub fn normalize(raw: Option<&str>, char_count: usize) -> Vec<String> {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return vec![String::new(); char_count];
    };

    let mut tokens: Vec<String> = raw
        .split(is_delimiter)
        .filter(|fragment| !fragment.is_empty())
        .map(to_tone_marks)
        .collect();

    if tokens.len() == 1 && char_count > 1 {
        tokens = vec![tokens[0].clone(); char_count];
    }

    if tokens.len() != char_count {
        log::warn!(
            "pinyin token count ({}) != character count ({char_count}); trunc/pad applied.",
            tokens.len()
        );
        tokens.resize(char_count, String::new());
    }

    tokens
}


#[cfg(test)]
mod proptests;
