//! Tone mark table for pinyin vowels.
//!
//! Each base vowel (lower and upper case, including ü/Ü) maps to its four
//! diacritic forms, indexed by tone 1 to 4. The neutral tone has no mark.

const TONE_MARKS: [(char, [char; 4]); 12] = [
    ('a', ['ā', 'á', 'ǎ', 'à']),
    ('e', ['ē', 'é', 'ě', 'è']),
    ('i', ['ī', 'í', 'ǐ', 'ì']),
    ('o', ['ō', 'ó', 'ǒ', 'ò']),
    ('u', ['ū', 'ú', 'ǔ', 'ù']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ']),
    ('A', ['Ā', 'Á', 'Ǎ', 'À']),
    ('E', ['Ē', 'É', 'Ě', 'È']),
    ('I', ['Ī', 'Í', 'Ǐ', 'Ì']),
    ('O', ['Ō', 'Ó', 'Ǒ', 'Ò']),
    ('U', ['Ū', 'Ú', 'Ǔ', 'Ù']),
    ('Ü', ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ']),
];

/// Returns the diacritic form of `base` for `tone` (1..=4).
///
/// Returns `None` for tone 0 (neutral), tones above 4, or characters that
/// are not a pinyin vowel.
pub fn tone_mark(base: char, tone: u8) -> Option<char> {
    if !(1..=4).contains(&tone) {
        return None;
    }
    TONE_MARKS
        .iter()
        .find(|(vowel, _)| *vowel == base)
        .map(|(_, marks)| marks[(tone - 1) as usize])
}

/// Splits a marked vowel into its base vowel and tone number.
///
/// ```
/// use cedict_ingest::pinyin::strip_tone_mark;
///
/// assert_eq!(strip_tone_mark('ǚ'), Some(('ü', 3)));
/// assert_eq!(strip_tone_mark('a'), None);
/// ```
pub fn strip_tone_mark(marked: char) -> Option<(char, u8)> {
    TONE_MARKS.iter().find_map(|(vowel, marks)| {
        marks
            .iter()
            .position(|m| *m == marked)
            .map(|idx| (*vowel, idx as u8 + 1))
    })
}

/// Pinyin vowels recognized when scanning for a tone number, including the
/// ASCII stand-in `v`/`V` for ü/Ü.
pub fn is_pinyin_vowel(c: char) -> bool {
    matches!(
        c,
        'a' | 'e' | 'i' | 'o' | 'u' | 'ü' | 'v' | 'A' | 'E' | 'I' | 'O' | 'U' | 'Ü' | 'V'
    )
}

/// Maps the ASCII stand-in `v`/`V` to `ü`/`Ü`; other characters pass through.
pub fn normalize_umlaut(c: char) -> char {
    match c {
        'v' => 'ü',
        'V' => 'Ü',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_mark_lookup() {
        let test_cases = [
            ('a', 1, Some('ā')),
            ('e', 2, Some('é')),
            ('i', 3, Some('ǐ')),
            ('o', 4, Some('ò')),
            ('ü', 3, Some('ǚ')),
            ('Ü', 4, Some('Ǜ')),
            ('A', 3, Some('Ǎ')),
            ('a', 0, None),
            ('a', 5, None),
            ('x', 1, None),
        ];

        for (base, tone, expected) in test_cases {
            assert_eq!(tone_mark(base, tone), expected, "tone_mark({:?}, {})", base, tone);
        }
    }

    #[test]
    fn test_every_mark_strips_back_to_its_base() {
        for (vowel, marks) in TONE_MARKS.iter() {
            for (idx, mark) in marks.iter().enumerate() {
                assert_eq!(strip_tone_mark(*mark), Some((*vowel, idx as u8 + 1)));
            }
        }
    }

    #[test]
    fn test_umlaut_stand_in() {
        assert!(is_pinyin_vowel('v'));
        assert!(is_pinyin_vowel('Ü'));
        assert!(!is_pinyin_vowel('n'));
        assert_eq!(normalize_umlaut('v'), 'ü');
        assert_eq!(normalize_umlaut('V'), 'Ü');
        assert_eq!(normalize_umlaut('u'), 'u');
    }
}
