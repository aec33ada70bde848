//! Numbered pinyin to tone-marked pinyin conversion.
//!
//! The transcoder scans the whole input once, left to right, and rewrites every
//! non-overlapping syllable tail of the shape
//!
//! ```text
//! vowel{1,3}  [n][g][r]  digit(0-5)
//! ```
//!
//! where the vowels come from `a e i o u ü` (either case, `v`/`V` standing in
//! for ü/Ü). Syllables do not need separators, so `pin1yin1` yields `pīnyīn`.
//!
//! The tone digit is taken modulo 5, so `5` and `0` are the neutral tone and
//! add no mark. In a vowel cluster of two or more letters the mark goes on the
//! first letter if it is `a`, `e` or `o`, otherwise on the second. The digit is
//! always dropped; the trailing `n`/`g`/`r` letters are kept.
//!
//! Text that does not fit the pattern passes through unchanged, so calling
//! [`to_toned_form`] on already marked pinyin is a no-op.
//!
//! # Examples
//!
//! ```
//! use cedict_ingest::pinyin::{to_toned_form, ErhuaPolicy};
//!
//! assert_eq!(to_toned_form("Zhong1 guo2", ErhuaPolicy::Merge), "Zhōng guó");
//! assert_eq!(to_toned_form("lu:4 se4", ErhuaPolicy::Merge), "lǜ sè");
//! assert_eq!(to_toned_form("yi1 dian3 r5", ErhuaPolicy::Merge), "yī diǎnr");
//! assert_eq!(to_toned_form("yi1 dian3 r5", ErhuaPolicy::KeepSpace), "yī diǎn r");
//! ```

use super::tone_marks::{is_pinyin_vowel, normalize_umlaut, tone_mark};

/// Longest vowel run considered part of a single syllable nucleus.
const MAX_VOWEL_CLUSTER: usize = 3;

/// Coda letters allowed between the vowels and the tone digit, in order.
const CODA_LETTERS: [char; 3] = ['n', 'g', 'r'];

/// How the neutral-tone erhua suffix (`r5`) is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErhuaPolicy {
    /// `dian3 r5` becomes `diǎnr`.
    #[default]
    Merge,
    /// `dian3 r5` becomes `diǎn r`.
    KeepSpace,
}

impl ErhuaPolicy {
    pub fn from_keep_space(keep_space: bool) -> Self {
        if keep_space { ErhuaPolicy::KeepSpace } else { ErhuaPolicy::Merge }
    }
}

/// A tone-numbered syllable tail found by [`find_toned_syllable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ToneMatch {
    vowel_end: usize,
    coda_end: usize,
    tone: u8,
}

/// Converts numbered pinyin to tone-marked pinyin.
///
/// See the module documentation for the matching rules. The erhua policy is
/// applied once, after all syllables have been converted.
pub fn to_toned_form(numeric: &str, erhua: ErhuaPolicy) -> String {
    // The source spells ü as "u:". Fold it to the real character up front so
    // the vowel scan sees a single code point.
    let normalized = numeric.replace("u:", "ü").replace("U:", "Ü");
    let chars: Vec<char> = normalized.chars().collect();
    let mut toned = String::with_capacity(normalized.len() + 8);

    let mut pos = 0;
    while pos < chars.len() {
        match find_toned_syllable(&chars, pos) {
            Some(m) => {
                push_marked_cluster(&mut toned, &chars[pos..m.vowel_end], m.tone);
                toned.extend(&chars[m.vowel_end..m.coda_end]);
                // Skip the tone digit.
                pos = m.coda_end + 1;
            }
            None => {
                toned.push(chars[pos]);
                pos += 1;
            }
        }
    }

    apply_erhua_policy(&toned, erhua)
}

/// Tries to match a toned syllable tail starting exactly at `start`.
fn find_toned_syllable(chars: &[char], start: usize) -> Option<ToneMatch> {
    let mut vowel_end = start;
    while vowel_end < chars.len()
        && vowel_end - start < MAX_VOWEL_CLUSTER
        && is_pinyin_vowel(chars[vowel_end])
    {
        vowel_end += 1;
    }
    if vowel_end == start {
        return None;
    }

    let mut coda_end = vowel_end;
    for letter in CODA_LETTERS {
        if chars.get(coda_end).is_some_and(|c| c.to_ascii_lowercase() == letter) {
            coda_end += 1;
        }
    }

    let digit = chars.get(coda_end)?.to_digit(10)?;
    if digit > 5 {
        return None;
    }

    Some(ToneMatch {
        vowel_end,
        coda_end,
        tone: (digit % 5) as u8,
    })
}

fn push_marked_cluster(out: &mut String, cluster: &[char], tone: u8) {
    let mark_pos = if cluster.len() > 1 && !matches!(cluster[0], 'a' | 'e' | 'o' | 'A' | 'E' | 'O') {
        1
    } else {
        0
    };

    for (idx, c) in cluster.iter().enumerate() {
        let vowel = normalize_umlaut(*c);
        if idx == mark_pos && tone != 0 {
            out.push(tone_mark(vowel, tone).unwrap_or(vowel));
        } else {
            out.push(vowel);
        }
    }
}

/// Rewrites every remaining `r5` as `r`. With [`ErhuaPolicy::Merge`] a single
/// space in front of it is removed as well.
fn apply_erhua_policy(toned: &str, erhua: ErhuaPolicy) -> String {
    let chars: Vec<char> = toned.chars().collect();
    let is_erhua_at = |idx: usize| {
        matches!(chars.get(idx).copied(), Some('r' | 'R')) && chars.get(idx + 1) == Some(&'5')
    };

    let mut out = String::with_capacity(toned.len());
    let mut idx = 0;
    while idx < chars.len() {
        if erhua == ErhuaPolicy::Merge && chars[idx] == ' ' && is_erhua_at(idx + 1) {
            idx += 1;
            continue;
        }
        if is_erhua_at(idx) {
            out.push(chars[idx]);
            idx += 2;
            continue;
        }
        out.push(chars[idx]);
        idx += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pinyin::tone_marks::strip_tone_mark;

    fn toned(input: &str) -> String {
        to_toned_form(input, ErhuaPolicy::Merge)
    }

    #[test]
    fn test_single_syllables() {
        let test_cases = [
            ("hao3", "hǎo"),
            ("shui3", "shuǐ"),
            ("ma5", "ma"),
            ("ma0", "ma"),
            ("ni3", "nǐ"),
            ("liu2", "liú"),
            ("guo2", "guó"),
            ("zhong1", "zhōng"),
            ("er4", "èr"),
            ("er5", "er"),
            ("xue2", "xué"),
            ("lv4", "lǜ"),
            ("nu:e4", "nüè"),
            ("lu:3", "lǚ"),
            ("nv3", "nǚ"),
        ];

        for (input, expected) in test_cases {
            assert_eq!(toned(input), expected, "to_toned_form({:?})", input);
        }
    }

    #[test]
    fn test_multi_syllable_strings_are_fully_converted() {
        assert_eq!(toned("pin1yin1"), "pīnyīn");
        assert_eq!(toned("pin1 yin1"), "pīn yīn");
        assert_eq!(toned("Zhong1guo2ren2"), "Zhōngguórén");
        assert_eq!(toned("xi1 an1"), "xī ān");
    }

    #[test]
    fn test_case_is_preserved_per_letter() {
        assert_eq!(toned("Ai4"), "Ài");
        assert_eq!(toned("AI4"), "ÀI");
        assert_eq!(toned("aI4"), "àI");
        assert_eq!(toned("SHUI3"), "SHUǏ");
        assert_eq!(toned("LV4"), "LǛ");
        assert_eq!(toned("Lu:4"), "Lǜ");
        assert_eq!(toned("XIANG3"), "XIǍNG");
    }

    #[test]
    fn test_untoned_text_is_unchanged() {
        let test_cases = ["pīnyīn", "hello", "", "A A zhi", "ma", "123", "xx7"];
        for input in test_cases {
            assert_eq!(toned(input), input, "to_toned_form({:?})", input);
            assert_eq!(toned(&toned(input)), toned(input));
        }
    }

    #[test]
    fn test_digits_outside_the_tone_range_are_kept() {
        assert_eq!(toned("a6"), "a6");
        assert_eq!(toned("ka3 la1 O K"), "kǎ lā O K");
    }

    #[test]
    fn test_long_vowel_run_matches_its_last_three_letters() {
        assert_eq!(toned("aaaa1"), "aāaa");
    }

    #[test]
    fn test_erhua_policies_differ_only_by_space() {
        let merged = to_toned_form("hua1 r5", ErhuaPolicy::Merge);
        let spaced = to_toned_form("hua1 r5", ErhuaPolicy::KeepSpace);
        assert_eq!(merged, "huār");
        assert_eq!(spaced, "huā r");
        assert_eq!(spaced.replace(' ', ""), merged);

        assert_eq!(to_toned_form("hua1r5", ErhuaPolicy::Merge), "huār");
        assert_eq!(to_toned_form("hua1r5", ErhuaPolicy::KeepSpace), "huār");
        assert_eq!(to_toned_form("wan2 r5 r5", ErhuaPolicy::Merge), "wánrr");
    }

    #[test]
    fn test_erhua_policy_from_flag() {
        assert_eq!(ErhuaPolicy::from_keep_space(true), ErhuaPolicy::KeepSpace);
        assert_eq!(ErhuaPolicy::from_keep_space(false), ErhuaPolicy::Merge);
    }

    #[test]
    fn test_tone_class_survives_conversion() {
        for syllable in ["ba", "pie", "guai", "xiong", "lüe", "yuan"] {
            for digit in 0..=5u8 {
                let numeric = format!("{}{}", syllable, digit);
                let converted = toned(&numeric);
                let marks: Vec<(char, u8)> = converted.chars().filter_map(strip_tone_mark).collect();
                match digit % 5 {
                    0 => assert!(marks.is_empty(), "{} -> {}", numeric, converted),
                    tone => assert_eq!(marks.iter().map(|(_, t)| *t).collect::<Vec<_>>(), vec![tone], "{} -> {}", numeric, converted),
                }
            }
        }
    }
}
