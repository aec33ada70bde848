// Pinyin romanization helpers
//
// This module converts numbered pinyin (`ni3 hao3`) into tone-marked pinyin
// (`nǐ hǎo`) and exposes the tone mark table it is built on.

pub mod tone_marks;
pub mod tone_transcoder;

pub use tone_marks::{tone_mark, strip_tone_mark, is_pinyin_vowel};
pub use tone_transcoder::{to_toned_form, ErhuaPolicy};
