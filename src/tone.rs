// SPDX-License-Identifier: GPL-3.0-or-later
//! Tone representation.
//!
//! Converted text carries tones as Unicode diacritics. This module derives the
//! other two representations from it: ASCII with a trailing tone digit, and
//! toneless ASCII.

use std::sync::LazyLock;

use serde::Deserialize;

/// How tones are represented in the output.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToneStyle {
    /// No tone marking: `pin yin`.
    #[default]
    None,
    /// Unicode diacritics: `pīn yīn`.
    Unicode,
    /// ASCII with a trailing tone digit: `pin1 yin1`.
    Ascii,
}

/// A diacritic-marked final and its ASCII spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneMark {
    pub marked: &'static str,
    pub plain: &'static str,
    /// 1-4, or 0 for the neutral tone.
    pub tone: u8,
}

const fn mark(marked: &'static str, plain: &'static str, tone: u8) -> ToneMark {
    ToneMark {
        marked,
        plain,
        tone,
    }
}

/// The tone table, grouped by final.
pub const TONE_MARKS: &[ToneMark] = &[
    // a
    mark("ā", "a", 1),
    mark("á", "a", 2),
    mark("ǎ", "a", 3),
    mark("à", "a", 4),
    // o
    mark("ō", "o", 1),
    mark("ó", "o", 2),
    mark("ǒ", "o", 3),
    mark("ò", "o", 4),
    // e
    mark("ē", "e", 1),
    mark("é", "e", 2),
    mark("ě", "e", 3),
    mark("è", "e", 4),
    // i
    mark("ī", "i", 1),
    mark("í", "i", 2),
    mark("ǐ", "i", 3),
    mark("ì", "i", 4),
    // u
    mark("ū", "u", 1),
    mark("ú", "u", 2),
    mark("ǔ", "u", 3),
    mark("ù", "u", 4),
    // v
    mark("ǖ", "v", 1),
    mark("ǘ", "v", 2),
    mark("ǚ", "v", 3),
    mark("ǜ", "v", 4),
    // ai
    mark("āi", "ai", 1),
    mark("ái", "ai", 2),
    mark("ǎi", "ai", 3),
    mark("ài", "ai", 4),
    // ei
    mark("ēi", "ei", 1),
    mark("éi", "ei", 2),
    mark("ěi", "ei", 3),
    mark("èi", "ei", 4),
    // ui
    mark("uī", "ui", 1),
    mark("uí", "ui", 2),
    mark("uǐ", "ui", 3),
    mark("uì", "ui", 4),
    // ao
    mark("āo", "ao", 1),
    mark("áo", "ao", 2),
    mark("ǎo", "ao", 3),
    mark("ào", "ao", 4),
    // ou
    mark("ōu", "ou", 1),
    mark("óu", "ou", 2),
    mark("ǒu", "ou", 3),
    mark("òu", "ou", 4),
    // iu
    mark("īu", "iu", 1),
    mark("íu", "iu", 2),
    mark("ǐu", "iu", 3),
    mark("ìu", "iu", 4),
    // ie
    mark("iē", "ie", 1),
    mark("ié", "ie", 2),
    mark("iě", "ie", 3),
    mark("iè", "ie", 4),
    // ue
    mark("üē", "ue", 1),
    mark("üé", "ue", 2),
    mark("üě", "ue", 3),
    mark("üè", "ue", 4),
    // er
    mark("ēr", "er", 1),
    mark("ér", "er", 2),
    mark("ěr", "er", 3),
    mark("èr", "er", 4),
    // an
    mark("ān", "an", 1),
    mark("án", "an", 2),
    mark("ǎn", "an", 3),
    mark("àn", "an", 4),
    // en
    mark("ēn", "en", 1),
    mark("én", "en", 2),
    mark("ěn", "en", 3),
    mark("èn", "en", 4),
    // in
    mark("īn", "in", 1),
    mark("ín", "in", 2),
    mark("ǐn", "in", 3),
    mark("ìn", "in", 4),
    // un
    mark("ūn", "un", 1),
    mark("ún", "un", 2),
    mark("ǔn", "un", 3),
    mark("ùn", "un", 4),
    // ang
    mark("āng", "ang", 1),
    mark("áng", "ang", 2),
    mark("ǎng", "ang", 3),
    mark("àng", "ang", 4),
    // eng
    mark("ēng", "eng", 1),
    mark("éng", "eng", 2),
    mark("ěng", "eng", 3),
    mark("èng", "eng", 4),
    // ing
    mark("īng", "ing", 1),
    mark("íng", "ing", 2),
    mark("ǐng", "ing", 3),
    mark("ìng", "ing", 4),
    // ong
    mark("ōng", "ong", 1),
    mark("óng", "ong", 2),
    mark("ǒng", "ong", 3),
    mark("òng", "ong", 4),
    // neutral-tone ü
    mark("ü", "v", 0),
];

/// [`TONE_MARKS`] ordered for matching: longest glyph first, table order among
/// glyphs of equal length.
static MATCH_ORDER: LazyLock<Vec<ToneMark>> = LazyLock::new(|| {
    let mut marks = TONE_MARKS.to_vec();
    marks.sort_by_key(|m| std::cmp::Reverse(m.marked.chars().count()));
    marks
});

/// Render a single diacritic-marked token in the given style.
///
/// Tokens without any tone glyph (punctuation, Latin or numeric runs) are
/// returned unchanged.
pub fn format_token(token: &str, style: ToneStyle) -> String {
    if style == ToneStyle::Unicode {
        return token.to_string();
    }

    let mut result = token.to_string();
    let mut tone = None;
    for mark in MATCH_ORDER.iter() {
        if !result.contains(mark.marked) {
            continue;
        }
        result = result.replace(mark.marked, mark.plain);
        if tone.is_none() && mark.tone > 0 {
            tone = Some(mark.tone);
        }
    }

    if style == ToneStyle::Ascii
        && let Some(tone) = tone
    {
        result.push(char::from(b'0' + tone));
    }
    result
}

/// Split a space-delimited converted string into tokens rendered in `style`.
pub fn format(text: &str, style: ToneStyle) -> Vec<String> {
    text.split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| format_token(token, style))
        .collect()
}

/// The tone digit carried by a diacritic-marked token, if any.
pub fn tone_of(token: &str) -> Option<u8> {
    MATCH_ORDER
        .iter()
        .find(|mark| mark.tone > 0 && token.contains(mark.marked))
        .map(|mark| mark.tone)
}
