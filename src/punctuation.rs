// SPDX-License-Identifier: GPL-3.0-or-later
//! Punctuation normalization.
//!
//! Chinese punctuation marks are rewritten to their Latin/ASCII equivalents,
//! each preceded by a space so that it becomes a token of its own once
//! whitespace is collapsed.

/// Ordered `(glyph, replacement)` pairs.
///
/// Multi-character glyphs come before the single characters they are built
/// from: `……` and `——` must be consumed before `—` is.
pub const PUNCTUATIONS: &[(&str, &str)] = &[
    // Comma, full stop, exclamation and question marks
    ("，", ","),
    ("。", "."),
    ("！", "!"),
    ("？", "?"),
    ("：", ":"),
    ("；", ";"),
    // Quotation marks
    ("\u{2018}", "'"),
    ("\u{2019}", "'"),
    ("\u{201C}", "\""),
    ("\u{201D}", "\""),
    // Corner brackets
    ("「", "["),
    ("」", "]"),
    ("『", "["),
    ("』", "]"),
    // Brackets
    ("（", "("),
    ("）", ")"),
    ("〔", "["),
    ("〕", "]"),
    ("【", "["),
    ("】", "]"),
    ("{", "{"),
    ("}", "}"),
    // Ellipsis and dashes
    ("……", "..."),
    ("——", "-"),
    ("—", "-"),
    // Slashes
    ("/", "/"),
    ("\\", "\\"),
    ("～", "~"),
    // Title marks
    ("《", "<"),
    ("》", ">"),
    ("〈", "<"),
    ("〉", ">"),
    // Interpunct and enumeration comma
    ("·", "·"),
    ("、", ","),
];

/// Returns `true` if `ch` is (part of) a glyph in [`PUNCTUATIONS`].
pub fn is_known_glyph(ch: char) -> bool {
    PUNCTUATIONS
        .iter()
        .any(|(glyph, _)| glyph.contains(ch))
}

/// Returns `true` if `token` is one of the normalized punctuation strings.
pub fn is_punctuation(token: &str) -> bool {
    PUNCTUATIONS
        .iter()
        .any(|(_, replacement)| *replacement == token)
}

/// Replace every known glyph with a space followed by its replacement.
pub fn normalize(text: &str) -> String {
    let mut result = text.to_string();
    for (glyph, replacement) in PUNCTUATIONS {
        if result.contains(glyph) {
            result = result.replace(glyph, &format!(" {}", replacement));
        }
    }
    result
}
