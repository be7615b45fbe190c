// SPDX-License-Identifier: GPL-3.0-or-later
//! Input preparation and whitespace handling.

use std::sync::LazyLock;

use regex::Regex;

use crate::Error;
use crate::punctuation;

/// Inserted before every Latin word so it never fuses with its neighbours.
pub const MARKER: char = '\t';

/// Latin letters (with or without tone marks), digits, `_` and `-`.
static LATIN_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Latin}0-9_-][\p{Latin}\p{M}0-9_-]*").expect("valid Latin run pattern")
});

static KEPT_CHAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Han}\p{P}\p{Z}\p{M}\p{N}\p{L}\s]").expect("valid kept character pattern")
});

static HAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Han}").expect("valid Han pattern"));

/// Mark Latin runs and drop characters that cannot be converted.
///
/// In strict mode the first unsupported character is reported instead of
/// being dropped.
pub fn prepare(text: &str, strict: bool) -> Result<String, Error> {
    let marked = LATIN_RUN.replace_all(text, |caps: &regex::Captures| {
        format!("{}{}", MARKER, &caps[0])
    });

    let mut result = String::with_capacity(marked.len());
    let mut buf = [0u8; 4];
    for ch in marked.chars() {
        if is_kept(ch, &mut buf) {
            result.push(ch);
        } else if strict {
            return Err(Error::UnsupportedCharacter(ch));
        } else {
            tracing::trace!(?ch, "dropping unsupported character");
        }
    }
    Ok(result)
}

fn is_kept(ch: char, buf: &mut [u8; 4]) -> bool {
    KEPT_CHAR.is_match(ch.encode_utf8(buf)) || punctuation::is_known_glyph(ch)
}

/// Turn markers into spaces, collapse whitespace runs and trim both ends.
pub fn collapse(text: &str) -> String {
    text.replace(MARKER, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `true` if `text` still contains a Han character.
pub fn contains_han(text: &str) -> bool {
    HAN.is_match(text)
}
