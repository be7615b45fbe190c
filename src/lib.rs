//! Hanzi-pinyin converts Chinese text into Hanyu Pinyin using ordered
//! dictionary tiers, with tones as diacritics, trailing digits, or not at all.
//!
//! # Example
//!
//! ```
//! use hanzi_pinyin::{Dictionary, Options, Pinyin};
//!
//! let words = Dictionary::parse("words", "拼音:pīn yīn", true).unwrap();
//! let pinyin = Pinyin::new(vec![words], Vec::new(), Options::default());
//!
//! assert_eq!(pinyin.convert("拼音").unwrap(), vec!["pin", "yin"]);
//! assert_eq!(pinyin.unicode_convert("拼音").unwrap(), vec!["pīn", "yīn"]);
//! assert_eq!(pinyin.ascii_convert("拼音").unwrap(), vec!["pin1", "yin1"]);
//! ```

pub mod config;
pub mod dictionary;
mod prepare;
pub mod punctuation;
pub mod tone;

use std::path::Path;

pub use config::{Config, ConfigError};
pub use dictionary::{Dictionary, DictionaryError};
pub use tone::ToneStyle;

/// Conversion options.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Delimiter used when joining tokens for display. Default: a space.
    pub delimiter: String,
    /// Tone style used by [`Pinyin::sentence`]. Default: [`ToneStyle::None`].
    pub style: ToneStyle,
    /// Report unsupported characters instead of dropping them. Default: false.
    pub strict: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            delimiter: " ".to_string(),
            style: ToneStyle::None,
            strict: false,
        }
    }
}

/// A romanization engine bound to a fixed set of dictionary tiers.
///
/// Dictionaries are loaded once, up front, and never change afterwards, so a
/// `Pinyin` can be shared between threads.
#[derive(Debug, Clone)]
pub struct Pinyin {
    dictionaries: Vec<Dictionary>,
    surnames: Vec<Dictionary>,
    options: Options,
}

impl Pinyin {
    /// Creates an engine from general dictionaries (in priority order) and
    /// surname dictionaries.
    pub fn new(
        dictionaries: Vec<Dictionary>,
        surnames: Vec<Dictionary>,
        options: Options,
    ) -> Self {
        Self {
            dictionaries,
            surnames,
            options,
        }
    }

    /// Loads every dictionary named by `config`, resolving paths against
    /// `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is invalid, or, with `strict` set, if a
    /// dictionary is missing or malformed.
    pub fn from_config(config: &Config, base_dir: &Path) -> Result<Self, Error> {
        let load = |paths: Vec<std::path::PathBuf>| -> Result<Vec<Dictionary>, Error> {
            paths
                .iter()
                .map(|path| Dictionary::load(path, config.strict).map_err(Error::from))
                .collect()
        };

        let dictionaries = load(config.dictionary_paths(base_dir)?)?;
        let surnames = load(config.surname_paths(base_dir)?)?;
        tracing::debug!(
            dictionaries = dictionaries.len(),
            surnames = surnames.len(),
            "dictionaries loaded"
        );
        Ok(Self::new(dictionaries, surnames, config.options()))
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Runs the full pipeline and returns the diacritic-marked result.
    ///
    /// With `use_surnames`, the surname dictionaries are consulted before the
    /// general ones. Each tier is skipped once no Han character remains.
    pub fn romanize(&self, text: &str, use_surnames: bool) -> Result<ConvertResult, Error> {
        let mut text = prepare::prepare(text, self.options.strict)?;

        let surnames: &[Dictionary] = if use_surnames { &self.surnames } else { &[] };
        for dictionary in surnames.iter().chain(&self.dictionaries) {
            if !prepare::contains_han(&text) {
                break;
            }
            text = dictionary.replace_all(&text);
        }

        let text = punctuation::normalize(&text);
        Ok(ConvertResult(prepare::collapse(&text)))
    }

    /// Converts `text` to toneless pinyin tokens.
    pub fn convert(&self, text: &str) -> Result<Vec<String>, Error> {
        Ok(self.romanize(text, false)?.none())
    }

    /// Converts `text` to pinyin tokens with tone diacritics.
    pub fn unicode_convert(&self, text: &str) -> Result<Vec<String>, Error> {
        Ok(self.romanize(text, false)?.unicode())
    }

    /// Converts `text` to pinyin tokens with trailing tone digits.
    pub fn ascii_convert(&self, text: &str) -> Result<Vec<String>, Error> {
        Ok(self.romanize(text, false)?.ascii())
    }

    /// Converts a personal name, preferring surname pronunciations.
    pub fn name(&self, text: &str) -> Result<ConvertResult, Error> {
        self.romanize(text, true)
    }

    /// Converts `text` in the configured style, joined by the configured
    /// delimiter.
    pub fn sentence(&self, text: &str) -> Result<String, Error> {
        let result = self.romanize(text, false)?;
        Ok(result.join(self.options.style, &self.options.delimiter))
    }

    /// First letter of every syllable, punctuation excluded.
    pub fn abbr(&self, text: &str) -> Result<String, Error> {
        let abbr = self
            .convert(text)?
            .iter()
            .filter(|token| !punctuation::is_punctuation(token))
            .filter_map(|token| token.chars().next())
            .collect();
        Ok(abbr)
    }

    /// Lowercase toneless syllables joined by `-`, suitable for URLs.
    ///
    /// Tokens that are not plain ASCII words (punctuation, unconverted
    /// characters) are left out.
    pub fn permalink(&self, text: &str) -> Result<String, Error> {
        let tokens: Vec<String> = self
            .convert(text)?
            .into_iter()
            .filter(|token| {
                !punctuation::is_punctuation(token)
                    && token
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            })
            .map(|token| token.to_ascii_lowercase())
            .collect();
        Ok(tokens.join("-"))
    }
}

/// The diacritic-marked result of a conversion: one space-delimited syllable
/// or punctuation mark per token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertResult(String);

impl ConvertResult {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tokens rendered in `style`.
    pub fn tokens(&self, style: ToneStyle) -> Vec<String> {
        tone::format(&self.0, style)
    }

    /// Toneless tokens.
    pub fn none(&self) -> Vec<String> {
        self.tokens(ToneStyle::None)
    }

    /// Tokens with tone diacritics.
    pub fn unicode(&self) -> Vec<String> {
        self.tokens(ToneStyle::Unicode)
    }

    /// Tokens with trailing tone digits.
    pub fn ascii(&self) -> Vec<String> {
        self.tokens(ToneStyle::Ascii)
    }

    /// Tokens rendered in `style` and joined by `delimiter`.
    pub fn join(&self, style: ToneStyle, delimiter: &str) -> String {
        self.tokens(style).join(delimiter)
    }
}

impl std::fmt::Display for ConvertResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that can occur while setting up or running a conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unsupported character {0:?}")]
    UnsupportedCharacter(char),
}
