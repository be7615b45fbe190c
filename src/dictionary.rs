// SPDX-License-Identifier: GPL-3.0-or-later
//! Dictionary tiers.
//!
//! A dictionary maps Chinese terms to pinyin with tone diacritics. Each tier is
//! loaded once and compiled into a leftmost-longest Aho-Corasick automaton, so
//! a multi-character term always wins over the characters it contains.
//!
//! The on-disk format is one `<term>:<pinyin>` pair per line.

use std::path::{Path, PathBuf};

use daachorse::{CharwiseDoubleArrayAhoCorasick, CharwiseDoubleArrayAhoCorasickBuilder, MatchKind};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Separates a term from its pinyin on a dictionary line.
pub const SEPARATOR: char = ':';

/// Errors that can occur when loading a dictionary.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{name}:{line}: malformed entry {content:?}")]
    Malformed {
        name: String,
        line: usize,
        content: String,
    },

    #[error("failed to build matcher for {name}: {message}")]
    Build { name: String, message: String },
}

/// One dictionary tier.
#[derive(Clone)]
pub struct Dictionary {
    name: String,
    entries: IndexMap<String, String>,
    matcher: Option<CharwiseDoubleArrayAhoCorasick<u32>>,
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("name", &self.name)
            .field("len", &self.entries.len())
            .finish()
    }
}

impl Dictionary {
    /// Build a dictionary from in-memory pairs. The first pair for a term wins.
    pub fn from_pairs<I, K, V>(name: impl Into<String>, pairs: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let mut entries = IndexMap::new();
        for (term, pinyin) in pairs {
            let term = term.into();
            if term.is_empty() {
                continue;
            }
            insert_entry(&name, &mut entries, term, pinyin.into());
        }
        Self::compile(name, entries)
    }

    /// Parse dictionary source text.
    ///
    /// Blank lines and `#` comments are ignored. A malformed line is an error
    /// in strict mode and skipped otherwise.
    pub fn parse(
        name: impl Into<String>,
        source: &str,
        strict: bool,
    ) -> Result<Self, DictionaryError> {
        let name = name.into();
        let mut entries = IndexMap::new();

        for (index, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match parse_line(line) {
                Some((term, pinyin)) => {
                    insert_entry(&name, &mut entries, term.to_string(), pinyin.to_string());
                }
                None if strict => {
                    return Err(DictionaryError::Malformed {
                        name,
                        line: index + 1,
                        content: line.to_string(),
                    });
                }
                None => {
                    warn!(dictionary = %name, line = index + 1, "skipping malformed entry");
                }
            }
        }

        Self::compile(name, entries)
    }

    /// Load a dictionary file.
    ///
    /// A missing or unreadable file is an error in strict mode. Otherwise the
    /// dictionary is empty and contributes no replacements.
    pub fn load(path: &Path, strict: bool) -> Result<Self, DictionaryError> {
        let name = path.display().to_string();
        match std::fs::read_to_string(path) {
            Ok(source) => {
                let dictionary = Self::parse(name, &source, strict)?;
                debug!(dictionary = %dictionary.name, entries = dictionary.len(), "loaded");
                Ok(dictionary)
            }
            Err(source) if strict => Err(DictionaryError::Io {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) => {
                warn!(dictionary = %name, error = %err, "dictionary unavailable, ignoring");
                Self::compile(name, IndexMap::new())
            }
        }
    }

    fn compile(name: String, entries: IndexMap<String, String>) -> Result<Self, DictionaryError> {
        let matcher = if entries.is_empty() {
            None
        } else {
            let patterns = entries
                .keys()
                .enumerate()
                .map(|(index, term)| (term.as_str(), index as u32));
            let matcher = CharwiseDoubleArrayAhoCorasickBuilder::new()
                .match_kind(MatchKind::LeftmostLongest)
                .build_with_values(patterns)
                .map_err(|e| DictionaryError::Build {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            Some(matcher)
        };

        Ok(Self {
            name,
            entries,
            matcher,
        })
    }

    /// The name this dictionary was created with (its path, for files).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the pinyin for an exact term.
    pub fn get(&self, term: &str) -> Option<&str> {
        self.entries.get(term).map(String::as_str)
    }

    /// Entries in source order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every matched term with its pinyin, padded by spaces.
    ///
    /// Matches are leftmost-longest and non-overlapping. Unmatched text is
    /// copied through.
    pub fn replace_all(&self, text: &str) -> String {
        let Some(matcher) = &self.matcher else {
            return text.to_string();
        };

        let mut result = String::with_capacity(text.len() * 2);
        let mut last = 0;
        let mut replaced = 0usize;
        for m in matcher.leftmost_find_iter(text) {
            let Some((_, pinyin)) = self.entries.get_index(m.value() as usize) else {
                continue;
            };
            result.push_str(&text[last..m.start()]);
            result.push(' ');
            result.push_str(pinyin);
            result.push(' ');
            last = m.end();
            replaced += 1;
        }
        result.push_str(&text[last..]);

        debug!(dictionary = %self.name, replaced, "replaced terms");
        result
    }
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (term, pinyin) = line.split_once(SEPARATOR)?;
    let (term, pinyin) = (term.trim(), pinyin.trim());
    if term.is_empty() || pinyin.is_empty() {
        return None;
    }
    Some((term, pinyin))
}

fn insert_entry(
    name: &str,
    entries: &mut IndexMap<String, String>,
    term: String,
    pinyin: String,
) {
    if entries.contains_key(&term) {
        debug!(dictionary = %name, %term, "duplicate term ignored");
        return;
    }
    entries.insert(term, pinyin);
}
