// SPDX-License-Identifier: GPL-3.0-or-later
//! Configuration file support.
//!
//! This module loads `.hanzi-pinyin.toml` files, which name the dictionary
//! tiers to load and the output settings to convert with.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{Options, ToneStyle};

/// The default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".hanzi-pinyin.toml";

/// Configuration for the converter.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// General dictionaries in priority order. Entries are glob patterns
    /// (default: `dict/words_0.dict`, `dict/words_1.dict`).
    pub dict: Vec<String>,

    /// Surname dictionaries, consulted before `dict` for names
    /// (default: `dict/surnames.dict`).
    pub surnames: Vec<String>,

    /// Delimiter used when joining tokens for display (default: a space).
    pub delimiter: String,

    /// Tone representation: `none`, `unicode` or `ascii` (default: `none`).
    pub style: ToneStyle,

    /// Fail on missing dictionaries, malformed dictionary lines and
    /// unsupported characters instead of skipping them (default: false).
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dict: vec![
                "dict/words_0.dict".to_string(),
                "dict/words_1.dict".to_string(),
            ],
            surnames: vec!["dict/surnames.dict".to_string()],
            delimiter: " ".to_string(),
            style: ToneStyle::None,
            strict: false,
        }
    }
}

impl Config {
    /// Reads settings from TOML source. Missing keys take their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Reads settings from the TOML file at `path`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Finds the nearest `.hanzi-pinyin.toml` at or above `start_dir`.
    ///
    /// The returned path is the file that was loaded; dictionary patterns in
    /// it are relative to its directory. `None` means no file was found up
    /// to the filesystem root.
    pub fn discover(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let mut current = start_dir.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                let config = Self::from_file(&config_path)?;
                return Ok(Some((config_path, config)));
            }
            if !current.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Resolve the general dictionary patterns against `base_dir`.
    pub fn dictionary_paths(&self, base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        expand_patterns(&self.dict, base_dir)
    }

    /// Resolve the surname dictionary patterns against `base_dir`.
    pub fn surname_paths(&self, base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        expand_patterns(&self.surnames, base_dir)
    }

    /// Conversion options described by this configuration.
    pub fn options(&self) -> Options {
        Options {
            delimiter: self.delimiter.clone(),
            style: self.style,
            strict: self.strict,
        }
    }
}

/// Expand each pattern in order. Matches of one pattern are sorted; a pattern
/// without matches is kept as a literal path.
fn expand_patterns(patterns: &[String], base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    use glob::{MatchOptions, glob_with};

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    let mut paths = Vec::new();
    for pattern in patterns {
        let full_pattern = base_dir.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();
        let matches = glob_with(&pattern_str, options)
            .map_err(|e| ConfigError::Glob(pattern.clone(), e))?;

        let mut found = Vec::new();
        for entry in matches {
            let path = entry.map_err(ConfigError::GlobIo)?;
            if path.is_file() {
                found.push(path);
            }
        }

        if found.is_empty() {
            paths.push(full_pattern);
            continue;
        }

        found.sort();
        for path in found {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    Ok(paths)
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the configuration file.
    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    /// Error parsing the TOML configuration.
    #[error("failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
    /// Error parsing a glob pattern.
    #[error("invalid glob pattern '{0}': {1}")]
    Glob(String, #[source] glob::PatternError),
    /// I/O error during glob iteration.
    #[error("error reading file: {0}")]
    GlobIo(#[source] glob::GlobError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.dict, vec!["dict/words_0.dict", "dict/words_1.dict"]);
        assert_eq!(config.surnames, vec!["dict/surnames.dict"]);
        assert_eq!(config.delimiter, " ");
        assert_eq!(config.style, ToneStyle::None);
        assert!(!config.strict);
    }

    #[test]
    fn test_parse_empty_toml() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
dict = ["data/phrases.dict", "data/chars.dict"]
surnames = ["data/names.dict"]
delimiter = "-"
style = "ascii"
strict = true
"#,
        )
        .unwrap();
        assert_eq!(config.dict, vec!["data/phrases.dict", "data/chars.dict"]);
        assert_eq!(config.surnames, vec!["data/names.dict"]);
        assert_eq!(config.delimiter, "-");
        assert_eq!(config.style, ToneStyle::Ascii);
        assert!(config.strict);
    }

    #[test]
    fn test_parse_style_unicode() {
        let config = Config::from_toml(r#"style = "unicode""#).unwrap();
        assert_eq!(config.style, ToneStyle::Unicode);
    }

    #[test]
    fn test_parse_invalid_style() {
        assert!(Config::from_toml(r#"style = "pretty""#).is_err());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::from_toml("strict = \"not a bool\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_options() {
        let config = Config::from_toml("delimiter = \"/\"\nstrict = true").unwrap();
        let options = config.options();
        assert_eq!(options.delimiter, "/");
        assert_eq!(options.style, ToneStyle::None);
        assert!(options.strict);
    }

    #[test]
    fn test_discover_no_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = Config::discover(temp_dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_discover_config_in_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let sub_dir = temp_dir.path().join("subdir").join("nested");
        std::fs::create_dir_all(&sub_dir).unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "delimiter = \",\"").unwrap();

        let (path, config) = Config::discover(&sub_dir).unwrap().unwrap();
        assert_eq!(path, config_path);
        assert_eq!(config.delimiter, ",");
    }

    #[test]
    fn test_from_file_reports_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "dict = 3").unwrap();

        let err = Config::from_file(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(..)));
    }

    #[test]
    fn test_dictionary_paths_expand_globs_in_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dict_dir = temp_dir.path().join("dict");
        std::fs::create_dir_all(&dict_dir).unwrap();
        std::fs::write(dict_dir.join("words_1.dict"), "").unwrap();
        std::fs::write(dict_dir.join("words_0.dict"), "").unwrap();
        std::fs::write(dict_dir.join("extra.dict"), "").unwrap();

        let config =
            Config::from_toml(r#"dict = ["dict/words_*.dict", "dict/extra.dict"]"#).unwrap();
        let paths = config.dictionary_paths(temp_dir.path()).unwrap();

        assert_eq!(
            paths,
            vec![
                dict_dir.join("words_0.dict"),
                dict_dir.join("words_1.dict"),
                dict_dir.join("extra.dict"),
            ]
        );
    }

    #[test]
    fn test_dictionary_paths_keep_missing_literal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let paths = config.surname_paths(temp_dir.path()).unwrap();
        assert_eq!(paths, vec![temp_dir.path().join("dict/surnames.dict")]);
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let config = Config::from_toml(r#"dict = ["dict/[.dict"]"#).unwrap();
        let err = config.dictionary_paths(Path::new(".")).unwrap_err();
        assert!(matches!(err, ConfigError::Glob(..)));
    }
}
