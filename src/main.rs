//! Hanzi-pinyin CLI - converts Chinese text into Hanyu Pinyin.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use hanzi_pinyin::{Config, Pinyin, ToneStyle};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "HANZI_PINYIN_LOG";

/// Converts Chinese text into Hanyu Pinyin.
#[derive(Parser, Debug)]
#[command(name = "hanzi-pinyin")]
#[command(version, about, long_about = None)]
struct Args {
    /// Text to convert. Reads lines from stdin when omitted.
    #[arg(value_name = "TEXT")]
    text: Vec<String>,

    /// Read input from stdin. Cannot be combined with TEXT.
    #[arg(long, conflicts_with = "text")]
    stdin: bool,

    /// Tone style.
    #[arg(long, value_enum)]
    style: Option<Style>,

    /// Treat the input as a personal name.
    #[arg(long)]
    name: bool,

    /// Print the first letter of every syllable.
    #[arg(long, conflicts_with_all = ["name", "permalink"])]
    abbr: bool,

    /// Print a URL-friendly slug.
    #[arg(long, conflicts_with = "name")]
    permalink: bool,

    /// Delimiter between syllables.
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Configuration file. Defaults to the nearest .hanzi-pinyin.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// General dictionary, in priority order. Replaces configured ones.
    #[arg(long = "dict", value_name = "PATH")]
    dicts: Vec<String>,

    /// Surname dictionary. Replaces configured ones.
    #[arg(long = "surnames", value_name = "PATH")]
    surnames: Vec<String>,

    /// Fail on missing dictionaries and unsupported characters.
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Style {
    None,
    Unicode,
    Ascii,
}

impl From<Style> for ToneStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::None => ToneStyle::None,
            Style::Unicode => ToneStyle::Unicode,
            Style::Ascii => ToneStyle::Ascii,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> Result<(PathBuf, Config), String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Error reading current directory: {}", e))?;

    let (base_dir, mut config) = if let Some(path) = &args.config {
        let config = Config::from_file(path).map_err(|e| format!("Error: {}", e))?;
        let base_dir = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| cwd.clone());
        (base_dir, config)
    } else {
        match Config::discover(&cwd).map_err(|e| format!("Error: {}", e))? {
            Some((path, config)) => {
                tracing::debug!(path = %path.display(), "using configuration");
                let base_dir = path
                    .parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| cwd.clone());
                (base_dir, config)
            }
            None => (cwd.clone(), Config::default()),
        }
    };

    // Paths given on the command line are relative to the working directory.
    let from_cwd = |paths: &[String]| -> Vec<String> {
        paths
            .iter()
            .map(|p| cwd.join(p).to_string_lossy().into_owned())
            .collect()
    };
    if !args.dicts.is_empty() {
        config.dict = from_cwd(&args.dicts);
    }
    if !args.surnames.is_empty() {
        config.surnames = from_cwd(&args.surnames);
    }
    if let Some(style) = args.style {
        config.style = style.into();
    }
    if let Some(delimiter) = &args.delimiter {
        config.delimiter = delimiter.clone();
    }
    config.strict |= args.strict;

    Ok((base_dir, config))
}

fn convert_line(
    pinyin: &Pinyin,
    args: &Args,
    line: &str,
) -> Result<String, hanzi_pinyin::Error> {
    let options = pinyin.options();
    if args.abbr {
        pinyin.abbr(line)
    } else if args.permalink {
        pinyin.permalink(line)
    } else if args.name {
        Ok(pinyin.name(line)?.join(options.style, &options.delimiter))
    } else {
        pinyin.sentence(line)
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let (base_dir, config) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    let pinyin = match Pinyin::from_config(&config, &base_dir) {
        Ok(pinyin) => pinyin,
        Err(e) => {
            eprintln!("Error loading dictionaries: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let lines: Vec<String> = if args.stdin || args.text.is_empty() {
        let mut input = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut input) {
            eprintln!("Error reading stdin: {}", e);
            return ExitCode::FAILURE;
        }
        input.lines().map(str::to_string).collect()
    } else {
        vec![args.text.join(" ")]
    };

    let results: Vec<_> = lines
        .par_iter()
        .map(|line| convert_line(&pinyin, &args, line))
        .collect();

    for result in results {
        match result {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("Error converting: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
