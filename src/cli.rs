use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::grouper::KeyStrategy;
use crate::matcher::{MatchOptions, MatchVariant};

/// Sidecar extensions skipped in files mode unless `--no-default-ignores`.
pub const DEFAULT_IGNORED_EXTENSIONS: &[&str] = &["nfo", "txt", "sfv", "srt", "sub", "idx"];

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Compare immediate subdirectories or every file below the root
    #[arg(short, long, default_value = "dirs")]
    pub mode: ScanMode,

    /// Minimum title similarity, 0-1 or a percentage (default: 0.8 for dirs, 0.4 for files)
    #[arg(short, long, value_parser = crate::utils::parse_ratio)]
    pub threshold: Option<f64>,

    /// Maximum relative size difference between matched files (e.g. "5%"; default: off)
    #[arg(long = "size-tolerance", value_parser = crate::utils::parse_ratio)]
    pub size_tolerance: Option<f64>,

    /// Group key format (default: title-and-year for dirs, title for files)
    #[arg(short, long = "key")]
    pub key: Option<KeyFormat>,

    /// Folders whose contents never take part in matching
    #[arg(long = "ignore-folder")]
    pub ignore_folders: Vec<PathBuf>,

    /// File extensions that never take part in matching
    #[arg(long = "ignore-ext")]
    pub ignore_extensions: Vec<String>,

    /// Do not skip the default sidecar extensions in files mode
    #[arg(long)]
    pub no_default_ignores: bool,

    /// Minimum file size to consider in files mode (e.g., "10MB", "1GB")
    #[arg(short = 's', long = "min-size", value_parser = crate::utils::parse_file_size)]
    pub min_file_size: Option<u64>,

    /// Write the duplicate groups as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of threads to use (default: number of CPU cores)
    #[arg(short = 'j', long = "threads")]
    pub num_threads: Option<usize>,

    /// Verbose output, including the reason every rejected pair was skipped
    #[arg(short, long)]
    pub verbose: bool,

    /// Root directory to scan
    #[arg(required = true)]
    pub root_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScanMode {
    Dirs,
    Files,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyFormat {
    TitleAndYear,
    Title,
}

impl From<ScanMode> for MatchVariant {
    fn from(mode: ScanMode) -> Self {
        match mode {
            ScanMode::Dirs => MatchVariant::Directory,
            ScanMode::Files => MatchVariant::File,
        }
    }
}

impl From<KeyFormat> for KeyStrategy {
    fn from(format: KeyFormat) -> Self {
        match format {
            KeyFormat::TitleAndYear => KeyStrategy::TitleAndYear,
            KeyFormat::Title => KeyStrategy::TitleOnly,
        }
    }
}

impl Args {
    pub fn match_options(&self) -> MatchOptions {
        let variant = MatchVariant::from(self.mode);
        let mut options = MatchOptions::new(variant);

        if let Some(threshold) = self.threshold {
            options.threshold = threshold;
        }
        options.size_tolerance = self.size_tolerance;
        options.ignored_folders = self.ignore_folders.clone();
        options.ignored_extensions = self.ignore_extensions.clone();
        if variant == MatchVariant::File && !self.no_default_ignores {
            options
                .ignored_extensions
                .extend(DEFAULT_IGNORED_EXTENSIONS.iter().map(|e| e.to_string()));
        }
        options.verbose = self.verbose;

        options
    }

    pub fn key_strategy(&self) -> KeyStrategy {
        self.key
            .map(KeyStrategy::from)
            .unwrap_or_else(|| KeyStrategy::default_for(self.mode.into()))
    }
}
