use std::fmt;
use std::path::PathBuf;

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::metadata::MediaEntry;
use crate::similarity::title_similarity;

/// Default similarity threshold when comparing directory names.
pub const DEFAULT_DIRECTORY_THRESHOLD: f64 = 0.8;
/// File names carry far more noise, so they are compared more leniently.
pub const DEFAULT_FILE_THRESHOLD: f64 = 0.4;

/// Which gates apply on top of title similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchVariant {
    /// Years must be present on both sides and equal.
    Directory,
    /// Extension groups must match; years must match only when both are known.
    File,
}

#[derive(Debug, Clone)]
pub struct MatchOptions {
    pub variant: MatchVariant,
    pub threshold: f64,
    pub ignored_folders: Vec<PathBuf>,
    pub ignored_extensions: Vec<String>,
    /// Maximum relative size difference. `None` disables the gate.
    pub size_tolerance: Option<f64>,
    /// Log every rejected pair with its reason.
    pub verbose: bool,
}

impl MatchOptions {
    pub fn new(variant: MatchVariant) -> Self {
        let threshold = match variant {
            MatchVariant::Directory => DEFAULT_DIRECTORY_THRESHOLD,
            MatchVariant::File => DEFAULT_FILE_THRESHOLD,
        };
        Self {
            variant,
            threshold,
            ignored_folders: Vec::new(),
            ignored_extensions: Vec::new(),
            size_tolerance: None,
            verbose: false,
        }
    }
}

/// Two entries (by index, `i < j`) that passed every gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPair {
    pub i: usize,
    pub j: usize,
    pub similarity: f64,
}

/// Why a pair was not matched.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    IgnoredFolder,
    IgnoredExtension,
    MissingYear,
    YearMismatch(u16, u16),
    ExtensionGroupMismatch,
    SizeOutOfTolerance(f64),
    BelowThreshold(f64),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::IgnoredFolder => write!(f, "under an ignored folder"),
            SkipReason::IgnoredExtension => write!(f, "ignored extension"),
            SkipReason::MissingYear => write!(f, "year missing"),
            SkipReason::YearMismatch(a, b) => write!(f, "year mismatch ({} vs {})", a, b),
            SkipReason::ExtensionGroupMismatch => write!(f, "extension group mismatch"),
            SkipReason::SizeOutOfTolerance(diff) => {
                write!(f, "size differs by {:.1}%", diff * 100.0)
            }
            SkipReason::BelowThreshold(ratio) => {
                write!(f, "similarity {:.3} below threshold", ratio)
            }
        }
    }
}

/// Evaluate one pair. The cheap metadata gates run before the similarity
/// ratio; the set of accepted pairs does not depend on that order.
pub fn compare(a: &MediaEntry, b: &MediaEntry, options: &MatchOptions) -> Result<f64, SkipReason> {
    if is_ignored_folder(a, options) || is_ignored_folder(b, options) {
        return Err(SkipReason::IgnoredFolder);
    }
    if is_ignored_extension(a, options) || is_ignored_extension(b, options) {
        return Err(SkipReason::IgnoredExtension);
    }

    match options.variant {
        MatchVariant::Directory => match (a.year, b.year) {
            (Some(ya), Some(yb)) if ya != yb => return Err(SkipReason::YearMismatch(ya, yb)),
            (Some(_), Some(_)) => {}
            _ => return Err(SkipReason::MissingYear),
        },
        MatchVariant::File => {
            match (a.extension_group, b.extension_group) {
                (Some(ga), Some(gb)) if ga == gb => {}
                _ => return Err(SkipReason::ExtensionGroupMismatch),
            }
            if let (Some(ya), Some(yb)) = (a.year, b.year) {
                if ya != yb {
                    return Err(SkipReason::YearMismatch(ya, yb));
                }
            }
        }
    }

    if let (Some(tolerance), Some(sa), Some(sb)) = (options.size_tolerance, a.size, b.size) {
        let diff = relative_size_difference(sa, sb);
        if diff > tolerance {
            return Err(SkipReason::SizeOutOfTolerance(diff));
        }
    }

    let ratio = title_similarity(&a.cleaned_name, &b.cleaned_name);
    if ratio < options.threshold {
        return Err(SkipReason::BelowThreshold(ratio));
    }

    Ok(ratio)
}

fn is_ignored_folder(entry: &MediaEntry, options: &MatchOptions) -> bool {
    options
        .ignored_folders
        .iter()
        .any(|folder| entry.path.starts_with(folder))
}

fn is_ignored_extension(entry: &MediaEntry, options: &MatchOptions) -> bool {
    match &entry.extension {
        Some(ext) => options
            .ignored_extensions
            .iter()
            .any(|ignored| ignored.trim_start_matches('.').eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// `|a - b| / max(a, b)`, zero when both sizes are zero.
pub fn relative_size_difference(a: u64, b: u64) -> f64 {
    let largest = a.max(b);
    if largest == 0 {
        return 0.0;
    }
    a.abs_diff(b) as f64 / largest as f64
}

/// All gated pairs, ordered by `i` then `j`.
pub fn find_matches(entries: &[MediaEntry], options: &MatchOptions) -> Vec<MatchPair> {
    find_matches_with_progress(entries, options, &ProgressBar::hidden())
}

/// Rows are compared in parallel; each row yields its own list and the lists
/// are concatenated in row order, so the output is independent of scheduling.
pub fn find_matches_with_progress(
    entries: &[MediaEntry],
    options: &MatchOptions,
    progress: &ProgressBar,
) -> Vec<MatchPair> {
    progress.set_length(entries.len() as u64);

    let rows: Vec<Vec<MatchPair>> = (0..entries.len())
        .into_par_iter()
        .map(|i| {
            let row = match_row(entries, i, options);
            progress.inc(1);
            row
        })
        .collect();

    let matches: Vec<MatchPair> = rows.into_iter().flatten().collect();
    log::info!(
        "Compared {} entries, {} matching pairs",
        entries.len(),
        matches.len()
    );
    matches
}

fn match_row(entries: &[MediaEntry], i: usize, options: &MatchOptions) -> Vec<MatchPair> {
    let a = &entries[i];
    let mut row = Vec::new();

    for (j, b) in entries.iter().enumerate().skip(i + 1) {
        match compare(a, b, options) {
            Ok(similarity) => {
                log::debug!(
                    "Match {:.3}: {:?} <-> {:?}",
                    similarity,
                    a.raw_name,
                    b.raw_name
                );
                row.push(MatchPair { i, j, similarity });
            }
            Err(reason) => {
                if options.verbose {
                    log::info!("Skip {:?} <-> {:?}: {}", a.raw_name, b.raw_name, reason);
                }
            }
        }
    }

    row
}
