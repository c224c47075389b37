use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ScanError;
use crate::metadata::MediaEntry;
use crate::normalize::Normalizer;

/// An immediate child of the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: String,
    pub is_dir: bool,
}

/// A file found by the recursive walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    pub dir_path: PathBuf,
    pub file_name: String,
}

impl WalkedFile {
    pub fn path(&self) -> PathBuf {
        self.dir_path.join(&self.file_name)
    }
}

/// Entries in scan order, plus the per-entry failures met along the way.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub entries: Vec<MediaEntry>,
    pub errors: Vec<ScanError>,
}

/// Fails with `InvalidPath` unless `root` is an existing directory.
pub fn validate_root(root: &Path) -> Result<(), ScanError> {
    if !root.is_dir() {
        return Err(ScanError::InvalidPath {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Immediate children of `root`, sorted by name. Symlinks are followed, so a
/// link to a directory counts as a directory.
pub fn list_entries(root: &Path) -> Result<Vec<ListedEntry>, ScanError> {
    validate_root(root)?;

    let mut entries = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| ScanError::from_io(root, e))? {
        let entry = entry.map_err(|e| ScanError::from_io(root, e))?;
        let is_dir = match fs::metadata(entry.path()) {
            Ok(metadata) => metadata.is_dir(),
            Err(e) => {
                log::warn!("Failed to read metadata for {:?}: {}", entry.path(), e);
                continue;
            }
        };
        entries.push(ListedEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Every file below `root`, in sorted walk order, following symlinks.
/// Unreadable subdirectories are logged and skipped. A dangling link is still
/// listed, so the size query reports it as a missing entry.
pub fn walk(root: &Path) -> Result<Vec<WalkedFile>, ScanError> {
    validate_root(root)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let vanished = e.io_error().map(|io| io.kind()) == Some(io::ErrorKind::NotFound);
                match e.path() {
                    Some(path) if vanished && e.depth() > 0 => {
                        log::debug!("Listing vanished entry {:?}", path);
                        files.push(walked_file(root, path));
                    }
                    _ => log::warn!("Failed to read directory entry: {}", e),
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        files.push(walked_file(root, entry.path()));
    }

    Ok(files)
}

fn walked_file(root: &Path, path: &Path) -> WalkedFile {
    let dir_path = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    WalkedFile {
        dir_path,
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

/// Current size of the file at `path`.
pub fn stat_size(path: &Path) -> Result<u64, ScanError> {
    let metadata = fs::metadata(path).map_err(|e| ScanError::from_io(path, e))?;
    Ok(metadata.len())
}

/// One entry per immediate subdirectory of `root`.
pub fn scan_directories(root: &Path, normalizer: &Normalizer) -> Result<ScanResult, ScanError> {
    let mut result = ScanResult::default();

    for listed in list_entries(root)? {
        if !listed.is_dir {
            continue;
        }
        let path = root.join(&listed.name);
        result
            .entries
            .push(MediaEntry::directory(normalizer, &listed.name, path));
    }

    log::info!("Found {} directories under {:?}", result.entries.len(), root);
    Ok(result)
}

/// One entry per file below `root` of at least `min_size` bytes.
pub fn scan_files(
    root: &Path,
    normalizer: &Normalizer,
    min_size: u64,
) -> Result<ScanResult, ScanError> {
    let result = build_file_entries(&walk(root)?, normalizer, min_size);

    log::info!(
        "Found {} files under {:?} ({} errors)",
        result.entries.len(),
        root,
        result.errors.len()
    );
    Ok(result)
}

/// Stat and normalize each walked file. A file that vanished since it was
/// listed is recorded in `errors` and the rest are still processed.
pub fn build_file_entries(
    files: &[WalkedFile],
    normalizer: &Normalizer,
    min_size: u64,
) -> ScanResult {
    let mut result = ScanResult::default();

    for walked in files {
        let path = walked.path();
        match MediaEntry::from_path(normalizer, &path) {
            Ok(entry) => {
                if entry.size.unwrap_or(0) >= min_size {
                    result.entries.push(entry);
                } else {
                    log::debug!("Skipping small file: {:?}", path);
                }
            }
            Err(e) => {
                log::warn!("Failed to read metadata for file {:?}: {}", path, e);
                result.errors.push(e);
            }
        }
    }

    result
}
