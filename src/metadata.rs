use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ScanError;
use crate::normalize::Normalizer;
use crate::scanner::stat_size;

/// Coarse file category used to keep unrelated file types apart.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionGroup {
    Video,
    Audio,
    Image,
    Document,
}

pub const EXTENSION_GROUPS: &[(&str, ExtensionGroup)] = &[
    ("mkv", ExtensionGroup::Video),
    ("mp4", ExtensionGroup::Video),
    ("m4v", ExtensionGroup::Video),
    ("avi", ExtensionGroup::Video),
    ("mov", ExtensionGroup::Video),
    ("wmv", ExtensionGroup::Video),
    ("flv", ExtensionGroup::Video),
    ("webm", ExtensionGroup::Video),
    ("mpg", ExtensionGroup::Video),
    ("mpeg", ExtensionGroup::Video),
    ("ts", ExtensionGroup::Video),
    ("m2ts", ExtensionGroup::Video),
    ("vob", ExtensionGroup::Video),
    ("mp3", ExtensionGroup::Audio),
    ("flac", ExtensionGroup::Audio),
    ("aac", ExtensionGroup::Audio),
    ("m4a", ExtensionGroup::Audio),
    ("ogg", ExtensionGroup::Audio),
    ("opus", ExtensionGroup::Audio),
    ("wav", ExtensionGroup::Audio),
    ("wma", ExtensionGroup::Audio),
    ("jpg", ExtensionGroup::Image),
    ("jpeg", ExtensionGroup::Image),
    ("png", ExtensionGroup::Image),
    ("gif", ExtensionGroup::Image),
    ("bmp", ExtensionGroup::Image),
    ("webp", ExtensionGroup::Image),
    ("tiff", ExtensionGroup::Image),
    ("txt", ExtensionGroup::Document),
    ("nfo", ExtensionGroup::Document),
    ("pdf", ExtensionGroup::Document),
    ("doc", ExtensionGroup::Document),
    ("docx", ExtensionGroup::Document),
    ("srt", ExtensionGroup::Document),
    ("sub", ExtensionGroup::Document),
    ("epub", ExtensionGroup::Document),
];

impl ExtensionGroup {
    /// Case-insensitive table lookup. Unknown extensions have no group.
    pub fn from_extension(extension: &str) -> Option<Self> {
        EXTENSION_GROUPS
            .iter()
            .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
            .map(|(_, group)| *group)
    }
}

impl fmt::Display for ExtensionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtensionGroup::Video => "video",
            ExtensionGroup::Audio => "audio",
            ExtensionGroup::Image => "image",
            ExtensionGroup::Document => "document",
        };
        write!(f, "{}", name)
    }
}

/// Everything after the last `.` of the file name, case preserved. Empty when
/// the name has no dot.
pub fn extension_of(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    match file_name.rfind('.') {
        Some(index) => file_name[index + 1..].to_string(),
        None => String::new(),
    }
}

/// The name minus its extension. Leading-dot names keep their full text.
fn stem_of(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) if index > 0 => &file_name[..index],
        _ => file_name,
    }
}

/// One scanned directory or file, normalized once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEntry {
    pub raw_name: String,
    pub cleaned_name: String,
    pub year: Option<u16>,
    pub path: PathBuf,
    pub size: Option<u64>,
    pub extension: Option<String>,
    pub extension_group: Option<ExtensionGroup>,
}

impl MediaEntry {
    /// A directory entry: the whole name is the title, no file metadata.
    pub fn directory(normalizer: &Normalizer, raw_name: &str, path: PathBuf) -> Self {
        let name = normalizer.normalize(raw_name);
        Self {
            raw_name: raw_name.to_string(),
            cleaned_name: name.cleaned_name,
            year: name.year,
            path,
            size: None,
            extension: None,
            extension_group: None,
        }
    }

    /// A file entry built from already known metadata. The title comes from
    /// the stem, the year from the full file name.
    pub fn file(normalizer: &Normalizer, raw_name: &str, path: PathBuf, size: Option<u64>) -> Self {
        let cleaned_name = normalizer.clean_title(stem_of(raw_name));
        let year = crate::normalize::find_year(raw_name);
        let extension = extension_of(Path::new(raw_name));
        let extension_group = ExtensionGroup::from_extension(&extension);

        Self {
            raw_name: raw_name.to_string(),
            cleaned_name,
            year,
            path,
            size,
            extension: Some(extension),
            extension_group,
        }
    }

    /// Stat the file at `path` and build its entry. Fails with
    /// `ScanError::NotFound` when the file vanished since it was listed.
    pub fn from_path(normalizer: &Normalizer, path: &Path) -> Result<Self, ScanError> {
        let size = stat_size(path)?;
        let raw_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::file(normalizer, &raw_name, path.to_path_buf(), Some(size)))
    }

    pub fn path_string(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}
