use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::error::ScanError;
use crate::grouper::DuplicateGroups;

/// Console form: a `Duplicate:` header per group followed by its members.
pub fn render_groups(groups: &DuplicateGroups) -> String {
    let mut out = String::new();
    for (key, members) in groups.iter() {
        let _ = writeln!(out, "\nDuplicate: {}", key);
        for path in members {
            let _ = writeln!(out, "  - {}", path);
        }
    }
    out
}

pub fn print_groups(groups: &DuplicateGroups) {
    print!("{}", render_groups(groups));
}

/// Serialize the groups as UTF-8 JSON with a four-space indent. Non-ASCII
/// characters are written as-is.
pub fn to_json(groups: &DuplicateGroups) -> Result<Vec<u8>, ScanError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    groups.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write the report through a temp file in the destination directory, then
/// rename it into place so a crash never leaves a half-written file.
pub fn write_json(groups: &DuplicateGroups, destination: &Path) -> Result<(), ScanError> {
    let json = to_json(groups)?;

    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| ScanError::from_io(parent, e))?;
    temp.write_all(&json)
        .map_err(|e| ScanError::from_io(temp.path(), e))?;
    temp.persist(destination)?;

    log::info!("Duplicate data written to {:?}", destination);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouper::{group, KeyStrategy};
    use crate::matcher::MatchPair;
    use crate::metadata::MediaEntry;
    use crate::normalize::Normalizer;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn sample_groups() -> DuplicateGroups {
        let normalizer = Normalizer::default();
        let entries = vec![
            MediaEntry::directory(
                &normalizer,
                "Amélie.2001.720p",
                PathBuf::from("/m/Amélie.2001.720p"),
            ),
            MediaEntry::directory(
                &normalizer,
                "Amélie (2001)",
                PathBuf::from("/m/Amélie (2001)"),
            ),
        ];
        let pairs = [MatchPair { i: 0, j: 1, similarity: 1.0 }];
        group(&entries, &pairs, KeyStrategy::TitleAndYear)
    }

    #[test]
    fn test_render_groups() {
        let rendered = render_groups(&sample_groups());
        assert_eq!(
            rendered,
            "\nDuplicate: AMÉLIE (2001)\n  - /m/Amélie (2001)\n  - /m/Amélie.2001.720p\n"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_groups(&DuplicateGroups::default()), "");
    }

    #[test]
    fn test_json_layout() {
        let json = String::from_utf8(to_json(&sample_groups()).unwrap()).unwrap();
        let expected = concat!(
            "{\n",
            "    \"AMÉLIE (2001)\": [\n",
            "        \"/m/Amélie (2001)\",\n",
            "        \"/m/Amélie.2001.720p\"\n",
            "    ]\n",
            "}\n",
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn test_write_json_to_file() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = tempdir()?;
        let destination = temp_dir.path().join("duplicates.json");

        write_json(&sample_groups(), &destination)?;

        let content = fs::read_to_string(&destination)?;
        let parsed: serde_json::Value = serde_json::from_str(&content)?;
        assert_eq!(parsed["AMÉLIE (2001)"].as_array().map(Vec::len), Some(2));

        // Only the report itself remains; the temp file was renamed.
        assert_eq!(fs::read_dir(temp_dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_write_json_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let destination = temp_dir.path().join("missing/duplicates.json");

        assert!(write_json(&sample_groups(), &destination).is_err());
    }
}
