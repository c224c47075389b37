//! Release-name normalization.
//!
//! Turns scene-style names such as `Movie.Name.2020.1080p.BluRay.x264-YIFY`
//! into a comparable title (`MOVIE NAME`) and a release year (`2020`).

use std::sync::LazyLock;

use regex::Regex;

/// Characters scene releases use in place of spaces.
const SEPARATORS: &[char] = &['.', '_', '-'];

/// Quality, codec and audio tokens stripped as whole words before casing.
const QUALITY_TOKENS: &[&str] = &[
    "aac", "2 0", "5 1", "dd5", "tigole", "nogrp", "smurf", "10bit", "360p", "480p", "720p",
    "1080p", "2160p", "h 264", "x264", "x265", "h264", "h265", "hevc", "hdr", "bluray",
    "webrip", "dvdrip", "brrip", "web dl", "webdl", "rarbg",
];

/// Literal release-group tokens removed wherever they occur in the uppercased title.
pub const RELEASE_GROUPS: &[&str] = &[
    "7SINS", "AMRAP", "WEB -AMRAP", "AMZN WEB", "AMZN", "BVS", "DON", "DIMEPIECE", "ULYSSE",
    "JAPHSON", "DSNP", "DRONES", "LAMA", "KOGI", "MVD", "OFT", "THR", "VXT", "NF", "NIKT0",
    "PROPER", "-ELEVATE", "SPHD", "XOR", "X0R", "USURY", "YIFY", "RARBG",
];

/// Markers in priority order. The first one present cuts the title at its
/// first occurrence.
pub const CUTOFF_MARKERS: &[&str] = &[
    "RARBG", "AAC", "AC3", "AVC", "BDRIP", "BRIP", "BDR9P", "H 264", "DTS", "DD5", "HDR10",
    "HEVC", "EAC3", "270P", "360P", "480P", "720P", "800P", "1036P", "1040P", "1080P", "1078P",
    "1GB", "4K WEB", "XVID", "10BIT", "DDP", "DD2", "REMASTERED", "REPACK", "MKV", "MP4",
];

/// How close to the end a dangling `(` or `()` must be to get trimmed.
pub const DEFAULT_SUFFIX_TOLERANCE: usize = 5;

static RE_QUALITY: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"(?i)\b({})\b", QUALITY_TOKENS.join("|"));
    Regex::new(&pattern).expect("Invalid quality token regex")
});

static RE_TITLE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)[0-9]{2}\b").expect("Invalid title year regex"));

/// Years are only taken when not glued to another letter or digit. `_` counts
/// as a separator here, unlike `\b`.
static RE_RAW_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\p{L}\p{N}])((?:19|20)[0-9]{2})(?:[^\p{L}\p{N}]|$)")
        .expect("Invalid raw year regex")
});

/// Result of normalizing one raw name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedName {
    pub cleaned_name: String,
    pub year: Option<u16>,
}

/// The title pipeline. Stateless apart from the trailing-bracket tolerance.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    pub suffix_tolerance: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            suffix_tolerance: DEFAULT_SUFFIX_TOLERANCE,
        }
    }
}

impl Normalizer {
    pub fn new(suffix_tolerance: usize) -> Self {
        Self { suffix_tolerance }
    }

    pub fn normalize(&self, raw_name: &str) -> NormalizedName {
        NormalizedName {
            cleaned_name: self.clean_title(raw_name),
            year: find_year(raw_name),
        }
    }

    /// Runs the full title pipeline. The steps depend on each other's output,
    /// so their order is fixed.
    pub fn clean_title(&self, raw_name: &str) -> String {
        let title = extract_title(raw_name);
        let title = title.to_uppercase();
        let title = remove_release_groups(&title);
        let title = truncate_at_cutoff(&title, CUTOFF_MARKERS);

        let tolerance = self.suffix_tolerance;
        let title = remove_suffix_and_after(&title, "()", tolerance);
        let title = remove_suffix_and_after(&title, "(", tolerance);
        let title = title.replace("[]", "");
        let title = remove_suffix_and_after(&title, "()", tolerance);

        let title = title.strip_suffix('(').unwrap_or(&title);
        let title = title.trim();
        title.strip_suffix('-').unwrap_or(title).to_string()
    }
}

/// Normalize with the default tolerance.
pub fn normalize(raw_name: &str) -> NormalizedName {
    Normalizer::default().normalize(raw_name)
}

/// First `19xx`/`20xx` token of the raw name, left to right.
pub fn find_year(text: &str) -> Option<u16> {
    RE_RAW_YEAR
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Separator replacement, tag and year stripping, whitespace collapse and
/// title-casing.
pub fn extract_title(text: &str) -> String {
    let cleaned = text.replace(SEPARATORS, " ").to_lowercase();
    let cleaned = RE_QUALITY.replace_all(&cleaned, "");
    let cleaned = RE_TITLE_YEAR.replace_all(&cleaned, "");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    title_case(&cleaned)
}

/// Uppercase a letter when the previous character is not a letter, lowercase
/// it otherwise. `10bit` becomes `10Bit`, `o'neil` becomes `O'Neil`.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            result.push(c);
            prev_is_letter = false;
        }
    }

    result
}

pub fn remove_release_groups(text: &str) -> String {
    RELEASE_GROUPS
        .iter()
        .fold(text.to_string(), |acc, group| acc.replace(group, ""))
}

/// Cut at the first marker (in list order) that occurs anywhere in `text`.
pub fn truncate_at_cutoff(text: &str, markers: &[&str]) -> String {
    for marker in markers {
        if let Some(index) = text.find(marker) {
            log::trace!("Cutoff marker '{}' found in '{}'", marker, text);
            return text[..index].trim_end_matches(&['.', ' '][..]).to_string();
        }
    }
    text.to_string()
}

/// Drop the last occurrence of `suffix` and everything after it, but only
/// when at most `tolerance` characters follow it.
pub fn remove_suffix_and_after(text: &str, suffix: &str, tolerance: usize) -> String {
    match text.rfind(suffix) {
        Some(index) if text[index + suffix.len()..].chars().count() <= tolerance => {
            text[..index].trim_end_matches(&['.', ' '][..]).to_string()
        }
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_name_with_release_group() {
        let name = normalize("Movie.Name.2020.1080p.BluRay.x264-YIFY");
        assert_eq!(name.cleaned_name, "MOVIE NAME");
        assert_eq!(name.year, Some(2020));
    }

    #[test]
    fn test_spaced_name_with_parenthesized_year() {
        let name = normalize("Movie Name (2020) 1080p BluRay x264 RARBG");
        assert_eq!(name.cleaned_name, "MOVIE NAME");
        assert_eq!(name.year, Some(2020));
    }

    #[test]
    fn test_cutoff_discards_audio_tail() {
        let name =
            normalize("The.Lord.of.the.Rings.2001.EXTENDED.1080p.BluRay.x264.DTS-HD.MA.5.1-RARBG");
        assert_eq!(name.cleaned_name, "THE LORD OF THE RINGS EXTENDED");
        assert_eq!(name.year, Some(2001));
    }

    #[test]
    fn test_bracketed_resolution_leaves_no_artifacts() {
        let name = normalize("Inception (2010) [1080p]");
        assert_eq!(name.cleaned_name, "INCEPTION");
        assert_eq!(name.year, Some(2010));
    }

    #[test]
    fn test_underscores_and_dashes_are_separators() {
        let name = normalize("Some_Movie-Title_2017_720p");
        assert_eq!(name.cleaned_name, "SOME MOVIE TITLE");
        assert_eq!(name.year, Some(2017));
    }

    #[test]
    fn test_leftover_brackets_do_not_fail() {
        let name = normalize("[]leftover()");
        assert_eq!(name.cleaned_name, "LEFTOVER");
        assert_eq!(name.year, None);
    }

    #[test]
    fn test_noise_only_name_is_empty() {
        let name = normalize("1080p.x264.BluRay");
        assert_eq!(name.cleaned_name, "");
        assert_eq!(name.year, None);
    }

    #[test]
    fn test_clean_title_is_idempotent() {
        let normalizer = Normalizer::default();
        for title in ["The Matrix", "Spirited Away", "Alien"] {
            let once = normalizer.clean_title(title);
            assert_eq!(once, title.to_uppercase());
            assert_eq!(normalizer.clean_title(&once), once);
        }
    }

    #[test]
    fn test_find_year_first_match_wins() {
        assert_eq!(find_year("2001.A.Space.Odyssey.1968"), Some(2001));
        assert_eq!(find_year("Heat (1995)"), Some(1995));
        assert_eq!(find_year("Movie_2019_1080p"), Some(2019));
    }

    #[test]
    fn test_find_year_rejects_non_years() {
        assert_eq!(find_year("Movie.1080p"), None);
        assert_eq!(find_year("Movie 1850"), None);
        assert_eq!(find_year("Movie 20201"), None);
        assert_eq!(find_year("x2020y"), None);
        assert_eq!(find_year("no year here"), None);
    }

    #[test]
    fn test_extract_title_strips_tags_and_years() {
        assert_eq!(extract_title("Heat.1995.720p.WEB-DL.AAC.2.0"), "Heat");
        assert_eq!(extract_title("some.movie.2160p.hdr.hevc"), "Some Movie");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("the 10bit o'neil"), "The 10Bit O'Neil");
        assert_eq!(title_case("ALREADY UPPER"), "Already Upper");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_remove_release_groups_is_substring_based() {
        assert_eq!(remove_release_groups("MOVIE YIFY"), "MOVIE ");
        assert_eq!(remove_release_groups("SHOW AMZN WEB"), "SHOW ");
        // Exact substring removal also bites inside words.
        assert_eq!(remove_release_groups("LONDON"), "LON");
    }

    #[test]
    fn test_truncate_at_cutoff_uses_priority_order() {
        // AAC comes before DTS in the list, so only AAC is applied.
        assert_eq!(truncate_at_cutoff("TITLE DTS X AAC Y", &["AAC", "DTS"]), "TITLE DTS X");
        assert_eq!(truncate_at_cutoff("TITLE. 1080P", CUTOFF_MARKERS), "TITLE");
        assert_eq!(truncate_at_cutoff("PLAIN TITLE", CUTOFF_MARKERS), "PLAIN TITLE");
    }

    #[test]
    fn test_remove_suffix_and_after_tolerance() {
        assert_eq!(remove_suffix_and_after("TITLE ()", "()", 5), "TITLE");
        assert_eq!(remove_suffix_and_after("TITLE (AB", "(", 5), "TITLE");
        // Too far from the end: untouched.
        assert_eq!(
            remove_suffix_and_after("TITLE (DIRECTORS CUT", "(", 5),
            "TITLE (DIRECTORS CUT"
        );
        assert_eq!(remove_suffix_and_after("TITLE", "(", 5), "TITLE");
    }

    #[test]
    fn test_custom_tolerance() {
        let strict = Normalizer::new(0);
        assert_eq!(strict.clean_title("Movie (Extended)"), "MOVIE (EXTENDED)");
        let loose = Normalizer::new(20);
        assert_eq!(loose.clean_title("Movie (Extended)"), "MOVIE");
    }
}
