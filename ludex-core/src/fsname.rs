//! Filesystem name parsing.
//!
//! Library files follow the common release naming convention:
//! ```text
//! Game Name (USA) (Rev A) (En,Fr,De) [b].ext
//! ```
//! This module splits the extension off and classifies the parenthesized
//! and bracketed tags into regions, languages, a revision, and free-form
//! tags, which the scanner stores on the game record and uses to derive
//! the tag-stripped name sent to name-based provider lookups.

/// Parsed components of a filesystem name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFsName {
    /// Base name without extension or any tags.
    pub no_tags: String,
    /// Name without the extension, tags included.
    pub no_ext: String,
    /// Extension without the leading dot, lowercase ("" when none).
    pub extension: String,
    /// Region strings in appearance order (e.g. "USA", "Japan").
    pub regions: Vec<String>,
    /// Language codes in appearance order (e.g. "En", "Fr").
    pub languages: Vec<String>,
    /// Revision tag if present (e.g. "Rev A").
    pub revision: Option<String>,
    /// Everything else that appeared in parentheses or brackets.
    pub tags: Vec<String>,
}

/// Parse a filesystem name into its components.
pub fn parse_fs_name(fs_name: &str) -> ParsedFsName {
    let (stem, extension) = split_extension(fs_name);
    let mut parsed = ParsedFsName {
        no_ext: stem.to_string(),
        extension: extension.to_string(),
        ..Default::default()
    };

    let (base, tags) = extract_tags(stem);
    parsed.no_tags = base;

    for tag in tags {
        classify_tag(&tag, &mut parsed);
    }

    parsed
}

/// Base name with the extension and all tags removed.
pub fn strip_tags(fs_name: &str) -> String {
    parse_fs_name(fs_name).no_tags
}

/// Split a filename into (stem, extension).
///
/// Only short alphanumeric suffixes count as extensions, so multi-disc
/// directory names like "Final Fantasy VII.m3u" split correctly while
/// "Super Mario Bros." keeps its trailing dot.
pub fn split_extension(fs_name: &str) -> (&str, &str) {
    match fs_name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && (1..=4).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            (stem, ext)
        }
        _ => (fs_name, ""),
    }
}

/// Split a stem into the base title and its tag contents, in order.
///
/// Tags are `(...)` and `[...]` groups; nesting within a group is kept
/// as-is. Anything before the first group is the base title.
fn extract_tags(stem: &str) -> (String, Vec<String>) {
    let mut tags = Vec::new();
    let mut title_end = None;
    let mut chars = stem.char_indices();

    while let Some((i, ch)) = chars.next() {
        let close = match ch {
            '(' => ')',
            '[' => ']',
            _ => continue,
        };
        let open = ch;

        if title_end.is_none() {
            title_end = Some(i);
        }

        let start = i + open.len_utf8();
        let mut end = start;
        let mut depth = 1u32;
        for (j, c) in chars.by_ref() {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    end = j;
                    break;
                }
            }
        }

        let content = stem[start..end].trim();
        if !content.is_empty() {
            tags.push(content.to_string());
        }
    }

    let title = match title_end {
        Some(pos) => stem[..pos].trim().to_string(),
        None => stem.trim().to_string(),
    };

    (title, tags)
}

/// Region strings recognized in release names.
const KNOWN_REGIONS: &[&str] = &[
    "USA",
    "Japan",
    "Europe",
    "World",
    "Australia",
    "Korea",
    "China",
    "Taiwan",
    "Brazil",
    "France",
    "Germany",
    "Spain",
    "Italy",
    "Netherlands",
    "Sweden",
    "Norway",
    "Denmark",
    "Finland",
    "Portugal",
    "Russia",
    "Hong Kong",
    "Asia",
    "Canada",
    "United Kingdom",
    "Scandinavia",
    "Latin America",
];

fn is_region_list(s: &str) -> bool {
    s.split(',').all(|part| {
        let trimmed = part.trim();
        KNOWN_REGIONS.iter().any(|r| r.eq_ignore_ascii_case(trimmed))
    })
}

/// Check if a string looks like a language list: at least two
/// comma-separated 2-3 letter codes, capitalized (single codes are
/// ambiguous with flags like "Demo").
fn is_language_list(s: &str) -> bool {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() < 2 {
        return false;
    }
    parts.iter().all(|p| {
        let t = p.trim();
        (2..=3).contains(&t.len())
            && t.chars().next().is_some_and(|c| c.is_ascii_uppercase())
            && t.chars().skip(1).all(|c| c.is_ascii_lowercase())
    })
}

fn classify_tag(content: &str, parsed: &mut ParsedFsName) {
    if is_region_list(content) {
        for part in content.split(',') {
            let region = part.trim().to_string();
            if !parsed.regions.contains(&region) {
                parsed.regions.push(region);
            }
        }
        return;
    }

    if let Some(rev) = content.strip_prefix("Rev ") {
        parsed.revision = Some(format!("Rev {rev}"));
        return;
    }

    if is_language_list(content) {
        for lang in content.split(',') {
            parsed.languages.push(lang.trim().to_string());
        }
        return;
    }

    parsed.tags.push(content.to_string());
}
