//! Small string helpers shared across the workspace.

/// Turn a platform slug into a human-readable name: hyphens become
/// spaces and each word is title-cased ("neo-geo-pocket" → "Neo Geo
/// Pocket"). Used as the last resort when no provider names a platform.
pub fn humanize_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
