use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_\s-]").unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_-]+").unwrap());

/// Derive a URL-safe slug from a display name.
///
/// Lowercases and trims the name, drops every character that is not an ASCII
/// word character, whitespace or hyphen, collapses runs of whitespace,
/// underscores and hyphens into a single hyphen, and strips hyphens from both
/// ends. The result may be empty when the name has no ASCII word characters.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let kept = DISALLOWED.replace_all(lowered.trim(), "");
    let joined = SEPARATORS.replace_all(&kept, "-");
    joined.trim_matches('-').to_string()
}
