//! URL slug derivation.

use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s_-]").expect("valid slug pattern"));
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s_-]+").expect("valid separator pattern"));

/// Derive a URL-safe slug from a title.
///
/// Transliterates to ASCII (so `ß` becomes `ss` and `ø` becomes `o`),
/// lowercases, drops anything outside `[a-z0-9]` and separators, turns
/// separator runs into a single `-` and trims dashes from both ends.
pub fn slugify(title: &str) -> String {
    let ascii = deunicode(title).to_lowercase();
    let cleaned = DISALLOWED.replace_all(&ascii, "");
    let dashed = SEPARATORS.replace_all(&cleaned, "-");
    dashed.trim_matches('-').to_string()
}
