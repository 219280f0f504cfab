//! URL slug generation.

/// Slug used when the input has no usable characters.
pub const FALLBACK_SLUG: &str = "post";

/// Convert text to a URL-safe slug.
///
/// Lower-cases the text, drops everything except ASCII letters, digits,
/// whitespace and hyphens, turns each whitespace run into one hyphen and trims
/// hyphens from both ends. Dropped characters do not break a whitespace run.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.to_lowercase().chars() {
        if is_separator(c) {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }

        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
            in_whitespace = false;
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Unicode whitespace plus the ASCII file, group, record and unit separators
/// (U+001C to U+001F), which `char::is_whitespace` leaves out.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Whether `text` is already a slug `slugify` could have produced.
pub fn is_valid_slug(text: &str) -> bool {
    !text.is_empty()
        && !text.starts_with('-')
        && !text.ends_with('-')
        && text
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
