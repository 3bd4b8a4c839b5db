//! Slug generation and small string transforms.
//!
//! Slugs are derived from human-readable fields (titles, names, course
//! numbers) and used as URL path segments. The rules match what the
//! editorial platform applies when an editor clicks "generate":
//!
//! 1. Lowercase the input (optional).
//! 2. Replace each run of whitespace with the separator.
//! 3. Strip every character outside `[A-Za-z0-9_-]`.
//! 4. Truncate to `max_length` characters.
//!
//! # Example
//!
//! ```rust
//! use folio_core::text::{compose_slug, slugify};
//!
//! assert_eq!(slugify("Algebraic Topology: An Intro"), "algebraic-topology-an-intro");
//! assert_eq!(compose_slug(&[Some("MATH 101"), Some("Calculus I")]), "math-101-calculus-i");
//! ```

/// Default slug length limit shared by every slug field.
pub const DEFAULT_SLUG_MAX_LENGTH: usize = 96;

/// Options for [`slugify_with`].
#[derive(Debug, Clone)]
pub struct SlugOptions {
    pub max_length: usize,
    pub separator: String,
    pub lowercase: bool,
}

impl Default for SlugOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_SLUG_MAX_LENGTH,
            separator: "-".to_string(),
            lowercase: true,
        }
    }
}

/// Slugify with the default options (96 chars, `-`, lowercase).
pub fn slugify(input: &str) -> String {
    slugify_with(input, &SlugOptions::default())
}

/// Slugify with explicit options.
///
/// The separator is inserted before the character filter runs, so a
/// separator outside `[A-Za-z0-9_-]` is stripped along with everything else.
pub fn slugify_with(input: &str, options: &SlugOptions) -> String {
    let source = if options.lowercase {
        input.to_lowercase()
    } else {
        input.to_string()
    };

    let mut substituted = String::with_capacity(source.len());
    let mut in_whitespace = false;
    for ch in source.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                substituted.push_str(&options.separator);
                in_whitespace = true;
            }
        } else {
            substituted.push(ch);
            in_whitespace = false;
        }
    }

    substituted
        .chars()
        .filter(|c| is_slug_char(*c))
        .take(options.max_length)
        .collect()
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Build a slug from several optional parts.
///
/// Absent and empty parts are dropped; the rest are joined with a single
/// space and passed through [`slugify`].
pub fn compose_slug(parts: &[Option<&str>]) -> String {
    let joined = parts
        .iter()
        .filter_map(|p| *p)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    slugify(&joined)
}

/// Truncate to at most `max_chars` characters, appending `...` when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slug() {
        assert_eq!(slugify("Number Theory"), "number-theory");
        assert_eq!(slugify("  Leading and trailing  "), "-leading-and-trailing-");
        assert_eq!(slugify("Ergodic   Theory\tand\nDynamics"), "ergodic-theory-and-dynamics");
    }

    #[test]
    fn test_strips_punctuation_and_non_ascii() {
        assert_eq!(slugify("Gödel's Theorem, Revisited!"), "gdels-theorem-revisited");
        assert_eq!(slugify("snake_case-kept"), "snake_case-kept");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Hello World",
            "  spaced   out  ",
            "Ünïcödé & symbols #1",
            "already-a-slug",
            "",
            "MATH 5210: Graduate Algebra",
        ];
        for input in inputs {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_max_length_and_charset() {
        let long = "word ".repeat(60);
        let slug = slugify(&long);
        assert_eq!(slug.chars().count(), DEFAULT_SLUG_MAX_LENGTH);
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
        assert!(!slug.contains(char::is_whitespace));
    }

    #[test]
    fn test_custom_options() {
        let opts = SlugOptions {
            max_length: 10,
            separator: "_".to_string(),
            lowercase: false,
        };
        assert_eq!(slugify_with("Knot Theory Basics", &opts), "Knot_Theor");

        let dotted = SlugOptions {
            separator: ".".to_string(),
            ..SlugOptions::default()
        };
        assert_eq!(slugify_with("a b", &dotted), "ab");
    }

    #[test]
    fn test_compose_slug() {
        assert_eq!(
            compose_slug(&[Some("MTH 5210"), Some("Real Analysis")]),
            "mth-5210-real-analysis"
        );
        assert_eq!(compose_slug(&[None, Some("Real Analysis")]), "real-analysis");
        assert_eq!(compose_slug(&[Some(""), Some("Topology")]), "topology");
        assert_eq!(compose_slug(&[None, None]), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 100), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ααααα", 2), "αα...");
        assert_eq!(truncate("exact", 5), "exact");
    }
}
