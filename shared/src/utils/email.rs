//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address check: one '@', non-empty local part, dotted domain
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Normalize an email address for identity comparison (trimmed, lower case)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Mask an email address for display (e.g., admin@x.com -> a***n@x.com)
///
/// Only the first and last characters of the local part are kept; local
/// parts of two characters or fewer keep only their first character.
/// The domain is left as is.
pub fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return "***".to_string();
    };

    let chars: Vec<char> = local.chars().collect();
    let masked_local = match chars.len() {
        0 => "*".to_string(),
        1 | 2 => format!("{}*", chars[0]),
        n => format!(
            "{}{}{}",
            chars[0],
            "*".repeat(n - 2),
            chars[n - 1]
        ),
    };

    format!("{}@{}", masked_local, domain)
}
