//! Stateless validation predicates shared by the registry and its clients.

use url::Url;

/// Minimum length of a short code.
pub const MIN_SHORTCODE_LENGTH: usize = 3;
/// Maximum length of a short code.
pub const MAX_SHORTCODE_LENGTH: usize = 16;

/// Returns `true` if `s` parses as an absolute URL with a scheme and a host.
pub fn is_valid_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| url.has_host())
}

/// Returns `true` if `s` matches `^[A-Za-z0-9]{3,16}$`.
pub fn is_valid_shortcode(s: &str) -> bool {
    (MIN_SHORTCODE_LENGTH..=MAX_SHORTCODE_LENGTH).contains(&s.len())
        && s.bytes().all(|b| b.is_ascii_alphanumeric())
}
