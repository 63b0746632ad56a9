use thiserror::Error;
use url::Url;

/// Errors that can occur during URL validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL is empty after trimming.
    #[error("Empty URL")]
    Empty,
}

/// Strips the incidental whitespace backend authors leave around post URLs.
///
/// This is the only normalization applied to a URL before navigation.
pub fn clean_url(url: &str) -> &str {
    url.trim()
}

/// Validates a URL before it is fetched or handed to the system opener.
///
/// Only `http` and `https` URLs may leave the process. Everything else
/// (`file://`, `javascript:`, custom schemes) is refused, since the system
/// opener would otherwise hand them to arbitrary protocol handlers.
///
/// # Errors
///
/// Returns [`UrlValidationError`] if the string is empty, cannot be parsed,
/// or carries a non-HTTP(S) scheme.
pub fn validate_url(url_str: &str) -> Result<Url, UrlValidationError> {
    if url_str.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_url_trims_surrounding_whitespace() {
        assert_eq!(clean_url(" http://x/a "), "http://x/a");
        assert_eq!(clean_url("\thttp://x/a\n"), "http://x/a");
        assert_eq!(clean_url("http://x/a"), "http://x/a");
    }

    #[test]
    fn test_clean_url_preserves_interior_whitespace() {
        // Only surrounding whitespace is incidental; anything inside is the
        // backend's problem, not ours to rewrite.
        assert_eq!(clean_url(" http://x/a b "), "http://x/a b");
    }

    #[test]
    fn test_valid_urls() {
        assert!(validate_url("https://example.com/post/1").is_ok());
        assert!(validate_url("http://127.0.0.1:8000").is_ok());
    }

    #[test]
    fn test_invalid_schemes() {
        assert!(validate_url("file:///etc/passwd").is_err());
        assert!(validate_url("javascript:alert(1)").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_empty_url_rejected() {
        assert!(matches!(validate_url(""), Err(UrlValidationError::Empty)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(validate_url("not a url").is_err());
    }
}
