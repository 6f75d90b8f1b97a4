use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Input validation utilities for blog-service

// Compile regex patterns once at startup
static SLUG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9_-]{1,64}$").expect("hardcoded slug regex is invalid - fix source code")
});

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.@+-]{1,150}$")
        .expect("hardcoded username regex is invalid - fix source code")
});

/// Validate a category slug (lowercase latin, digits, dash, underscore)
pub fn validate_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Validate a username path segment
pub fn validate_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// validator crate compatible wrapper for post titles
pub fn validate_post_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("empty_title"));
    }
    Ok(())
}

/// validator crate compatible wrapper for comment and post bodies
pub fn validate_body(body: &str) -> Result<(), ValidationError> {
    if body.trim().is_empty() {
        return Err(ValidationError::new("empty_body"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slugs() {
        assert!(validate_slug("travel"));
        assert!(validate_slug("city-life_2024"));
    }

    #[test]
    fn invalid_slugs() {
        assert!(!validate_slug(""));
        assert!(!validate_slug("With Spaces"));
        assert!(!validate_slug("UPPER"));
        assert!(!validate_slug("naïve"));
    }

    #[test]
    fn valid_usernames() {
        assert!(validate_username("alice"));
        assert!(validate_username("a.b+c@d-e_f"));
    }

    #[test]
    fn invalid_usernames() {
        assert!(!validate_username(""));
        assert!(!validate_username("has space"));
    }

    #[test]
    fn blank_bodies_rejected() {
        assert!(validate_body("  \n\t ").is_err());
        assert!(validate_body("hello").is_ok());
    }
}
