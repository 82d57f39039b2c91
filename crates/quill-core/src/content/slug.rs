//! URL slugs for posts.

use crate::error::DomainError;

/// Longest slug accepted, matching the storage column.
pub const MAX_SLUG_LEN: usize = 250;

/// Derive a slug from a title: lowercase ASCII words joined by `-`.
pub fn slugify(title: &str) -> String {
    let slug = slug::slugify(title);
    match slug.char_indices().nth(MAX_SLUG_LEN) {
        Some((cut, _)) => slug[..cut].trim_end_matches('-').to_string(),
        None => slug,
    }
}

/// Check an explicitly supplied slug.
pub fn validate_slug(slug: &str) -> Result<(), DomainError> {
    if slug.is_empty() {
        return Err(DomainError::Validation("slug must not be empty".to_string()));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(DomainError::Validation(format!(
            "slug must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(DomainError::Validation(
            "slug may only contain lowercase letters, digits and '-'".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_title() {
        assert_eq!(
            slugify("Getting Started with Django REST Framework"),
            "getting-started-with-django-rest-framework"
        );
    }

    #[test]
    fn test_slugify_punctuation_and_accents() {
        assert_eq!(slugify("  Café: CI/CD, Done!  "), "cafe-ci-cd-done");
    }

    #[test]
    fn test_slugify_truncates() {
        let title = "word ".repeat(100);
        let slug = slugify(&title);
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
        assert!(validate_slug(&slug).is_ok());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("hello-world-2").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Hello").is_err());
        assert!(validate_slug("with space").is_err());
        assert!(validate_slug("slug<>brackets").is_err());
        assert!(validate_slug(&"a".repeat(MAX_SLUG_LEN + 1)).is_err());
    }
}
