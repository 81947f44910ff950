use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{Issue, ValidationResult};

static SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/\\]").unwrap());

static RESERVED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.{1,2}$").unwrap());

/// Check a rendered file name (extension not yet attached) before it reaches the filesystem.
pub fn validate_rendered_name(name: &str) -> ValidationResult {
    let mut issues = Vec::new();

    if name.trim().is_empty() {
        issues.push(Issue::Empty);
    } else {
        if SEPARATOR_RE.is_match(name) {
            issues.push(Issue::PathSeparator);
        }
        if name.contains('\0') {
            issues.push(Issue::NulByte);
        }
        if RESERVED_RE.is_match(name) {
            issues.push(Issue::Reserved);
        }
    }

    ValidationResult { valid: issues.is_empty(), issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_rendered_name_valid(name: &str) -> bool {
        validate_rendered_name(name).valid
    }

    #[test]
    fn valid_examples() {
        assert!(is_rendered_name_valid("Show Name - S01E02 - Episode Title (GROUP)"));
        assert!(is_rendered_name_valid("Movie Title (2020) (x264-GROUP)"));
        assert!(is_rendered_name_valid("..."));
    }

    #[test]
    fn invalid_examples() {
        assert_eq!(validate_rendered_name("").issues, vec![Issue::Empty]);
        assert_eq!(validate_rendered_name(" \t ").issues, vec![Issue::Empty]);
        assert_eq!(validate_rendered_name("..").issues, vec![Issue::Reserved]);

        let r = validate_rendered_name("AC/DC Live\0");
        assert!(!r.valid);
        assert!(r.issues.contains(&Issue::PathSeparator));
        assert!(r.issues.contains(&Issue::NulByte));
        assert!(!r.issues.contains(&Issue::Empty));

        assert!(!is_rendered_name_valid(r"dir\name"));
    }
}
