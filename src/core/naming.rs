//! Identifier validation shared by every named entity

use crate::core::error::{ConstructionError, EntityKind};
use regex::Regex;
use std::sync::OnceLock;

/// snake_case: lowercase letters and digits, single underscores between words,
/// no leading or trailing underscore.
const SNAKE_CASE_PATTERN: &str = r"^[a-z0-9]+(?:_[a-z0-9]+)*$";

fn snake_case() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(SNAKE_CASE_PATTERN).expect("snake_case pattern is valid"))
}

/// Check whether a name is a valid snake_case identifier
pub fn is_valid_name(name: &str) -> bool {
    snake_case().is_match(name)
}

/// Validate a name for the given kind of entity, returning it owned on success
pub fn validate_name(kind: EntityKind, name: impl Into<String>) -> Result<String, ConstructionError> {
    let name = name.into();
    if is_valid_name(&name) {
        Ok(name)
    } else {
        Err(ConstructionError::InvalidName { kind, name })
    }
}
