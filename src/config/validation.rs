//! Validation for hint key configuration

use crate::error::JumpError;

/// Check that `keys` can label targets and return them as characters
///
/// Keys must be non-empty, distinct and free of whitespace. A single key is
/// accepted (it can still label a lone target).
pub fn validate_hint_keys(keys: &str) -> Result<Vec<char>, JumpError> {
    let chars: Vec<char> = keys.chars().collect();
    if chars.is_empty() {
        return Err(JumpError::InvalidHintKeys("no hint keys configured".to_string()));
    }

    if let Some(c) = chars.iter().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(JumpError::InvalidHintKeys(format!(
            "'{}' cannot be used as a hint key",
            c.escape_default()
        )));
    }

    for (i, c) in chars.iter().enumerate() {
        if chars[..i].contains(c) {
            return Err(JumpError::InvalidHintKeys(format!("'{}' appears more than once", c)));
        }
    }

    Ok(chars)
}
