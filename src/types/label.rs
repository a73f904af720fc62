// ABOUTME: RFC 1123 label validation shared by workload and namespace names.
// ABOUTME: Kubernetes object names and namespaces both follow these rules.

use thiserror::Error;

/// Maximum length of an RFC 1123 label.
pub const MAX_LABEL_LEN: usize = 63;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("name cannot be empty")]
    Empty,

    #[error("name exceeds maximum length of 63 characters")]
    TooLong,

    #[error("name cannot start with a hyphen")]
    StartsWithHyphen,

    #[error("name cannot end with a hyphen")]
    EndsWithHyphen,

    #[error("name must be lowercase")]
    NotLowercase,

    #[error("invalid character in name: '{0}'")]
    InvalidChar(char),
}

pub(crate) fn validate_label(value: &str) -> Result<(), LabelError> {
    if value.is_empty() {
        return Err(LabelError::Empty);
    }

    if value.len() > MAX_LABEL_LEN {
        return Err(LabelError::TooLong);
    }

    if value.starts_with('-') {
        return Err(LabelError::StartsWithHyphen);
    }

    if value.ends_with('-') {
        return Err(LabelError::EndsWithHyphen);
    }

    for c in value.chars() {
        if c.is_ascii_uppercase() {
            return Err(LabelError::NotLowercase);
        }
        if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
            return Err(LabelError::InvalidChar(c));
        }
    }

    Ok(())
}
