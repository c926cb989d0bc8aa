//! Input validation limits for resource protection

/// Maximum length for item ids (256 chars)
pub const MAX_ITEM_ID_LEN: usize = 256;

/// Maximum length for a link type label (64 chars)
pub const MAX_LINK_TYPE_LEN: usize = 64;

/// Maximum value accepted for a traversal path-length bound (10000)
pub const MAX_TRAVERSE_PATH_LENGTH: usize = 10_000;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyItemId,
    ItemIdTooLong { len: usize, max: usize },
    EmptyLinkType,
    LinkTypeTooLong { len: usize, max: usize },
    PathLengthTooLarge { len: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyItemId => write!(f, "Item id cannot be empty"),
            Self::ItemIdTooLong { len, max } => {
                write!(f, "Item id too long: {} chars (max {})", len, max)
            }
            Self::EmptyLinkType => write!(f, "Link type cannot be empty"),
            Self::LinkTypeTooLong { len, max } => {
                write!(f, "Link type too long: {} chars (max {})", len, max)
            }
            Self::PathLengthTooLarge { len, max } => {
                write!(f, "Path length bound too large: {} (max {})", len, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate item id
pub fn validate_item_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyItemId);
    }
    if id.len() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::ItemIdTooLong {
            len: id.len(),
            max: MAX_ITEM_ID_LEN,
        });
    }
    Ok(())
}

/// Validate link type label
pub fn validate_link_type(link_type: &str) -> Result<(), ValidationError> {
    if link_type.is_empty() {
        return Err(ValidationError::EmptyLinkType);
    }
    if link_type.len() > MAX_LINK_TYPE_LEN {
        return Err(ValidationError::LinkTypeTooLong {
            len: link_type.len(),
            max: MAX_LINK_TYPE_LEN,
        });
    }
    Ok(())
}

/// Validate traversal path-length bound
pub fn validate_path_length(len: usize) -> Result<(), ValidationError> {
    if len > MAX_TRAVERSE_PATH_LENGTH {
        return Err(ValidationError::PathLengthTooLarge {
            len,
            max: MAX_TRAVERSE_PATH_LENGTH,
        });
    }
    Ok(())
}
