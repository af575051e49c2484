//! Tag editing on the caller side of [`PhotocardStore::update_tags`].
//!
//! The store replaces a card's tag list wholesale and trusts what it is given.
//! These helpers build the next list from user input so that it stays trimmed,
//! non-empty and duplicate-free.
//!
//! [`PhotocardStore::update_tags`]: crate::store::photocards::PhotocardStore::update_tags

/// Error type for rejected tag input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagInputError {
    /// Nothing left after trimming
    Empty,
}

impl std::fmt::Display for TagInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagInputError::Empty => write!(f, "tag cannot be empty"),
        }
    }
}

impl std::error::Error for TagInputError {}

/// Trim surrounding whitespace and a leading `#`.
///
/// ```
/// use blarchive::tags::normalize_tag;
///
/// assert_eq!(normalize_tag("  #Anton ").unwrap(), "Anton");
/// assert_eq!(normalize_tag("Member Card").unwrap(), "Member Card");
/// assert!(normalize_tag("  # ").is_err());
/// ```
pub fn normalize_tag(raw: &str) -> Result<String, TagInputError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return Err(TagInputError::Empty);
    }
    Ok(trimmed.to_string())
}

/// The list after adding `raw`, or `None` when the tag is already there.
pub fn with_tag(current: &[String], raw: &str) -> Result<Option<Vec<String>>, TagInputError> {
    let tag = normalize_tag(raw)?;
    if current.contains(&tag) {
        return Ok(None);
    }
    let mut next = current.to_vec();
    next.push(tag);
    Ok(Some(next))
}

/// The list after removing `raw`, or `None` when the tag was not there.
pub fn without_tag(current: &[String], raw: &str) -> Result<Option<Vec<String>>, TagInputError> {
    let tag = normalize_tag(raw)?;
    if !current.contains(&tag) {
        return Ok(None);
    }
    Ok(Some(current.iter().filter(|t| **t != tag).cloned().collect()))
}
