use crate::error::Result;

/// Durable string-keyed storage that the stores synchronize to.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// the stores handle the "what" (collections, seeding, validation).
/// Methods take `&self` so one backend can be shared by both stores.
pub trait PersistenceAdapter {
    /// Read the blob stored under `key`.
    /// Returns Ok(None) if nothing was ever stored there.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    /// MUST be atomic from the caller's perspective: a reader sees either the
    /// previous value or the new one, never a partial write.
    fn save(&self, key: &str, blob: &str) -> Result<()>;
}
