use thiserror::Error;

/// Failures while decoding one node body.
///
/// `Truncated` and `BadVarint` are stream-format errors: the byte stream itself
/// is unusable and the surrounding tile load should abort. `MissingDescription`
/// is a data-integrity error: the stream was well-formed but violates the
/// format contract (likely a corrupt or incompatible data file). Neither class
/// is retried here; recovery belongs to the tile-loading layer.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("node body truncated at byte {offset}")]
    Truncated { offset: usize },
    #[error("malformed variable-length integer at byte {offset}")]
    BadVarint { offset: usize },
    #[error("link from node ({ilon}, {ilat}) has no description and no counter-link flag")]
    MissingDescription { ilon: i32, ilat: i32 },
}

impl DecodeError {
    /// True for the data-integrity class, false for stream-format failures.
    pub fn is_data_integrity(&self) -> bool {
        matches!(self, DecodeError::MissingDescription { .. })
    }
}

/// Failures while encoding a node body.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("description block of {len} bytes exceeds the one-byte length prefix")]
    BlobTooLong { len: usize },
}
