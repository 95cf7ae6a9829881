//! Error types for the local persistent cache store.

/// Errors that can occur in the persistent cache store.
///
/// The orchestrator treats any of these as a cache miss on the read path and
/// falls back to the network; on the write path they are logged and swallowed
/// so a successful remote fetch still reaches the caller. Only explicitly
/// store-directed operations (manual cache clears, pagination saves) surface
/// them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying storage facility is unavailable.
    ///
    /// Raised when the host has local storage disabled or store
    /// initialization previously failed. All operations on an unavailable
    /// store fail with this error; the application degrades to network-only
    /// mode for the session.
    #[error("Local storage is unavailable")]
    Unavailable,

    /// Storage I/O failed.
    ///
    /// Covers open/read/write/rename failures on the backing file. The path
    /// is included so permission problems are diagnosable from the message.
    #[error("Storage I/O failed at '{path}'")]
    Io {
        /// Path of the file the operation touched
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A cache record or the store file could not be (de)serialized.
    #[error("Failed to serialize cache data")]
    Serialization(#[from] serde_json::Error),

    /// The store file was written by a newer schema than this build knows.
    ///
    /// Older versions are migrated in place; newer ones are refused rather
    /// than partially interpreted.
    #[error("Unsupported store schema version {found} (this build supports up to {supported})")]
    SchemaVersion {
        /// Version found in the store file
        found: u32,
        /// Highest version this build can read
        supported: u32,
    },
}

impl StoreError {
    /// Helper to create an `Io` error with path context.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error means storage is gone for the session.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable)
    }
}
