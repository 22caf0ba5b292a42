/// Error type for canonical hashing validation.
///
/// Every variant carries the dotted path of the offending field, with
/// `[index]` segments for collection elements. Validation is performed
/// eagerly at the point a field would be encoded; the first failure aborts
/// the hashing call and no digest is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A field the current hashing mode requires was not set.
    #[error("missing required field: {field}")]
    MissingRequiredField {
        /// Path of the missing field.
        field: String,
    },

    /// A required buffer or collection was empty.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Path of the empty field.
        field: String,
    },

    /// A fixed-width field had the wrong length.
    #[error("{field} must be exactly {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Path of the offending field.
        field: String,
        /// Required length in bytes.
        expected: usize,
        /// Observed length in bytes.
        actual: usize,
    },

    /// A bounded field exceeded its maximum length.
    #[error("{field} cannot be longer than {max} bytes, got {actual}")]
    LengthExceeded {
        /// Path of the offending field.
        field: String,
        /// Maximum length in bytes.
        max: usize,
        /// Observed length in bytes.
        actual: usize,
    },

    /// The token transaction declared a version this engine does not hash.
    #[error("unsupported token transaction version: {version}")]
    UnsupportedVersion {
        /// The declared version number.
        version: u32,
    },
}
