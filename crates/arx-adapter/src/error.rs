use arx_types::ObjectType;
use thiserror::Error;

/// Errors from adapter encode/decode operations.
///
/// `Decode` is deliberately its own variant so callers can tell a corrupt
/// or version-incompatible payload apart from network and permission
/// failures.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The object could not be serialized into a payload.
    #[error("cannot serialize {object_type} object: {reason}")]
    Encode {
        object_type: ObjectType,
        reason: String,
    },

    /// The payload was retrieved but is incompatible with the adapter's
    /// expected shape.
    #[error("cannot decode {object_type} payload: {reason}")]
    Decode {
        object_type: ObjectType,
        reason: String,
    },

    /// The envelope's type tag does not match the adapter used to read it.
    #[error("type mismatch: adapter handles {expected}, envelope holds {actual}")]
    TypeMismatch {
        expected: ObjectType,
        actual: ObjectType,
    },
}

/// Result alias for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;
