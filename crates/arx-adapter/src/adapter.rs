use std::marker::PhantomData;

use arx_types::ObjectType;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AdapterError, AdapterResult};

/// Per-object-type capability set: serialize, deserialize, type tag.
///
/// The registry dispatches every payload operation through this trait and
/// never inspects concrete artifact kinds. Implementations must be pure:
/// serializing an object and deserializing the result yields an equivalent
/// object.
pub trait ObjectAdapter: Send + Sync {
    /// The in-memory artifact type this adapter handles.
    type Object;

    /// The envelope type tag this adapter produces and accepts.
    fn type_tag(&self) -> ObjectType;

    /// Encode an object into an opaque payload.
    fn serialize(&self, object: &Self::Object) -> AdapterResult<Vec<u8>>;

    /// Decode a payload back into an object.
    ///
    /// Fails with [`AdapterError::Decode`] when the payload is corrupt or
    /// shaped for an incompatible version of the artifact type.
    fn deserialize(&self, payload: &[u8]) -> AdapterResult<Self::Object>;
}

/// JSON adapter for any serde-capable artifact type.
///
/// Payloads are canonical JSON. This is the encoding every built-in
/// artifact kind uses; bespoke adapters only exist for kinds with non-JSON
/// native formats.
pub struct JsonAdapter<T> {
    type_tag: ObjectType,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonAdapter<T> {
    /// Create a JSON adapter producing envelopes tagged `type_tag`.
    pub fn new(type_tag: ObjectType) -> Self {
        Self {
            type_tag,
            _marker: PhantomData,
        }
    }
}

impl<T> ObjectAdapter for JsonAdapter<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    type Object = T;

    fn type_tag(&self) -> ObjectType {
        self.type_tag
    }

    fn serialize(&self, object: &T) -> AdapterResult<Vec<u8>> {
        serde_json::to_vec(object).map_err(|e| AdapterError::Encode {
            object_type: self.type_tag,
            reason: e.to_string(),
        })
    }

    fn deserialize(&self, payload: &[u8]) -> AdapterResult<T> {
        serde_json::from_slice(payload).map_err(|e| AdapterError::Decode {
            object_type: self.type_tag,
            reason: e.to_string(),
        })
    }
}
