//! Wire codec for cached values.
//!
//! Deterministic bidirectional JSON mapping. Timestamps are serialized as
//! RFC 3339 (see the record definitions) so precision survives the round
//! trip, and absent optional fields round-trip as absent rather than as an
//! empty string or zero.

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::CacheError;

pub fn encode<T: Serialize>(value: &T) -> Result<Bytes, CacheError> {
    let encoded = serde_json::to_vec(value)?;
    Ok(Bytes::from(encoded))
}

pub fn decode<T: DeserializeOwned>(bytes: &Bytes) -> Result<T, CacheError> {
    Ok(serde_json::from_slice(bytes)?)
}
