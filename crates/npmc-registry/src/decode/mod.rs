//! JSON decoding of registry responses

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use npmc_core::error::NpmcError;
use crate::RegistryResult;

/// Decode a response body into `T`.
///
/// Malformed JSON fails with [`NpmcError::Decode`]; no partially filled record
/// is ever returned. Keys `T` does not know about are ignored (or collected by
/// records that carry an `other` map).
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> RegistryResult<T> {
    tracing::trace!(
        target_type = std::any::type_name::<T>(),
        len = bytes.len(),
        "decoding registry response"
    );
    serde_json::from_slice(bytes).map_err(NpmcError::decode)
}

/// Like [`decode`], but an empty or whitespace-only body yields `T::default()`.
///
/// Some registries answer lookups of unknown packages with `200 OK` and no
/// body at all.
pub fn decode_or_default<T: DeserializeOwned + Default>(bytes: &[u8]) -> RegistryResult<T> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    decode(bytes)
}

/// Deserialize a value whose `null` means "use the default".
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a non-negative counter that may arrive as a number, as a
/// CouchDB sequence string (`"1234-g1AAAA..."`) or as `null`.
///
/// Strings contribute their leading digits; anything unparseable is zero.
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let digits: String = s.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    })
}
