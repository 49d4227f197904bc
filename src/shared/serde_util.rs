//! Custom serde helpers for the registry wire format.

/// Decode a 32-byte value from hex, with or without a `0x` prefix.
///
/// Short values are left-padded: signature scalars are sometimes emitted as
/// plain numbers with leading zeros stripped.
pub fn decode_hex32(s: &str) -> Result<[u8; 32], String> {
    let digits = strip_0x(s);
    if digits.is_empty() || digits.len() > 64 {
        return Err(format!("expected 1..=64 hex digits, got {}", digits.len()));
    }
    let padded = format!("{:0>64}", digits);
    let mut out = [0u8; 32];
    hex::decode_to_slice(&padded, &mut out).map_err(|e| e.to_string())?;
    Ok(out)
}

/// Decode exactly 32 bytes (64 hex digits), with or without a `0x` prefix.
pub fn decode_hex32_exact(s: &str) -> Result<[u8; 32], String> {
    let digits = strip_0x(s);
    if digits.len() != 64 {
        return Err(format!("expected 64 hex digits, got {}", digits.len()));
    }
    let mut out = [0u8; 32];
    hex::decode_to_slice(digits, &mut out).map_err(|e| e.to_string())?;
    Ok(out)
}

fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

/// Deserializes a field that may be `null`, keeping `null` as `Some(Value::Null)`.
///
/// Pair with `#[serde(default)]` so an absent field stays `None`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    serde_json::Value::deserialize(deserializer).map(Some)
}

/// (De)serializes `[u8; 32]` as a `0x`-prefixed, zero-padded hex string.
/// Deserialization requires all 64 digits.
pub mod hex32 {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::decode_hex32_exact(&s).map_err(serde::de::Error::custom)
    }
}

/// Like [`hex32`], but accepts hex strings with leading zeros stripped.
pub mod hex32_lenient {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        super::hex32::serialize(bytes, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::decode_hex32(&s).map_err(serde::de::Error::custom)
    }
}
