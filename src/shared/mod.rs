//! Shared newtypes used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the registry service sends, so they can be used directly in
//! wire types without conversion overhead.

pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::SdkError;

/// Network name the service assumes when a DID carries no chain segment.
pub const DEFAULT_NETWORK: &str = "mainnet";

// ─── Did ─────────────────────────────────────────────────────────────────────

/// An `ethr` decentralized identifier: `did:ethr:<chain>:<address>` or
/// `did:ethr:<address>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Did(String);

impl Did {
    pub const PREFIX: &'static str = "did:ethr:";

    /// Build `did:ethr:<network>:<address>`.
    pub fn new(network: &str, address: &str) -> Self {
        Self(format!("{}{}:{}", Self::PREFIX, network, address))
    }

    /// Parse and validate a DID string.
    pub fn parse(s: &str) -> Result<Self, SdkError> {
        let Some(rest) = s.strip_prefix(Self::PREFIX) else {
            return Err(SdkError::InvalidDid(format!("expected `{}` prefix: {}", Self::PREFIX, s)));
        };

        let segments: Vec<&str> = rest.split(':').collect();
        if segments.len() > 2 || segments.iter().any(|seg| seg.is_empty()) {
            return Err(SdkError::InvalidDid(s.to_string()));
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Chain segment, or [`DEFAULT_NETWORK`] when the DID has none.
    pub fn network(&self) -> &str {
        let rest = &self.0[Self::PREFIX.len()..];
        match rest.split_once(':') {
            Some((network, _)) => network,
            None => DEFAULT_NETWORK,
        }
    }

    /// Address (or public key) segment.
    pub fn address(&self) -> &str {
        let rest = &self.0[Self::PREFIX.len()..];
        match rest.rsplit_once(':') {
            Some((_, address)) => address,
            None => rest,
        }
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Did {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Did::parse(s)
    }
}

impl TryFrom<&str> for Did {
    type Error = SdkError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Did::parse(s)
    }
}

impl AsRef<str> for Did {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Did {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Did::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ─── SignableHash ────────────────────────────────────────────────────────────

/// A 32-byte digest issued by the service for one intended state change.
///
/// Travels as a `0x`-prefixed hex string. The client never computes one; it
/// only hands it to a [`HashSigner`](crate::signer::HashSigner).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignableHash([u8; 32]);

impl SignableHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn from_hex(s: &str) -> Result<Self, SdkError> {
        serde_util::decode_hex32_exact(s)
            .map(Self)
            .map_err(|e| SdkError::Protocol(format!("invalid signable hash: {}", e)))
    }
}

impl std::fmt::Debug for SignableHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SignableHash({})", self.to_hex())
    }
}

impl std::fmt::Display for SignableHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for SignableHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serde_util::hex32::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for SignableHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_util::hex32::deserialize(deserializer).map(Self)
    }
}
