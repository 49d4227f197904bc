//! Attribute domain — ethr-did attribute keys.
//!
//! The registry stores attributes as `(name, value, exp)` triples. The name
//! decides how the resolver renders the attribute in the DID document:
//!
//! | Name                               | Document member        |
//! |------------------------------------|------------------------|
//! | `did/svc/<ServiceType>`            | `service`              |
//! | `did/pub/<alg>/<purpose>/<enc>`    | `verificationMethod`   |
//!
//! `exp` is the validity in seconds; the service passes it to the registry
//! unchanged.

#[cfg(feature = "ws-native")]
pub mod client;
pub mod wire;

use std::fmt;

/// Default attribute validity used by ethr-did: one day.
pub const DEFAULT_VALIDITY_SECS: u64 = 86_400;

/// `did/svc/<kind>`, e.g. `did/svc/HubService`.
pub fn service(kind: &str) -> String {
    format!("did/svc/{}", kind)
}

/// `did/pub/<alg>/<purpose>/<enc>`, e.g. `did/pub/Secp256k1/veriKey/hex`.
pub fn public_key(algorithm: KeyAlgorithm, purpose: KeyPurpose, encoding: KeyEncoding) -> String {
    format!("did/pub/{}/{}/{}", algorithm, purpose, encoding)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Secp256k1,
    Ed25519,
    X25519,
}

impl KeyAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Secp256k1 => "Secp256k1",
            Self::Ed25519 => "Ed25519",
            Self::X25519 => "X25519",
        }
    }
}

/// Verification relationship a published key is added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPurpose {
    /// `assertionMethod`
    VeriKey,
    /// `authentication`
    SigAuth,
    /// `keyAgreement`
    Enc,
}

impl KeyPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeriKey => "veriKey",
            Self::SigAuth => "sigAuth",
            Self::Enc => "enc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoding {
    Hex,
    Base64,
    Base58,
}

impl KeyEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Base64 => "base64",
            Self::Base58 => "base58",
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for KeyPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for KeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
