//! Signing — the credential capability, recoverable signatures, address recovery.
//!
//! ## Security Model
//!
//! - The registry service computes the [`SignableHash`] for a state change; the
//!   client never builds one itself.
//! - Signing happens in the caller's process through a [`HashSigner`]. Private
//!   key material never crosses the wire, only `{v, r, s}`.
//! - Signatures are checked for low-s form and a valid `v` before submission,
//!   so a malleable encoding is never sent.
//!
//! A ready-made in-memory secp256k1 signer lives in [`native`] (feature
//! `native-signer`). Hardware wallets, KMS backends etc. implement
//! [`HashSigner`] themselves.

#[cfg(feature = "native-signer")]
pub mod native;

use std::future::Future;

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::error::SignerError;
use crate::shared::serde_util::hex32_lenient;
use crate::shared::SignableHash;

/// Offset added to the recovery id to form Ethereum's legacy `v`.
pub const V_OFFSET: u8 = 27;

// ============================================================================
// HashSigner
// ============================================================================

/// A private-key-backed identity bound to one address, able to sign a raw
/// 32-byte hash.
///
/// Implementations must sign the hash as-is (no message prefix) and return a
/// recoverable signature whose recovered address equals [`address`](Self::address).
pub trait HashSigner {
    /// EIP-55 checksummed address of this credential.
    fn address(&self) -> String;

    /// Sign a service-issued hash.
    fn sign_hash(
        &self,
        hash: &SignableHash,
    ) -> impl Future<Output = Result<RecoverableSignature, SignerError>> + Send;
}

/// Sign `hash` with `signer` and check the result before it goes on the wire:
/// low-s, legacy `v`, and recovering to the signer's own address.
pub async fn sign_checked<S>(signer: &S, hash: &SignableHash) -> Result<RecoverableSignature, SignerError>
where
    S: HashSigner + Sync,
{
    let signature = signer.sign_hash(hash).await?;
    signature.validate()?;

    let expected = signer.address();
    let recovered = signature.recover_address(hash)?;
    if !same_address(&recovered, &expected) {
        return Err(SignerError::AddressMismatch {
            expected,
            recovered,
        });
    }
    Ok(signature)
}

// ============================================================================
// RecoverableSignature
// ============================================================================

/// Recoverable secp256k1 signature in the registry's wire shape:
/// `{"v": 27, "r": "0x…", "s": "0x…"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverableSignature {
    pub v: u8,
    #[serde(with = "hex32_lenient")]
    pub r: [u8; 32],
    #[serde(with = "hex32_lenient")]
    pub s: [u8; 32],
}

impl RecoverableSignature {
    /// Build from a `k256` signature and recovery id, normalising to low-s.
    pub fn from_parts(signature: &Signature, recovery_id: RecoveryId) -> Self {
        let (signature, recovery_id) = match signature.normalize_s() {
            // Negating s mirrors R, so the y-parity of the recovery id flips.
            Some(normalized) => (
                normalized,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (*signature, recovery_id),
        };

        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Self {
            v: recovery_id.to_byte() + V_OFFSET,
            r,
            s,
        }
    }

    /// Recovery id (0 or 1). Accepts both legacy (`27`/`28`) and raw (`0`/`1`) `v`.
    pub fn recovery_id(&self) -> Result<RecoveryId, SignerError> {
        let raw = match self.v {
            27 | 28 => self.v - V_OFFSET,
            0 | 1 => self.v,
            other => return Err(SignerError::InvalidRecoveryId(other)),
        };
        RecoveryId::from_byte(raw).ok_or(SignerError::InvalidRecoveryId(self.v))
    }

    /// Convert back into a `k256` signature.
    pub fn to_k256(&self) -> Result<Signature, SignerError> {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s);
        Signature::from_slice(&bytes).map_err(|e| SignerError::MalformedSignature(e.to_string()))
    }

    /// Check the signature is safe to submit: non-zero scalars, low-s, and a
    /// legacy `v` of 27 or 28.
    pub fn validate(&self) -> Result<(), SignerError> {
        if !matches!(self.v, 27 | 28) {
            return Err(SignerError::InvalidRecoveryId(self.v));
        }
        let signature = self.to_k256()?;
        if signature.normalize_s().is_some() {
            return Err(SignerError::HighS);
        }
        Ok(())
    }

    /// Recover the address that produced this signature over `hash`.
    pub fn recover_address(&self, hash: &SignableHash) -> Result<String, SignerError> {
        let signature = self.to_k256()?;
        let recovery_id = self.recovery_id()?;
        let key = VerifyingKey::recover_from_prehash(hash.as_bytes(), &signature, recovery_id)
            .map_err(|e| SignerError::RecoveryFailed(e.to_string()))?;
        Ok(address_from_verifying_key(&key))
    }
}

// ============================================================================
// Addresses
// ============================================================================

/// Ethereum address of a secp256k1 public key: the last 20 bytes of the
/// Keccak-256 of the uncompressed point (without the `0x04` tag), EIP-55 encoded.
pub fn address_from_verifying_key(key: &VerifyingKey) -> String {
    let point = PublicKey::from(*key).to_encoded_point(false);
    let digest = Keccak256::digest(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    checksum_encode(&address)
}

/// EIP-55 mixed-case encoding of a 20-byte address.
pub fn checksum_encode(address: &[u8; 20]) -> String {
    let lower = hex::encode(address);
    let digest = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (digest[i / 2] >> if i % 2 == 0 { 4 } else { 0 }) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Re-encode a hex address in EIP-55 form. Returns `None` if it is not a
/// 20-byte hex string.
pub fn to_checksum_address(address: &str) -> Option<String> {
    let digits = address.strip_prefix("0x").unwrap_or(address);
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes).ok()?;
    Some(checksum_encode(&bytes))
}

/// Compare two hex addresses ignoring checksum casing.
pub fn same_address(a: &str, b: &str) -> bool {
    match (to_checksum_address(a), to_checksum_address(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
