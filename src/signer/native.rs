//! Native signer — in-memory secp256k1 keypair.
//!
//! Only available with the `native-signer` feature.

use std::future::{ready, Future};

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use crate::error::SignerError;
use crate::shared::serde_util::decode_hex32_exact;
use crate::shared::SignableHash;
use crate::signer::{address_from_verifying_key, HashSigner, RecoverableSignature};

/// A secp256k1 keypair held in process memory.
///
/// Signs raw hashes, which is what the registry's hash-then-sign protocol
/// requires. Do not feed it hashes from untrusted sources.
#[derive(Clone)]
pub struct LocalWallet {
    signing_key: SigningKey,
    address: String,
}

impl LocalWallet {
    /// Generate a fresh keypair from the OS RNG.
    pub fn random() -> Self {
        Self::from_signing_key(SigningKey::random(&mut OsRng))
    }

    pub fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = address_from_verifying_key(signing_key.verifying_key());
        Self {
            signing_key,
            address,
        }
    }

    /// Load a 32-byte private key given as hex (with or without `0x`).
    pub fn from_private_key_hex(private_key: &str) -> Result<Self, SignerError> {
        let bytes = decode_hex32_exact(private_key).map_err(SignerError::InvalidKey)?;
        let signing_key = SigningKey::from_slice(&bytes)
            .map_err(|e| SignerError::InvalidKey(e.to_string()))?;
        Ok(Self::from_signing_key(signing_key))
    }

    /// EIP-55 checksummed address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Sign a hash synchronously.
    pub fn sign(&self, hash: &SignableHash) -> Result<RecoverableSignature, SignerError> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(hash.as_bytes())
            .map_err(|e| SignerError::SigningFailed(e.to_string()))?;
        Ok(RecoverableSignature::from_parts(&signature, recovery_id))
    }
}

impl HashSigner for LocalWallet {
    fn address(&self) -> String {
        self.address.clone()
    }

    fn sign_hash(
        &self,
        hash: &SignableHash,
    ) -> impl Future<Output = Result<RecoverableSignature, SignerError>> + Send {
        ready(self.sign(hash))
    }
}

impl std::fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known development key (first Hardhat/Anvil account).
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_address_from_known_key() {
        let wallet = LocalWallet::from_private_key_hex(DEV_KEY).unwrap();
        assert_eq!(wallet.address(), DEV_ADDRESS);
    }

    #[test]
    fn test_invalid_private_key() {
        assert!(matches!(
            LocalWallet::from_private_key_hex("0x1234"),
            Err(SignerError::InvalidKey(_))
        ));
        assert!(matches!(
            LocalWallet::from_private_key_hex(&format!("0x{}", "00".repeat(32))),
            Err(SignerError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_signature_recovers_signer() {
        let wallet = LocalWallet::random();
        let hash = SignableHash::from_bytes([7u8; 32]);

        let signature = wallet.sign(&hash).unwrap();
        signature.validate().unwrap();
        assert_eq!(signature.recover_address(&hash).unwrap(), wallet.address());
    }

    #[test]
    fn test_signature_over_other_hash_recovers_someone_else() {
        let wallet = LocalWallet::random();
        let signature = wallet.sign(&SignableHash::from_bytes([1u8; 32])).unwrap();

        let other = SignableHash::from_bytes([2u8; 32]);
        let recovered = signature.recover_address(&other);
        assert!(recovered.map(|a| a != wallet.address()).unwrap_or(true));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let wallet = LocalWallet::from_private_key_hex(DEV_KEY).unwrap();
        let hash = SignableHash::from_bytes([9u8; 32]);
        assert_eq!(wallet.sign(&hash).unwrap(), wallet.sign(&hash).unwrap());
    }

    #[tokio::test]
    async fn test_hash_signer_impl() {
        let wallet = LocalWallet::random();
        let hash = SignableHash::from_bytes([3u8; 32]);

        let signature = HashSigner::sign_hash(&wallet, &hash).await.unwrap();
        assert_eq!(HashSigner::address(&wallet), wallet.address());
        assert_eq!(signature.recover_address(&hash).unwrap(), wallet.address());
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = LocalWallet::from_private_key_hex(DEV_KEY).unwrap();
        let debug = format!("{:?}", wallet);
        assert!(debug.contains(DEV_ADDRESS));
        assert!(!debug.contains("ac0974bec3"));
    }
}
