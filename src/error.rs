//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("WebSocket error: {0}")]
    Ws(#[from] WsError),

    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),

    /// The reply envelope is missing a field the operation needs, or a field
    /// has the wrong shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The registry service answered with `success: false`.
    #[error("Service error: {0}")]
    Service(String),

    #[error("Invalid DID: {0}")]
    InvalidDid(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SdkError {
    /// True when the operation was rejected because no connection is open.
    pub fn is_not_connected(&self) -> bool {
        matches!(self, SdkError::Ws(WsError::NotConnected))
    }
}

/// WebSocket errors.
#[derive(Error, Debug)]
pub enum WsError {
    #[error("Not connected")]
    NotConnected,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The channel reported an error while a reply was awaited.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A frame other than a text reply arrived where a reply was expected.
    #[error("Unexpected message: {0}")]
    UnexpectedMessage(String),

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Timeout")]
    Timeout,
}

/// Signing and signature-validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Signature is not in low-s form")]
    HighS,

    #[error("Invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    #[error("Public key recovery failed: {0}")]
    RecoveryFailed(String),

    #[error("Signature recovers to {recovered}, expected {expected}")]
    AddressMismatch { expected: String, recovered: String },
}

pub type SdkResult<T> = Result<T, SdkError>;
