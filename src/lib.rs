//! # ethr-did-client
//!
//! Async Rust client for a `did:ethr` registry service reached over a
//! WebSocket. The service does the ledger work; this crate derives and
//! resolves DIDs, and authorises ownership changes and attribute writes by
//! signing service-issued hashes locally.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — `Did`, `SignableHash`, DID documents, errors (always available)
//! 2. **Signing** — `HashSigner` trait, recoverable signatures, `LocalWallet`
//! 3. **RPC wire** — `{method, args}` requests and `{success, result, error}` replies
//! 4. **WebSocket** — `tokio-tungstenite` transport (`ws-native`)
//! 5. **High-Level Client** — `EthrDidClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ethr_did_client::prelude::*;
//!
//! let client = EthrDidClient::new("ws://localhost", 8080);
//! client.connect().await?;
//!
//! let wallet = LocalWallet::random();
//! let did = client.documents().get_did_by_address(wallet.address(), "polygon").await?;
//! let doc = client.documents().get_did_doc(&did).await?;
//!
//! client
//!     .attributes()
//!     .set_attribute(&wallet, &did, &service("HubService"), "https://hubs.uport.me", 86_400)
//!     .await?;
//!
//! client.disconnect().await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, sub-clients.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Default endpoint constants.
pub mod network;

// ── Layer 2: Signing ─────────────────────────────────────────────────────────

/// Hash signing and signature recovery.
pub mod signer;

// ── Layer 3/4: RPC wire + WebSocket ──────────────────────────────────────────

/// Request/response envelopes and the WebSocket transport.
pub mod ws;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `EthrDidClient` — the primary entry point.
#[cfg(feature = "ws-native")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Did, SignableHash};

    // Domain types
    pub use crate::domain::attribute::{
        public_key, service, KeyAlgorithm, KeyEncoding, KeyPurpose, DEFAULT_VALIDITY_SECS,
    };
    pub use crate::domain::document::{DidDocument, DidResolution, Service, VerificationMethod};

    // Errors
    pub use crate::error::{SdkError, SdkResult, SignerError, WsError};

    // Network
    pub use crate::network::{DEFAULT_HOST, DEFAULT_PORT};

    // Signing
    pub use crate::signer::{HashSigner, RecoverableSignature};

    #[cfg(feature = "native-signer")]
    pub use crate::signer::native::LocalWallet;

    // RPC wire
    pub use crate::ws::{ConnectionState, Method, RpcRequest, RpcResponse, WsConfig};

    // Client + sub-clients
    #[cfg(feature = "ws-native")]
    pub use crate::client::{
        AttributesClient, DocumentsClient, EthrDidClient, EthrDidClientBuilder, OwnersClient,
    };
}
