//! Documents sub-client — DID derivation and resolution.

use crate::client::EthrDidClient;
use crate::domain::document::wire::{DidArgs, DidByAddressArgs};
use crate::domain::document::{DidDocument, DidResolution};
use crate::error::SdkError;
use crate::shared::Did;
use crate::ws::Method;

/// Sub-client for read-only document operations.
pub struct Documents<'a> {
    pub(crate) client: &'a EthrDidClient,
}

impl<'a> Documents<'a> {
    /// The DID the registry derives for `address` on `chain_name`
    /// (`did:ethr:<chain_name>:<address>`).
    pub async fn get_did_by_address(&self, address: &str, chain_name: &str) -> Result<Did, SdkError> {
        self.client
            .call(Method::GetDidByAddress, DidByAddressArgs { address, chain_name })
            .await
    }

    /// Full resolver output: metadata plus document.
    pub async fn resolve(&self, did: &Did) -> Result<DidResolution, SdkError> {
        self.client.call(Method::GetDidDoc, DidArgs { did }).await
    }

    /// The DID document (`result.didDocument`).
    pub async fn get_did_doc(&self, did: &Did) -> Result<DidDocument, SdkError> {
        let resolution = self.resolve(did).await?;
        let error = resolution.error().map(str::to_string);
        resolution.did_document.ok_or_else(|| {
            SdkError::Protocol(match error {
                Some(code) => format!("no didDocument for {} (resolver error: {})", did, code),
                None => format!("no didDocument for {}", did),
            })
        })
    }
}
