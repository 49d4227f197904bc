//! Owners sub-client — controller lookup and signed ownership transfer.

use serde_json::Value;

use crate::client::EthrDidClient;
use crate::domain::document::wire::DidArgs;
use crate::domain::owner::parse_owner_address;
use crate::domain::owner::wire::{ChangeOwnerHashArgs, ChangeOwnerSignedArgs};
use crate::error::SdkError;
use crate::shared::{Did, SignableHash};
use crate::signer::{same_address, sign_checked, HashSigner, RecoverableSignature};
use crate::ws::Method;

pub struct Owners<'a> {
    pub(crate) client: &'a EthrDidClient,
}

impl<'a> Owners<'a> {
    /// Current controller address of `did`.
    pub async fn lookup_owner(&self, did: &Did) -> Result<String, SdkError> {
        self.client.call(Method::LookupOwner, DidArgs { did }).await
    }

    /// `true` when `address` currently controls `did`.
    pub async fn is_owner(&self, did: &Did, address: &str) -> Result<bool, SdkError> {
        let owner = self.lookup_owner(did).await?;
        Ok(same_address(&owner, address))
    }

    /// Hash the current owner must sign to hand `did` to `new_owner_address`.
    pub async fn create_change_owner_hash(
        &self,
        did: &Did,
        new_owner_address: &str,
    ) -> Result<SignableHash, SdkError> {
        self.client.ensure_connected().await?;
        parse_owner_address(new_owner_address)?;
        self.client
            .call(
                Method::CreateChangeOwnerHash,
                ChangeOwnerHashArgs {
                    did,
                    new_owner_address,
                },
            )
            .await
    }

    /// Submit an ownership change signed out of band.
    ///
    /// The signature is checked for low-s form and a legacy `v` before
    /// anything is sent. An unconnected client fails with `NotConnected`
    /// ahead of any argument error.
    pub async fn change_owner_signed(
        &self,
        did: &Did,
        new_owner_address: &str,
        signature: &RecoverableSignature,
    ) -> Result<Value, SdkError> {
        self.client.ensure_connected().await?;
        parse_owner_address(new_owner_address)?;
        signature.validate()?;

        let result = self
            .client
            .call(
                Method::ChangeOwnerSigned,
                ChangeOwnerSignedArgs {
                    change: ChangeOwnerHashArgs {
                        did,
                        new_owner_address,
                    },
                    signature,
                },
            )
            .await?;
        tracing::info!("Ownership of {} transferred to {}", did, new_owner_address);
        Ok(result)
    }

    /// Hash, sign with `current_owner`, and submit in one go.
    pub async fn change_owner<S>(
        &self,
        did: &Did,
        current_owner: &S,
        new_owner_address: &str,
    ) -> Result<Value, SdkError>
    where
        S: HashSigner + Sync,
    {
        let hash = self.create_change_owner_hash(did, new_owner_address).await?;
        let signature = sign_checked(current_owner, &hash).await?;
        self.change_owner_signed(did, new_owner_address, &signature).await
    }
}
