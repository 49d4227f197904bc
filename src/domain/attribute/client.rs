//! Attributes sub-client — signed attribute writes.

use serde_json::Value;

use crate::client::EthrDidClient;
use crate::domain::attribute::wire::{SetAttributeHashArgs, SetAttributeSignedArgs};
use crate::error::SdkError;
use crate::shared::{Did, SignableHash};
use crate::signer::{sign_checked, HashSigner, RecoverableSignature};
use crate::ws::Method;

pub struct Attributes<'a> {
    pub(crate) client: &'a EthrDidClient,
}

impl<'a> Attributes<'a> {
    /// Hash the owner must sign to set `attr_name = attr_value` for `exp` seconds.
    pub async fn create_set_attribute_hash(
        &self,
        did: &Did,
        attr_name: &str,
        attr_value: &str,
        exp: u64,
    ) -> Result<SignableHash, SdkError> {
        self.client
            .call(
                Method::CreateSetAttributeHash,
                SetAttributeHashArgs {
                    did,
                    attr_name,
                    attr_value,
                    exp,
                },
            )
            .await
    }

    /// Submit an attribute write signed out of band.
    pub async fn set_attribute_signed(
        &self,
        did: &Did,
        attr_name: &str,
        attr_value: &str,
        exp: u64,
        signature: &RecoverableSignature,
    ) -> Result<Value, SdkError> {
        self.client.ensure_connected().await?;
        signature.validate()?;

        let result = self
            .client
            .call(
                Method::SetAttributeSigned,
                SetAttributeSignedArgs {
                    attribute: SetAttributeHashArgs {
                        did,
                        attr_name,
                        attr_value,
                        exp,
                    },
                    signature,
                },
            )
            .await?;
        tracing::info!("Attribute {} set on {} (exp {}s)", attr_name, did, exp);
        Ok(result)
    }

    /// Hash, sign with `owner`, and submit in one go.
    pub async fn set_attribute<S>(
        &self,
        owner: &S,
        did: &Did,
        attr_name: &str,
        attr_value: &str,
        exp: u64,
    ) -> Result<Value, SdkError>
    where
        S: HashSigner + Sync,
    {
        let hash = self
            .create_set_attribute_hash(did, attr_name, attr_value, exp)
            .await?;
        let signature = sign_checked(owner, &hash).await?;
        self.set_attribute_signed(did, attr_name, attr_value, exp, &signature)
            .await
    }
}
