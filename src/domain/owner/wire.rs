//! Wire types for ownership transfer.

use serde::Serialize;

use crate::shared::Did;
use crate::signer::RecoverableSignature;

/// `createChangeOwnerHash` args.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeOwnerHashArgs<'a> {
    pub did: &'a Did,
    pub new_owner_address: &'a str,
}

/// `changeOwnerSigned` args: the hash inputs plus the owner's signature.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeOwnerSignedArgs<'a> {
    #[serde(flatten)]
    pub change: ChangeOwnerHashArgs<'a>,
    pub signature: &'a RecoverableSignature,
}
