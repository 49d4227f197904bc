//! Wire types for attribute writes.

use serde::Serialize;

use crate::shared::Did;
use crate::signer::RecoverableSignature;

/// `createSetAttributeHash` args.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAttributeHashArgs<'a> {
    pub did: &'a Did,
    pub attr_name: &'a str,
    pub attr_value: &'a str,
    pub exp: u64,
}

/// `setAttributeSigned` args.
#[derive(Debug, Clone, Serialize)]
pub struct SetAttributeSignedArgs<'a> {
    #[serde(flatten)]
    pub attribute: SetAttributeHashArgs<'a>,
    pub signature: &'a RecoverableSignature,
}
