//! Wire types for document lookups.

use serde::Serialize;

use crate::shared::Did;

/// `getDidByAddress` args.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DidByAddressArgs<'a> {
    pub address: &'a str,
    pub chain_name: &'a str,
}

/// Args for methods keyed by DID alone (`getDidDoc`, `lookupOwner`).
#[derive(Debug, Clone, Serialize)]
pub struct DidArgs<'a> {
    pub did: &'a Did,
}
