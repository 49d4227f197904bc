//! Document domain — DID documents and resolution results.

#[cfg(feature = "ws-native")]
pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::Did;

/// A DID document as produced by the `ethr` resolver.
///
/// The five core members are required; a document missing any of them is
/// rejected at decode time. Members this type does not model are kept in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    #[serde(rename = "@context")]
    pub context: Value,
    pub id: Did,
    pub verification_method: Vec<VerificationMethod>,
    pub authentication: Vec<Value>,
    pub assertion_method: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<Vec<Service>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DidDocument {
    pub fn services(&self) -> &[Service] {
        self.service.as_deref().unwrap_or_default()
    }

    /// First service whose `type` equals `kind`, e.g. `"HubService"`.
    pub fn service_of_type(&self, kind: &str) -> Option<&Service> {
        self.services().iter().find(|s| s.kind == kind)
    }

    pub fn verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_method.iter().find(|vm| vm.id == id)
    }

    /// Ids referenced from `authentication`, whether by string or embedded method.
    pub fn authentication_ids(&self) -> Vec<&str> {
        relationship_ids(&self.authentication)
    }

    pub fn assertion_method_ids(&self) -> Vec<&str> {
        relationship_ids(&self.assertion_method)
    }
}

fn relationship_ids(entries: &[Value]) -> Vec<&str> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(id) => Some(id.as_str()),
            Value::Object(obj) => obj.get("id").and_then(Value::as_str),
            _ => None,
        })
        .collect()
}

/// A verification method entry (`EcdsaSecp256k1RecoveryMethod2020`, …).
///
/// Key material (`blockchainAccountId`, `publicKeyHex`, …) stays in `material`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub controller: String,
    #[serde(flatten)]
    pub material: Map<String, Value>,
}

impl VerificationMethod {
    /// `blockchainAccountId`, e.g. `eip155:137:0xf14B…`.
    pub fn blockchain_account_id(&self) -> Option<&str> {
        self.material.get("blockchainAccountId").and_then(Value::as_str)
    }
}

/// A service endpoint entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub service_endpoint: Value,
}

/// Full resolver output returned by `getDidDoc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidResolution {
    #[serde(default)]
    pub did_resolution_metadata: Map<String, Value>,
    #[serde(default)]
    pub did_document: Option<DidDocument>,
    #[serde(default)]
    pub did_document_metadata: Map<String, Value>,
}

impl DidResolution {
    /// Resolver error code (`notFound`, `invalidDid`, …), if any.
    pub fn error(&self) -> Option<&str> {
        self.did_resolution_metadata.get("error").and_then(Value::as_str)
    }

    /// `true` when the document has been deactivated on the registry.
    pub fn is_deactivated(&self) -> bool {
        self.did_document_metadata
            .get("deactivated")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}
