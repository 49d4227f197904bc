//! In-process registry service for integration tests.
//!
//! Speaks the same `{method, args}` / `{success, result | error}` protocol
//! as the real service, keeps owners and attributes in memory, and checks
//! signatures by recovering the signer from the issued hash. A few extra
//! methods make it misbehave on purpose:
//!
//! - `closeMe`   → close frame instead of a reply
//! - `binaryMe`  → binary frame instead of a reply
//! - `silent`    → no reply at all
//! - `pingFirst` → ping frame, then a normal reply
//! - `noResult`  → `{"success": true}` without `result`
//! - `delayed`   → a normal reply, 300 ms late
//! - `dropMe`    → TCP connection dropped without a close handshake
//! - `garbageFrame` → bytes that are not a valid WebSocket frame

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use sha3::{Digest, Keccak256};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use ethr_did_client::shared::SignableHash;
use ethr_did_client::signer::{same_address, to_checksum_address, RecoverableSignature};

const CONTEXT: [&str; 2] = [
    "https://www.w3.org/ns/did/v1",
    "https://w3id.org/security/suites/secp256k1recovery-2020/v2",
];

/// Handle to a running mock registry.
#[derive(Clone)]
pub struct MockRegistry {
    pub url: String,
    state: Arc<Mutex<Registry>>,
    requests: Arc<AtomicUsize>,
    calls: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockRegistry {
    /// Bind to an ephemeral port and serve connections in the background.
    pub async fn spawn() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let registry = Self {
            url: format!("ws://{}", addr),
            state: Arc::new(Mutex::new(Registry::default())),
            requests: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(HashMap::new())),
        };

        let server = registry.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(server.clone().serve(stream));
            }
        });
        registry
    }

    /// Number of requests received across all connections.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Number of `method` requests received across all connections.
    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().unwrap().get(method).copied().unwrap_or(0)
    }

    async fn serve(self, stream: TcpStream) {
        let Ok(mut ws) = accept_async(stream).await else {
            return;
        };

        while let Some(Ok(message)) = ws.next().await {
            let Message::Text(text) = message else {
                continue;
            };
            self.requests.fetch_add(1, Ordering::SeqCst);

            let request: Value = serde_json::from_str(text.as_str()).unwrap_or_default();
            let method = request["method"].as_str().unwrap_or_default().to_string();
            let args = request["args"].clone();
            *self.calls.lock().unwrap().entry(method.clone()).or_default() += 1;

            let reply = match method.as_str() {
                "closeMe" => {
                    // Keep reading so the client's close reply is acknowledged.
                    let _ = ws.close(None).await;
                    continue;
                }
                "binaryMe" => {
                    let _ = ws.send(Message::Binary(vec![1u8, 2, 3].into())).await;
                    continue;
                }
                "silent" => continue,
                "pingFirst" => {
                    let _ = ws.send(Message::Ping(vec![7u8].into())).await;
                    json!({ "success": true, "result": "pong" })
                }
                "noResult" => json!({ "success": true }),
                "delayed" => {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                    json!({ "success": true, "result": "delayed" })
                }
                "dropMe" => return,
                "garbageFrame" => {
                    // FIN with reserved opcode 0xF.
                    let _ = ws.get_mut().write_all(&[0x8f, 0x00]).await;
                    let _ = ws.get_mut().flush().await;
                    continue;
                }
                _ => {
                    let outcome = self.state.lock().unwrap().dispatch(&method, &args);
                    match outcome {
                        Ok(result) => json!({ "success": true, "result": result }),
                        Err(error) => json!({ "success": false, "error": error }),
                    }
                }
            };

            if ws.send(Message::Text(reply.to_string().into())).await.is_err() {
                return;
            }
        }
    }
}

#[derive(Default)]
struct Registry {
    /// DID → owner address, for DIDs whose owner changed.
    owners: HashMap<String, String>,
    /// DID → (name, value) attributes in write order.
    attributes: HashMap<String, Vec<(String, String)>>,
}

impl Registry {
    fn dispatch(&mut self, method: &str, args: &Value) -> Result<Value, String> {
        match method {
            "getDidByAddress" => {
                let address = str_arg(args, "address")?;
                let chain = str_arg(args, "chainName")?;
                Ok(json!(did_for(address, chain)))
            }
            "getDidDoc" => Ok(self.resolve(str_arg(args, "did")?)),
            "lookupOwner" => Ok(json!(self.owner(str_arg(args, "did")?)?)),
            "createChangeOwnerHash" => {
                let digest = change_owner_digest(
                    str_arg(args, "did")?,
                    str_arg(args, "newOwnerAddress")?,
                );
                Ok(json!(digest.to_hex()))
            }
            "changeOwnerSigned" => {
                let did = str_arg(args, "did")?;
                let new_owner = str_arg(args, "newOwnerAddress")?;
                self.authorize(did, &change_owner_digest(did, new_owner), args)?;
                let new_owner = to_checksum_address(new_owner).ok_or("bad address")?;
                self.owners.insert(did.to_string(), new_owner.clone());
                Ok(json!(new_owner))
            }
            "createSetAttributeHash" => {
                let digest = set_attribute_digest(args)?;
                Ok(json!(digest.to_hex()))
            }
            "setAttributeSigned" => {
                let did = str_arg(args, "did")?;
                let digest = set_attribute_digest(args)?;
                self.authorize(did, &digest, args)?;
                self.attributes.entry(did.to_string()).or_default().push((
                    str_arg(args, "attrName")?.to_string(),
                    str_arg(args, "attrValue")?.to_string(),
                ));
                Ok(json!(format!("0x{}", hex::encode(Keccak256::digest(digest.as_bytes())))))
            }
            other => Err(format!("Unknown method: {}", other)),
        }
    }

    fn owner(&self, did: &str) -> Result<String, String> {
        if let Some(owner) = self.owners.get(did) {
            return Ok(owner.clone());
        }
        let address = did.rsplit(':').next().unwrap_or_default();
        to_checksum_address(address).ok_or_else(|| format!("invalid did: {}", did))
    }

    fn authorize(&self, did: &str, digest: &SignableHash, args: &Value) -> Result<(), String> {
        let signature: RecoverableSignature =
            serde_json::from_value(args["signature"].clone()).map_err(|e| e.to_string())?;
        let signer = signature
            .recover_address(digest)
            .map_err(|e| e.to_string())?;
        let owner = self.owner(did)?;
        if same_address(&signer, &owner) {
            Ok(())
        } else {
            Err(format!("bad_signature: {} is not the owner of {}", signer, did))
        }
    }

    fn resolve(&self, did: &str) -> Value {
        let Ok(owner) = self.owner(did) else {
            return json!({
                "didResolutionMetadata": { "error": "invalidDid" },
                "didDocument": null,
                "didDocumentMetadata": {}
            });
        };

        let controller = format!("{}#controller", did);
        let mut document = json!({
            "@context": CONTEXT,
            "id": did,
            "verificationMethod": [{
                "id": controller,
                "type": "EcdsaSecp256k1RecoveryMethod2020",
                "controller": did,
                "blockchainAccountId": format!("eip155:137:{}", owner)
            }],
            "authentication": [controller],
            "assertionMethod": [controller]
        });

        let services: Vec<Value> = self
            .attributes
            .get(did)
            .into_iter()
            .flatten()
            .filter_map(|(name, value)| name.strip_prefix("did/svc/").map(|kind| (kind, value)))
            .enumerate()
            .map(|(i, (kind, value))| {
                json!({
                    "id": format!("{}#service-{}", did, i + 1),
                    "type": kind,
                    "serviceEndpoint": value
                })
            })
            .collect();
        if !services.is_empty() {
            document["service"] = json!(services);
        }

        json!({
            "didResolutionMetadata": { "contentType": "application/did+ld+json" },
            "didDocument": document,
            "didDocumentMetadata": {}
        })
    }
}

/// `did:ethr:<chain>:<address>`, with the chain segment omitted on mainnet.
pub fn did_for(address: &str, chain: &str) -> String {
    if chain == "mainnet" {
        format!("did:ethr:{}", address)
    } else {
        format!("did:ethr:{}:{}", chain, address)
    }
}

fn str_arg<'a>(args: &'a Value, key: &str) -> Result<&'a str, String> {
    args[key]
        .as_str()
        .ok_or_else(|| format!("missing argument `{}`", key))
}

fn change_owner_digest(did: &str, new_owner: &str) -> SignableHash {
    keccak(&["changeOwner", did, &new_owner.to_lowercase()])
}

fn set_attribute_digest(args: &Value) -> Result<SignableHash, String> {
    let exp = args["exp"].as_u64().ok_or("missing argument `exp`")?;
    Ok(keccak(&[
        "setAttribute",
        str_arg(args, "did")?,
        str_arg(args, "attrName")?,
        str_arg(args, "attrValue")?,
        &exp.to_string(),
    ]))
}

fn keccak(parts: &[&str]) -> SignableHash {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    SignableHash::from_bytes(hasher.finalize().into())
}
