//! Network defaults for the registry service endpoint.

/// Default WebSocket host of the registry service.
pub const DEFAULT_HOST: &str = "ws://localhost";

/// Default port of the registry service.
pub const DEFAULT_PORT: u16 = 8080;

/// Join a host and port into the endpoint URL, e.g. `ws://localhost:8080`.
pub fn endpoint_url(host: &str, port: u16) -> String {
    format!("{}:{}", host.trim_end_matches('/'), port)
}

/// Default endpoint URL (`ws://localhost:8080`).
pub fn default_endpoint_url() -> String {
    endpoint_url(DEFAULT_HOST, DEFAULT_PORT)
}
