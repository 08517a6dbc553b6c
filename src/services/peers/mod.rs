//! Peer service clients
//!
//! The catalog consumes two independently deployed services over HTTP: the
//! user directory and the order history service. Each client lives behind a
//! trait so the engine and the handlers can be exercised against mocks.
//!
//! Clients report failures, they don't decide what to do about them: the
//! recommendation engine applies its fallback policy, and the proxy routes
//! pass peer statuses through verbatim.

pub mod orders;
pub mod users;

/// Error from a peer service call
///
/// `Status` carries the peer's HTTP status and decoded body so that callers
/// can pass both through; everything else (timeout, connection refused, DNS)
/// surfaces as `Transport`.
#[derive(Debug, thiserror::Error)]
pub enum PeerError {
    #[error("peer returned status {status}")]
    Status {
        status: reqwest::StatusCode,
        body: serde_json::Value,
    },

    #[error("peer transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
