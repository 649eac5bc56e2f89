//! JSON-RPC 1.0 client for namecoind over HTTP.
//!
//! Implements [`NamecoinRpc`](super::NamecoinRpc) using `reqwest`, with
//! basic auth taken from the resolved [`Endpoint`](crate::Endpoint).

mod client;
mod protocol;

pub use client::HttpRpcClient;
