use std::path::Path;

use async_trait::async_trait;
use reqwest::header;
use tracing::{debug, trace};

use crate::endpoint::Endpoint;
use crate::error::{CoreError, RpcError};

use super::super::NamecoinRpc;
use super::protocol::{decode_response, JsonRpcRequest};

/// namecoind JSON-RPC client over HTTP(S).
///
/// Each call is an independent request/response exchange; the only state
/// kept between calls is the resolved endpoint and reqwest's connection pool.
pub struct HttpRpcClient {
    client: reqwest::Client,
    endpoint: Endpoint,
    url: String,
}

impl HttpRpcClient {
    /// Create a client for `uri`.
    ///
    /// Authentication precedence:
    /// 1. username + password embedded in `uri`
    /// 2. `rpcuser` / `rpcpassword` (and `rpcconnect` / `rpcport`) from
    ///    `~/.namecoin/bitcoin.conf`
    ///
    /// Fails if the config file is needed but cannot be read.
    pub fn new(uri: &str) -> Result<Self, CoreError> {
        Self::from_endpoint(Endpoint::resolve(uri, None)?)
    }

    /// Like [`HttpRpcClient::new`], reading credentials from `conf_file`
    /// instead of the default location.
    pub fn with_conf_file(uri: &str, conf_file: &Path) -> Result<Self, CoreError> {
        Self::from_endpoint(Endpoint::resolve(uri, Some(conf_file))?)
    }

    pub fn from_endpoint(endpoint: Endpoint) -> Result<Self, CoreError> {
        // A 3xx is a failed call, never a hop to another URL.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .tcp_nodelay(true)
            .build()
            .map_err(RpcError::Transport)?;
        let url = endpoint.url();
        debug!(%endpoint, "rpc client ready");

        Ok(Self {
            client,
            endpoint,
            url,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl NamecoinRpc for HttpRpcClient {
    async fn call(
        &self,
        method: &str,
        params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CoreError> {
        debug!(rpc.method = method, rpc.params = params.len(), "rpc call");
        let req = JsonRpcRequest::new(method, &params);

        let mut builder = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&req);
        if let Some(user) = &self.endpoint.username {
            builder = builder.basic_auth(user, self.endpoint.password.as_ref());
        }

        let response = builder.send().await.map_err(RpcError::Transport)?;
        let status = response.status();

        let body = response.text().await.map_err(RpcError::Transport)?;
        debug!(rpc.method = method, %status, body_len = body.len(), "rpc response");
        trace!(rpc.method = method, body = %body, "rpc response body");

        if !status.is_success() {
            return Err(RpcError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_owned(),
                body,
            }
            .into());
        }

        Ok(decode_response(&body)?)
    }
}
