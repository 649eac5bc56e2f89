use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("node config not found at {}: {source}", path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("node config parse error at line {line}: {message}")]
    ConfigParse { line: usize, message: String },

    #[error("invalid rpc endpoint: {0}")]
    InvalidEndpoint(String),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("unexpected `{method}` result: {message}")]
    InvalidResult {
        method: &'static str,
        message: String,
    },
}

/// Failures of a single JSON-RPC call.
///
/// Server payloads are kept as-is so callers can inspect them.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} {reason}")]
    Http {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("JSON-RPC error: {0}")]
    Server(serde_json::Value),

    #[error("invalid JSON-RPC response: {0}")]
    InvalidResponse(String),
}
