use std::fmt;
use std::path::Path;

use reqwest::Url;
use tracing::debug;

use crate::conf::{default_conf_path, NodeConf};
use crate::error::CoreError;

/// URI used when the caller does not name one: a local namecoind.
pub const DEFAULT_RPC_URI: &str = "http://127.0.0.1:19920/";

/// Network location and credentials of a Namecoin RPC server.
///
/// Built once during client construction; the client only hands out shared
/// references afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Endpoint {
    /// Parse an `http://` or `https://` URI, taking credentials from its
    /// userinfo when present.
    pub fn parse(uri: &str) -> Result<Self, CoreError> {
        let parsed = Url::parse(uri).map_err(|e| {
            CoreError::InvalidEndpoint(format!("`{uri}` is not a valid URL ({e})"))
        })?;

        let scheme = match parsed.scheme() {
            "http" | "https" => parsed.scheme().to_owned(),
            other => {
                return Err(CoreError::InvalidEndpoint(format!(
                    "unsupported scheme `{other}`; expected http or https"
                )));
            }
        };
        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| CoreError::InvalidEndpoint(format!("`{uri}` has no host")))?
            .to_owned();
        let port = parsed
            .port_or_known_default()
            .ok_or_else(|| CoreError::InvalidEndpoint(format!("`{uri}` has no port")))?;
        let path = match parsed.path() {
            "" => "/".to_owned(),
            p => p.to_owned(),
        };

        Ok(Self {
            scheme,
            host,
            port,
            path,
            username: non_empty(parsed.username()),
            password: parsed.password().and_then(non_empty),
        })
    }

    /// Replace any credentials with the given pair.
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.username = Some(username.to_owned());
        self.password = Some(password.to_owned());
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Overwrite fields with every value present in `conf`.
    pub fn apply_conf(&mut self, conf: &NodeConf) {
        if let Some(host) = &conf.rpcconnect {
            self.host = host.clone();
        }
        if let Some(port) = conf.rpcport {
            self.port = port;
        }
        if let Some(user) = &conf.rpcuser {
            self.username = Some(user.clone());
        }
        if let Some(pass) = &conf.rpcpassword {
            self.password = Some(pass.clone());
        }
    }

    /// Parse `uri` and, unless it already carries a username and password,
    /// fill the gaps from the node config.
    ///
    /// `conf_file` defaults to `~/.namecoin/bitcoin.conf`. A config that
    /// cannot be read fails the whole resolution.
    pub fn resolve(uri: &str, conf_file: Option<&Path>) -> Result<Self, CoreError> {
        let mut endpoint = Self::parse(uri)?;
        if endpoint.has_credentials() {
            return Ok(endpoint);
        }

        let path = match conf_file {
            Some(path) => path.to_owned(),
            None => default_conf_path()?,
        };
        debug!(conf = %path.display(), "rpc credentials missing from uri; reading node config");
        let conf = NodeConf::load(&path)?;
        endpoint.apply_conf(&conf);
        Ok(endpoint)
    }

    /// Request URL without credentials.
    pub fn url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.scheme,
            bracket_ipv6(&self.host),
            self.port,
            self.path
        )
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            scheme: "http".to_owned(),
            host: "127.0.0.1".to_owned(),
            port: 19920,
            path: "/".to_owned(),
            username: None,
            password: None,
        }
    }
}

// Display and Debug both keep the password out of logs.
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://", self.scheme)?;
        if let Some(user) = &self.username {
            write!(f, "{user}@")?;
        }
        write!(f, "{}:{}{}", bracket_ipv6(&self.host), self.port, self.path)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path", &self.path)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

fn bracket_ipv6(host: &str) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_owned()
    }
}
