//! Namecoin node configuration (`bitcoin.conf`) reader.
//!
//! Only the RPC connection keys are recognised; everything else in the file
//! is ignored.

use std::path::{Path, PathBuf};

use crate::error::CoreError;

/// Location of the node config relative to the user's home directory.
const CONF_RELATIVE_PATH: &str = ".namecoin/bitcoin.conf";

/// RPC connection settings read from the node config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeConf {
    pub rpcconnect: Option<String>,
    pub rpcport: Option<u16>,
    pub rpcuser: Option<String>,
    pub rpcpassword: Option<String>,
}

impl NodeConf {
    /// Read and parse the config file at `path`.
    ///
    /// Any I/O failure (missing file, permissions) is reported as
    /// [`CoreError::ConfigNotFound`].
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| CoreError::ConfigNotFound {
                path: path.to_owned(),
                source,
            })?;
        Self::parse(&content)
    }

    /// Parse config text in a single top-to-bottom pass.
    ///
    /// A repeated key overwrites the earlier value.
    pub fn parse(content: &str) -> Result<Self, CoreError> {
        let mut conf = Self::default();

        for (idx, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim_start();
            if line.starts_with('#') {
                continue;
            }
            let Some((key, rest)) = line.split_once('=') else {
                continue;
            };
            let value = rest.split(char::is_whitespace).next().unwrap_or_default();
            if value.is_empty() {
                continue;
            }

            match key {
                "rpcconnect" => conf.rpcconnect = Some(value.to_owned()),
                "rpcport" => {
                    let port = value.parse::<u16>().map_err(|e| CoreError::ConfigParse {
                        line: idx + 1,
                        message: format!("invalid rpcport `{value}`: {e}"),
                    })?;
                    conf.rpcport = Some(port);
                }
                "rpcuser" => conf.rpcuser = Some(value.to_owned()),
                "rpcpassword" => conf.rpcpassword = Some(value.to_owned()),
                _ => {}
            }
        }

        Ok(conf)
    }
}

/// `~/.namecoin/bitcoin.conf` for the current user.
pub fn default_conf_path() -> Result<PathBuf, CoreError> {
    let home = dirs::home_dir().ok_or_else(|| CoreError::ConfigNotFound {
        path: PathBuf::from("~").join(CONF_RELATIVE_PATH),
        source: std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "could not determine home directory",
        ),
    })?;
    Ok(home.join(CONF_RELATIVE_PATH))
}
