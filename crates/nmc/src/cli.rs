use std::path::PathBuf;

use clap::Parser;

use nmc_core::endpoint::DEFAULT_RPC_URI;

/// nmc: call a Namecoin daemon's JSON-RPC interface.
///
/// Without credentials in the URL or on the command line, `rpcuser` and
/// `rpcpassword` are read from `~/.namecoin/bitcoin.conf` (or `--conf`).
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// namecoind RPC URL; may carry `user:password@`.
    #[arg(long, default_value = DEFAULT_RPC_URI, env = "NMC_RPC_URL")]
    pub rpc_url: String,

    /// RPC username (requires --rpc-pass).
    #[arg(long, env = "NMC_RPC_USER", requires = "rpc_pass")]
    pub rpc_user: Option<String>,

    /// RPC password (requires --rpc-user).
    #[arg(long, env = "NMC_RPC_PASS", requires = "rpc_user")]
    pub rpc_pass: Option<String>,

    /// Node config file to read credentials from when they are not given.
    #[arg(long)]
    pub conf: Option<PathBuf>,

    /// RPC method name, e.g. `getblockcount` or `name_scan`.
    #[arg(default_value = "help")]
    pub method: String,

    /// Positional parameters. Each is parsed as JSON, falling back to a
    /// plain string (`5` is a number, `d/example` a string).
    #[arg(allow_hyphen_values = true)]
    pub params: Vec<String>,
}

pub fn parse_param(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_param_prefers_json() {
        assert_eq!(parse_param("5"), json!(5));
        assert_eq!(parse_param("-1"), json!(-1));
        assert_eq!(parse_param("true"), json!(true));
        assert_eq!(parse_param("\"5\""), json!("5"));
        assert_eq!(parse_param("{\"ip\":\"1.2.3.4\"}"), json!({"ip": "1.2.3.4"}));
    }

    #[test]
    fn parse_param_falls_back_to_string() {
        assert_eq!(parse_param("d/rubyists"), json!("d/rubyists"));
        assert_eq!(parse_param("N1addr"), json!("N1addr"));
    }

    #[test]
    fn cli_defaults_to_help_on_local_node() {
        let cli = Cli::try_parse_from(["nmc"]).expect("bare invocation must parse");
        assert_eq!(cli.method, "help");
        assert!(cli.params.is_empty());
        assert_eq!(cli.rpc_url, DEFAULT_RPC_URI);
    }

    #[test]
    fn cli_collects_method_and_params() {
        let cli = Cli::try_parse_from(["nmc", "name_scan", "d/rubyists", "5"])
            .expect("method with params must parse");
        assert_eq!(cli.method, "name_scan");
        assert_eq!(cli.params, ["d/rubyists", "5"]);
    }

    #[test]
    fn cli_rejects_user_without_password() {
        assert!(Cli::try_parse_from(["nmc", "--rpc-user", "alice", "getinfo"]).is_err());
    }
}
