mod cli;

use clap::Parser;
use eyre::WrapErr;

use nmc_core::rpc::{HttpRpcClient, NamecoinRpc};
use nmc_core::{CoreError, Endpoint, RpcError};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_level(true)
        .init();

    let endpoint = match (&args.rpc_user, &args.rpc_pass) {
        (Some(user), Some(pass)) => Endpoint::parse(&args.rpc_url)?.with_credentials(user, pass),
        _ => Endpoint::resolve(&args.rpc_url, args.conf.as_deref())
            .wrap_err("while resolving RPC credentials")?,
    };
    tracing::debug!(%endpoint, method = %args.method, "calling namecoind");

    let rpc = HttpRpcClient::from_endpoint(endpoint)?;
    let params = args.params.iter().map(|p| cli::parse_param(p)).collect();

    let result = rpc
        .call(&args.method, params)
        .await
        .map_err(|err| describe_call_error(&args.method, err))?;

    match result {
        serde_json::Value::String(s) => println!("{s}"),
        other => println!(
            "{}",
            serde_json::to_string_pretty(&other).wrap_err("render result")?
        ),
    }
    Ok(())
}

fn describe_call_error(method: &str, err: CoreError) -> eyre::Report {
    let report = match err {
        CoreError::Rpc(RpcError::Server(payload)) => {
            let message = payload
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| payload.to_string());
            match payload.get("code").and_then(serde_json::Value::as_i64) {
                Some(code) => eyre::eyre!("error code {code}: {message}"),
                None => eyre::eyre!("{message}"),
            }
        }
        CoreError::Rpc(RpcError::Http { status: 401, .. }) => {
            eyre::eyre!("HTTP 401 Unauthorized; check rpcuser/rpcpassword")
        }
        other => eyre::Report::new(other),
    };
    report.wrap_err(format!("`{method}` failed"))
}
