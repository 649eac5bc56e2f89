//! namecoind RPC abstraction layer.
//!
//! Defines the [`NamecoinRpc`] trait and provides an HTTP JSON-RPC
//! implementation ([`HttpRpcClient`]) plus a test mock (`mock::MockRpc`).

mod http_adapter;
#[cfg(test)]
pub mod mock;
mod parsing;
pub mod types;

pub use http_adapter::HttpRpcClient;
pub use types::{AddressValidation, NameEntry, NameNew, ReceivedByAccount, ReceivedByAddress};

use std::collections::BTreeMap;

use async_trait::async_trait;
use bitcoin::{Amount, SignedAmount, Txid};
use serde_json::{json, Value};

use crate::error::CoreError;

use parsing::{decode_result, parse_signed_amount, trim_trailing_nulls};

/// The namecoind RPC surface.
///
/// Implementors provide [`call`](NamecoinRpc::call); every other method is a
/// fixed mapping from one daemon method name to its positional arguments.
/// Optional arguments left as `None` at the end of the list are not sent.
#[async_trait]
pub trait NamecoinRpc: Send + Sync {
    /// Send one JSON-RPC request and return its `result`.
    ///
    /// `params` are passed through unvalidated; the daemon enforces arity
    /// and types.
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, CoreError>;

    // ==========================================================================
    // Wallet
    // ==========================================================================

    /// Safely copy wallet.dat to `destination` (a directory or a file path).
    async fn backup_wallet(&self, destination: &str) -> Result<(), CoreError> {
        self.call("backupwallet", vec![json!(destination)]).await?;
        Ok(())
    }

    /// Account associated with `address`.
    async fn get_account(&self, address: &str) -> Result<String, CoreError> {
        let raw = self.call("getaccount", vec![json!(address)]).await?;
        decode_result("getaccount", raw)
    }

    /// Current receiving address for `account`.
    async fn get_account_address(&self, account: &str) -> Result<String, CoreError> {
        let raw = self.call("getaccountaddress", vec![json!(account)]).await?;
        decode_result("getaccountaddress", raw)
    }

    async fn get_addresses_by_account(&self, account: &str) -> Result<Vec<String>, CoreError> {
        let raw = self
            .call("getaddressesbyaccount", vec![json!(account)])
            .await?;
        decode_result("getaddressesbyaccount", raw)
    }

    /// Server's total available balance, or the balance of `account`.
    async fn get_balance(
        &self,
        account: Option<&str>,
        minconf: u32,
    ) -> Result<SignedAmount, CoreError> {
        let raw = self
            .call("getbalance", vec![json!(account), json!(minconf)])
            .await?;
        parse_signed_amount("getbalance", &raw)
    }

    /// New receiving address, added to the address book under `account` if
    /// one is given.
    async fn get_new_address(&self, account: Option<&str>) -> Result<String, CoreError> {
        let raw = self
            .call("getnewaddress", trim_trailing_nulls(vec![json!(account)]))
            .await?;
        decode_result("getnewaddress", raw)
    }

    /// Total received by addresses of `account` in transactions with at
    /// least `minconf` confirmations.
    async fn get_received_by_account(
        &self,
        account: &str,
        minconf: u32,
    ) -> Result<Amount, CoreError> {
        let raw = self
            .call("getreceivedbyaccount", vec![json!(account), json!(minconf)])
            .await?;
        non_negative("getreceivedbyaccount", &raw)
    }

    /// Total received by `address` in transactions with at least `minconf`
    /// confirmations.
    async fn get_received_by_address(
        &self,
        address: &str,
        minconf: u32,
    ) -> Result<Amount, CoreError> {
        let raw = self
            .call("getreceivedbyaddress", vec![json!(address), json!(minconf)])
            .await?;
        non_negative("getreceivedbyaddress", &raw)
    }

    async fn get_transaction(&self, txid: &Txid) -> Result<Value, CoreError> {
        self.call("gettransaction", vec![json!(txid.to_string())])
            .await
    }

    async fn list_accounts(
        &self,
        minconf: u32,
    ) -> Result<BTreeMap<String, SignedAmount>, CoreError> {
        let raw = self.call("listaccounts", vec![json!(minconf)]).await?;
        let balances: BTreeMap<String, Value> = decode_result("listaccounts", raw)?;
        balances
            .into_iter()
            .map(|(account, value)| {
                let amount = parse_signed_amount("listaccounts", &value)?;
                Ok::<_, CoreError>((account, amount))
            })
            .collect()
    }

    async fn list_received_by_account(
        &self,
        minconf: u32,
        include_empty: bool,
    ) -> Result<Vec<ReceivedByAccount>, CoreError> {
        let raw = self
            .call(
                "listreceivedbyaccount",
                vec![json!(minconf), json!(include_empty)],
            )
            .await?;
        decode_result("listreceivedbyaccount", raw)
    }

    /// Use `list_received_by_address(0, true)` to list every address.
    async fn list_received_by_address(
        &self,
        minconf: u32,
        include_empty: bool,
    ) -> Result<Vec<ReceivedByAddress>, CoreError> {
        let raw = self
            .call(
                "listreceivedbyaddress",
                vec![json!(minconf), json!(include_empty)],
            )
            .await?;
        decode_result("listreceivedbyaddress", raw)
    }

    /// Up to `count` most recent transactions for `account`.
    async fn list_transactions(&self, account: &str, count: u32) -> Result<Vec<Value>, CoreError> {
        let raw = self
            .call("listtransactions", vec![json!(account), json!(count)])
            .await?;
        decode_result("listtransactions", raw)
    }

    /// Move funds between two accounts of this wallet (`move`).
    async fn move_funds(
        &self,
        from_account: &str,
        to_account: &str,
        amount: Amount,
        minconf: u32,
        comment: Option<&str>,
    ) -> Result<bool, CoreError> {
        let params = trim_trailing_nulls(vec![
            json!(from_account),
            json!(to_account),
            json!(amount.to_btc()),
            json!(minconf),
            json!(comment),
        ]);
        let raw = self.call("move", params).await?;
        decode_result("move", raw)
    }

    async fn send_from(
        &self,
        from_account: &str,
        to_address: &str,
        amount: Amount,
        minconf: u32,
        comment: Option<&str>,
        comment_to: Option<&str>,
    ) -> Result<Txid, CoreError> {
        let params = trim_trailing_nulls(vec![
            json!(from_account),
            json!(to_address),
            json!(amount.to_btc()),
            json!(minconf),
            json!(comment),
            json!(comment_to),
        ]);
        let raw = self.call("sendfrom", params).await?;
        decode_result("sendfrom", raw)
    }

    async fn send_to_address(
        &self,
        address: &str,
        amount: Amount,
        comment: Option<&str>,
        comment_to: Option<&str>,
    ) -> Result<Txid, CoreError> {
        let params = trim_trailing_nulls(vec![
            json!(address),
            json!(amount.to_btc()),
            json!(comment),
            json!(comment_to),
        ]);
        let raw = self.call("sendtoaddress", params).await?;
        decode_result("sendtoaddress", raw)
    }

    async fn set_account(&self, address: &str, account: &str) -> Result<(), CoreError> {
        self.call("setaccount", vec![json!(address), json!(account)])
            .await?;
        Ok(())
    }

    async fn validate_address(&self, address: &str) -> Result<AddressValidation, CoreError> {
        let raw = self.call("validateaddress", vec![json!(address)]).await?;
        decode_result("validateaddress", raw)
    }

    // ==========================================================================
    // Chain & Node
    // ==========================================================================

    /// Dump the block at `height`. Only available on patched daemons.
    async fn get_block_by_count(&self, height: u64) -> Result<Value, CoreError> {
        self.call("getblockbycount", vec![json!(height)]).await
    }

    /// Number of blocks in the longest chain.
    async fn get_block_count(&self) -> Result<u64, CoreError> {
        let raw = self.call("getblockcount", Vec::new()).await?;
        decode_result("getblockcount", raw)
    }

    async fn get_block_number(&self) -> Result<u64, CoreError> {
        let raw = self.call("getblocknumber", Vec::new()).await?;
        decode_result("getblocknumber", raw)
    }

    async fn get_connection_count(&self) -> Result<u64, CoreError> {
        let raw = self.call("getconnectioncount", Vec::new()).await?;
        decode_result("getconnectioncount", raw)
    }

    /// Proof-of-work difficulty as a multiple of the minimum difficulty.
    async fn get_difficulty(&self) -> Result<f64, CoreError> {
        let raw = self.call("getdifficulty", Vec::new()).await?;
        decode_result("getdifficulty", raw)
    }

    /// Whether the daemon is currently generating hashes.
    async fn get_generate(&self) -> Result<bool, CoreError> {
        let raw = self.call("getgenerate", Vec::new()).await?;
        decode_result("getgenerate", raw)
    }

    async fn get_hashes_per_sec(&self) -> Result<u64, CoreError> {
        let raw = self.call("gethashespersec", Vec::new()).await?;
        decode_result("gethashespersec", raw)
    }

    async fn get_info(&self) -> Result<Value, CoreError> {
        self.call("getinfo", Vec::new()).await
    }

    /// Without `data`, fetch formatted hash data to work on; with `data`,
    /// try to solve the block.
    async fn get_work(&self, data: Option<&str>) -> Result<Value, CoreError> {
        self.call("getwork", trim_trailing_nulls(vec![json!(data)]))
            .await
    }

    /// Command list, or help for one command.
    async fn help(&self, command: Option<&str>) -> Result<String, CoreError> {
        let raw = self
            .call("help", trim_trailing_nulls(vec![json!(command)]))
            .await?;
        decode_result("help", raw)
    }

    /// Turn generation on or off; `genproclimit` of -1 means unlimited.
    async fn set_generate(&self, generate: bool, genproclimit: i32) -> Result<(), CoreError> {
        self.call("setgenerate", vec![json!(generate), json!(genproclimit)])
            .await?;
        Ok(())
    }

    async fn stop(&self) -> Result<Value, CoreError> {
        self.call("stop", Vec::new()).await
    }

    // ==========================================================================
    // Names
    // ==========================================================================

    async fn name_clean(&self, name: &str) -> Result<Value, CoreError> {
        self.call("name_clean", vec![json!(name)]).await
    }

    /// Register `name` after its `name_new` has matured. `tx` optionally names
    /// the `name_new` transaction to spend; it is omitted when `None`.
    async fn name_firstupdate(
        &self,
        name: &str,
        rand: &str,
        tx: Option<&Txid>,
        value: &str,
    ) -> Result<Txid, CoreError> {
        let mut params = vec![json!(name), json!(rand)];
        if let Some(txid) = tx {
            params.push(json!(txid.to_string()));
        }
        params.push(json!(value));

        let raw = self.call("name_firstupdate", params).await?;
        decode_result("name_firstupdate", raw)
    }

    /// Names owned by this wallet, or only `name`.
    async fn name_list(&self, name: Option<&str>) -> Result<Vec<NameEntry>, CoreError> {
        let raw = self
            .call("name_list", trim_trailing_nulls(vec![json!(name)]))
            .await?;
        decode_result("name_list", raw)
    }

    async fn name_new(&self, name: &str) -> Result<NameNew, CoreError> {
        let raw = self.call("name_new", vec![json!(name)]).await?;
        decode_result("name_new", raw)
    }

    /// Up to `max_returned` names starting at `start_name`.
    async fn name_scan(
        &self,
        start_name: Option<&str>,
        max_returned: u32,
    ) -> Result<Vec<NameEntry>, CoreError> {
        let raw = self
            .call("name_scan", vec![json!(start_name), json!(max_returned)])
            .await?;
        decode_result("name_scan", raw)
    }

    async fn name_update(
        &self,
        name: &str,
        value: &str,
        to_address: Option<&str>,
    ) -> Result<Txid, CoreError> {
        let params = trim_trailing_nulls(vec![json!(name), json!(value), json!(to_address)]);
        let raw = self.call("name_update", params).await?;
        decode_result("name_update", raw)
    }
}

fn non_negative(method: &'static str, raw: &Value) -> Result<Amount, CoreError> {
    parse_signed_amount(method, raw)?
        .to_unsigned()
        .map_err(|e| CoreError::InvalidResult {
            method,
            message: format!("negative amount: {e}"),
        })
}
