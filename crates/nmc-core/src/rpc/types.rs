//! Typed results for the namecoind methods whose result shape is stable.
//!
//! Methods with loosely specified results (`getinfo`, `gettransaction`, ...)
//! return raw [`serde_json::Value`] instead.

use bitcoin::{Amount, Txid};
use serde::Deserialize;

// ==============================================================================
// Wallet
// ==============================================================================

/// Result of `validateaddress`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressValidation {
    #[serde(rename = "isvalid")]
    pub is_valid: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, rename = "ismine")]
    pub is_mine: Option<bool>,
    #[serde(default)]
    pub account: Option<String>,
}

/// One row of `listreceivedbyaccount`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceivedByAccount {
    pub account: String,
    #[serde(with = "bitcoin::amount::serde::as_btc")]
    pub amount: Amount,
    pub confirmations: u64,
}

/// One row of `listreceivedbyaddress`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceivedByAddress {
    pub address: String,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(with = "bitcoin::amount::serde::as_btc")]
    pub amount: Amount,
    pub confirmations: u64,
}

// ==============================================================================
// Names
// ==============================================================================

/// Result of `name_new`: the pre-registration txid and the random salt that
/// must be passed to `name_firstupdate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(Txid, String)")]
pub struct NameNew {
    pub txid: Txid,
    pub rand: String,
}

impl From<(Txid, String)> for NameNew {
    fn from((txid, rand): (Txid, String)) -> Self {
        Self { txid, rand }
    }
}

/// A registered name as listed by `name_list` and `name_scan`.
///
/// Fields that only one of the two methods reports are kept in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct NameEntry {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
