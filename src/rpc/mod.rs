//! Node capabilities consumed by the fund dispenser.
//!
//! `NodeRpc` is the seam between funding logic and the transport. `HttpNode`
//! talks JSON-RPC through an `ethers` provider; tests substitute an
//! in-memory node.

mod http;

use ethers::types::{H256, U256};

use crate::crypto::Address;

pub use http::HttpNode;

/// A native-currency transfer signed by a node-managed account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    /// Amount in wei
    pub value: U256,
    /// Gas price in wei; no gas limit is sent
    pub gas_price: U256,
}

/// The parts of a transaction receipt the dispenser looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub block_number: Option<u64>,
    /// `None` for pre-Byzantium receipts that carry no status field
    pub succeeded: Option<bool>,
}

/// Blocking view of an Ethereum-compatible node.
///
/// Dropping the value releases the underlying connection.
pub trait NodeRpc {
    /// `eth_accounts`: accounts the node can sign for.
    fn accounts(&self) -> Result<Vec<Address>, RpcError>;

    /// `eth_getBalance` at the latest block, in wei.
    fn balance(&self, account: &Address) -> Result<U256, RpcError>;

    /// `eth_sendTransaction`; returns once the node accepts the transaction.
    fn send_transaction(&self, transfer: &Transfer) -> Result<H256, RpcError>;

    /// `eth_getTransactionReceipt`; `None` while the transaction is pending.
    fn transaction_receipt(&self, tx_hash: &H256) -> Result<Option<ReceiptSummary>, RpcError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("Failed to dial {endpoint}: {message}")]
    Connect { endpoint: String, message: String },
    #[error("{method} failed: {message}")]
    Call {
        method: &'static str,
        message: String,
    },
}

impl RpcError {
    pub(crate) fn call(method: &'static str, err: impl std::fmt::Display) -> Self {
        RpcError::Call {
            method,
            message: err.to_string(),
        }
    }
}
