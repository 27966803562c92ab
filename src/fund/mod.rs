//! Funding test addresses from node-managed accounts.
//!
//! The dispenser lists the node's accounts, picks one whose balance covers
//! the amount plus one ether of headroom, and asks the node to send the
//! transfer with `eth_sendTransaction`. By default it returns as soon as the
//! node accepts the transaction, before it is mined.

mod policy;

use std::thread;
use std::time::{Duration, Instant};

use ethers::types::{H256, U256};
use tracing::{debug, info, warn};

use crate::crypto::Address;
use crate::rpc::{HttpNode, NodeRpc, RpcError, Transfer};
use crate::units::{ether_to_wei, DEFAULT_GAS_PRICE, E18};

pub use policy::SelectionPolicy;

/// What to wait for after the node accepts the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    /// Return on mempool acceptance
    #[default]
    None,
    /// Poll for a receipt until it appears or `timeout` elapses
    Receipt {
        timeout: Duration,
        poll_interval: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundOptions {
    pub policy: SelectionPolicy,
    pub gas_price: U256,
    pub confirmation: Confirmation,
}

impl Default for FundOptions {
    fn default() -> Self {
        Self {
            policy: SelectionPolicy::default(),
            gas_price: DEFAULT_GAS_PRICE,
            confirmation: Confirmation::default(),
        }
    }
}

/// A completed funding transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Funding {
    pub from: Address,
    pub to: Address,
    /// Amount sent, in wei
    pub value: U256,
    pub tx_hash: H256,
    /// Block that included the transfer; only known when a receipt was awaited
    pub block_number: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum FundError {
    #[error("Funding amount must be positive")]
    InvalidAmount,
    #[error("Failed to dial rpc: {0}")]
    Connect(RpcError),
    #[error("Failed to query node: {0}")]
    Query(RpcError),
    #[error(
        "Insufficient balance: none of {accounts} node account(s) holds more than {required} wei"
    )]
    InsufficientBalance { required: U256, accounts: usize },
    #[error("Transfer failed: {0}")]
    Submit(RpcError),
    #[error("Transaction {tx_hash:?} was not mined within {timeout:?}")]
    ConfirmationTimeout { tx_hash: H256, timeout: Duration },
    #[error("Transaction {tx_hash:?} reverted")]
    Reverted { tx_hash: H256 },
}

/// Moves ether from a node-managed account to a destination address.
#[derive(Debug, Clone, Default)]
pub struct FundDispenser {
    options: FundOptions,
}

impl FundDispenser {
    pub fn new(options: FundOptions) -> Self {
        Self { options }
    }

    /// Dials `endpoint` and funds `destination` with `amount` whole ether.
    ///
    /// The connection lives for this call only.
    pub fn fund_endpoint(
        &self,
        endpoint: &str,
        destination: &Address,
        amount: u64,
    ) -> Result<Funding, FundError> {
        if amount == 0 {
            return Err(FundError::InvalidAmount);
        }
        let node = HttpNode::connect(endpoint).map_err(FundError::Connect)?;
        self.fund(node, destination, amount)
    }

    /// Funds `destination` with `amount` whole ether through `node`.
    ///
    /// Takes ownership of the node so the connection is released on every
    /// exit path.
    pub fn fund<N: NodeRpc>(
        &self,
        node: N,
        destination: &Address,
        amount: u64,
    ) -> Result<Funding, FundError> {
        if amount == 0 {
            return Err(FundError::InvalidAmount);
        }

        let value = ether_to_wei(amount);
        let threshold = value + E18;

        let accounts = node.accounts().map_err(FundError::Query)?;
        let mut balances = Vec::with_capacity(accounts.len());
        for account in accounts {
            let balance = node.balance(&account).map_err(FundError::Query)?;
            debug!(%account, %balance, "node account balance");
            balances.push((account, balance));
        }

        let Some((from, balance)) = self.options.policy.select(&balances, threshold) else {
            warn!(
                accounts = balances.len(),
                required = %threshold,
                "no node account can cover the transfer"
            );
            return Err(FundError::InsufficientBalance {
                required: threshold,
                accounts: balances.len(),
            });
        };
        info!(%from, %balance, policy = %self.options.policy, "selected funding account");

        let transfer = Transfer {
            from,
            to: *destination,
            value,
            gas_price: self.options.gas_price,
        };
        let tx_hash = node.send_transaction(&transfer).map_err(FundError::Submit)?;

        let block_number = match self.options.confirmation {
            Confirmation::None => None,
            Confirmation::Receipt {
                timeout,
                poll_interval,
            } => await_receipt(&node, tx_hash, timeout, poll_interval)?,
        };

        info!(to = %destination, amount, ?tx_hash, "funds prepared");
        Ok(Funding {
            from,
            to: *destination,
            value,
            tx_hash,
            block_number,
        })
    }
}

fn await_receipt<N: NodeRpc>(
    node: &N,
    tx_hash: H256,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<Option<u64>, FundError> {
    // A timeout too large to represent as an instant never expires
    let deadline = Instant::now().checked_add(timeout);
    loop {
        if let Some(receipt) = node
            .transaction_receipt(&tx_hash)
            .map_err(FundError::Query)?
        {
            if receipt.succeeded == Some(false) {
                return Err(FundError::Reverted { tx_hash });
            }
            return Ok(receipt.block_number);
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(FundError::ConfirmationTimeout { tx_hash, timeout });
        }
        thread::sleep(poll_interval);
    }
}

/// Test-harness helper: funds `destination` with `amount` ether or fails the
/// calling test.
///
/// # Panics
/// Panics on an unparsable destination and on every funding error.
pub fn prepare_funds(endpoint: &str, destination: &str, amount: u64) -> Funding {
    let to: Address = destination
        .parse()
        .unwrap_or_else(|e| panic!("Invalid destination {}: {}", destination, e));
    match FundDispenser::default().fund_endpoint(endpoint, &to, amount) {
        Ok(funding) => funding,
        Err(e) => panic!("Failed to fund {}: {}", destination, e),
    }
}
