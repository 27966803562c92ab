//! # eth_testkit
//!
//! Helpers for integration tests against an Ethereum-compatible node.
//!
//! ## Architecture
//!
//! - `crypto`: Key generation, address derivation and `AddressRecord`
//! - `rpc`: The `NodeRpc` seam and its JSON-RPC implementation
//! - `fund`: Funding addresses from node-managed accounts
//! - `units`: Wei/ether constants
//! - `config`: CLI configuration

pub mod config;
pub mod crypto;
pub mod fund;
pub mod rpc;
pub mod units;

pub use config::Config;
pub use crypto::{Address, AddressRecord, KeyError, Keypair};
pub use fund::{
    prepare_funds, Confirmation, FundDispenser, FundError, FundOptions, Funding, SelectionPolicy,
};
pub use rpc::{HttpNode, NodeRpc, RpcError, Transfer};
pub use units::{ether_to_wei, E18};
