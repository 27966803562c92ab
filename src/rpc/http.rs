//! JSON-RPC over HTTP using the `ethers` provider.

use ethers::providers::{Http, JsonRpcClient, Middleware, Provider};
use ethers::types::{H160, H256, U256};
use serde::Serialize;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use super::{NodeRpc, ReceiptSummary, RpcError, Transfer};
use crate::crypto::Address;

/// Blocking JSON-RPC client for a single node endpoint.
///
/// Owns a current-thread runtime that drives the async provider. Both are
/// released when the value is dropped.
pub struct HttpNode<P = Http> {
    endpoint: String,
    provider: Provider<P>,
    runtime: Runtime,
}

/// Body of `eth_sendTransaction`. Quantities serialize as 0x-prefixed hex.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendTransactionParams {
    from: H160,
    to: H160,
    gas_price: U256,
    value: U256,
}

impl HttpNode {
    /// Dials `endpoint`. HTTP is connectionless, so this validates the URL and
    /// prepares the client; unreachable hosts surface on the first call.
    pub fn connect(endpoint: &str) -> Result<Self, RpcError> {
        let provider = Provider::<Http>::try_from(endpoint).map_err(|e| RpcError::Connect {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;
        Self::with_provider(endpoint, provider)
    }
}

impl<P: JsonRpcClient> HttpNode<P> {
    /// Wraps an existing provider; `endpoint` is used for logging and errors.
    pub fn with_provider(endpoint: &str, provider: Provider<P>) -> Result<Self, RpcError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RpcError::Connect {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        debug!(endpoint, "rpc client ready");
        Ok(Self {
            endpoint: endpoint.to_string(),
            provider,
            runtime,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl<P: JsonRpcClient> NodeRpc for HttpNode<P> {
    fn accounts(&self) -> Result<Vec<Address>, RpcError> {
        let accounts = self
            .runtime
            .block_on(self.provider.get_accounts())
            .map_err(|e| RpcError::call("eth_accounts", e))?;
        Ok(accounts
            .into_iter()
            .map(|a| Address::from_bytes(a.0))
            .collect())
    }

    fn balance(&self, account: &Address) -> Result<U256, RpcError> {
        self.runtime
            .block_on(self.provider.get_balance(H160(*account.as_bytes()), None))
            .map_err(|e| RpcError::call("eth_getBalance", e))
    }

    fn send_transaction(&self, transfer: &Transfer) -> Result<H256, RpcError> {
        let params = SendTransactionParams {
            from: H160(*transfer.from.as_bytes()),
            to: H160(*transfer.to.as_bytes()),
            gas_price: transfer.gas_price,
            value: transfer.value,
        };
        // Sent as a raw request: `Middleware::send_transaction` would fill in
        // a gas limit, and the node must pick its own default here.
        self.runtime
            .block_on(
                self.provider
                    .request::<_, H256>("eth_sendTransaction", [params]),
            )
            .map_err(|e| RpcError::call("eth_sendTransaction", e))
    }

    fn transaction_receipt(&self, tx_hash: &H256) -> Result<Option<ReceiptSummary>, RpcError> {
        let receipt = self
            .runtime
            .block_on(self.provider.get_transaction_receipt(*tx_hash))
            .map_err(|e| RpcError::call("eth_getTransactionReceipt", e))?;
        Ok(receipt.map(|r| ReceiptSummary {
            block_number: r.block_number.map(|n| n.as_u64()),
            succeeded: r.status.map(|s| s.as_u64() == 1),
        }))
    }
}
