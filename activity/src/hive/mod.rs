//! Hive public ledger access over JSON-RPC.
//!
//! This module provides:
//! - [`HiveRpc`] - A single JSON-RPC call, implemented with node failover by [`HiveRpcClient`]
//! - [`HiveApi`] - Account lookups, bridge notifications and vesting delegations
//! - [`delegations`] - Planning of the operations that zero out outgoing delegations

pub mod delegations;
mod notifications;
mod rpc;

pub use delegations::{plan_undelegation, DelegateVestingShares, VestingDelegation};
pub use notifications::MAX_NOTIFICATIONS;
pub use rpc::HiveRpcClient;

use {
    crate::error::{ActivityError, ActivityResult},
    async_trait::async_trait,
    serde_json::{json, Value},
};

/// One JSON-RPC method call against the Hive API.
#[async_trait]
pub trait HiveRpc {
    async fn call(&self, method: &str, params: Value) -> ActivityResult<Value>;
}

/// Typed wrapper over the handful of Hive API methods used here.
pub struct HiveApi<R> {
    rpc: R,
}

impl<R: HiveRpc> HiveApi<R> {
    pub fn new(rpc: R) -> Self {
        Self { rpc }
    }

    /// Fails with [`ActivityError::AccountNotFound`] unless `account` exists on chain.
    pub async fn ensure_account_exists(&self, account: &str) -> ActivityResult<()> {
        let account = normalize_account(account);
        let result = self
            .rpc
            .call("condenser_api.get_accounts", json!([[account]]))
            .await?;

        match result {
            Value::Array(accounts) if !accounts.is_empty() => Ok(()),
            Value::Array(_) => Err(ActivityError::AccountNotFound(account.to_string())),
            other => Err(ActivityError::UnexpectedShape(format!(
                "get_accounts returned {other}"
            ))),
        }
    }
}

/// Strips a leading `@`; the API expects bare account names.
pub fn normalize_account(account: &str) -> &str {
    account.trim().trim_start_matches('@')
}


#[cfg(test)]
mod tests {
    use {super::*, crate::hive::testing::CannedRpc};

    #[tokio::test]
    async fn test_ensure_account_exists() {
        let rpc = CannedRpc::new(vec![Ok(json!([{ "name": "alice" }]))]);
        let api = HiveApi::new(&rpc);

        api.ensure_account_exists("@alice").await.unwrap();

        let calls = rpc.calls.lock().unwrap();
        assert_eq!(calls[0].0, "condenser_api.get_accounts");
        assert_eq!(calls[0].1, json!([["alice"]]));
    }

    #[tokio::test]
    async fn test_missing_account() {
        let rpc = CannedRpc::new(vec![Ok(json!([]))]);
        let api = HiveApi::new(&rpc);

        assert!(matches!(
            api.ensure_account_exists("ghost").await,
            Err(ActivityError::AccountNotFound(ref name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_normalize_account() {
        assert_eq!(normalize_account(" @alice "), "alice");
        assert_eq!(normalize_account("bob"), "bob");
    }
}
