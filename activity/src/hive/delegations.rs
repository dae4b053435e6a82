//! Outgoing vesting delegations and the operations that revoke them.
//!
//! Revoking a delegation on Hive is a `delegate_vesting_shares` operation with a zero
//! amount. The operations built here are unsigned; signing and broadcasting them needs
//! the account's active key and happens outside this crate.

use {
    super::{normalize_account, HiveApi, HiveRpc},
    crate::error::ActivityResult,
    serde::{ser::SerializeTuple, Deserialize, Serialize, Serializer},
    serde_json::json,
};

/// Zero amount in the asset format the chain expects.
pub const ZERO_VESTS: &str = "0.000000 VESTS";

/// Largest page `condenser_api.get_vesting_delegations` serves.
const DELEGATION_PAGE_LIMIT: usize = 1000;

/// One outgoing delegation as listed by the condenser API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VestingDelegation {
    pub delegator: String,
    pub delegatee: String,
    /// Asset string, e.g. `"2500.000000 VESTS"`
    pub vesting_shares: String,
    #[serde(default)]
    pub min_delegation_time: Option<String>,
}

/// Unsigned `delegate_vesting_shares` operation.
///
/// Serializes in the condenser form `["delegate_vesting_shares", { ... }]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegateVestingShares {
    pub delegator: String,
    pub delegatee: String,
    pub vesting_shares: String,
}

impl DelegateVestingShares {
    pub const OPERATION_NAME: &'static str = "delegate_vesting_shares";
}

impl Serialize for DelegateVestingShares {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            delegator: &'a str,
            delegatee: &'a str,
            vesting_shares: &'a str,
        }

        let mut op = serializer.serialize_tuple(2)?;
        op.serialize_element(Self::OPERATION_NAME)?;
        op.serialize_element(&Body {
            delegator: &self.delegator,
            delegatee: &self.delegatee,
            vesting_shares: &self.vesting_shares,
        })?;
        op.end()
    }
}

/// Builds one zeroing operation per delegation, in listing order.
pub fn plan_undelegation(delegations: &[VestingDelegation]) -> Vec<DelegateVestingShares> {
    delegations
        .iter()
        .map(|d| DelegateVestingShares {
            delegator: d.delegator.clone(),
            delegatee: d.delegatee.clone(),
            vesting_shares: ZERO_VESTS.to_string(),
        })
        .collect()
}

impl<R: HiveRpc> HiveApi<R> {
    /// Lists the vesting delegations `account` has made to others.
    pub async fn get_vesting_delegations(
        &self,
        account: &str,
    ) -> ActivityResult<Vec<VestingDelegation>> {
        let account = normalize_account(account);
        let result = self
            .rpc
            .call(
                "condenser_api.get_vesting_delegations",
                json!([account, "", DELEGATION_PAGE_LIMIT]),
            )
            .await?;

        let delegations: Vec<VestingDelegation> = serde_json::from_value(result)?;
        log::info!(
            "@{account} has {} outgoing delegation(s)",
            delegations.len()
        );
        Ok(delegations)
    }
}
