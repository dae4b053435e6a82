use {
    super::{normalize_account, HiveApi, HiveRpc},
    crate::{
        error::{ActivityError, ActivityResult},
        history::RawRecord,
    },
    serde::Deserialize,
    serde_json::{json, Value},
};

/// Largest page `bridge.account_notifications` serves.
pub const MAX_NOTIFICATIONS: usize = 100;

#[derive(Debug, Deserialize)]
struct UnreadStatus {
    unread: usize,
}

impl<R: HiveRpc> HiveApi<R> {
    /// Lists up to `limit` notifications for `account`, newest first.
    ///
    /// With `only_unread` the limit is lowered to the account's unread count, so no
    /// request for the listing is made when nothing is unread.
    pub async fn get_notifications(
        &self,
        account: &str,
        only_unread: bool,
        limit: usize,
    ) -> ActivityResult<Vec<RawRecord>> {
        let account = normalize_account(account);
        let mut limit = limit.min(MAX_NOTIFICATIONS);

        if only_unread {
            let status: UnreadStatus = serde_json::from_value(
                self.rpc
                    .call("bridge.unread_notifications", json!({ "account": account }))
                    .await?,
            )?;
            log::debug!("@{account} has {} unread notification(s)", status.unread);
            limit = limit.min(status.unread);
        }

        if limit == 0 {
            return Ok(Vec::new());
        }

        let result = self
            .rpc
            .call(
                "bridge.account_notifications",
                json!({ "account": account, "limit": limit }),
            )
            .await?;

        match result {
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(record) => Some(record),
                    other => {
                        log::warn!("Skipping malformed notification: {other}");
                        None
                    }
                })
                .collect()),
            other => Err(ActivityError::UnexpectedShape(format!(
                "account_notifications returned {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::hive::testing::CannedRpc};

    fn listing() -> Value {
        json!([
            { "id": 2, "type": "vote", "msg": "@alice voted on your post ($1.23)", "url": "@me/post", "date": "2024-03-01T12:30:45" },
            { "id": 1, "type": "reblog", "msg": "@bob reblogged your post", "url": "@me/post", "date": "2024-03-01T10:00:00" }
        ])
    }

    #[tokio::test]
    async fn test_all_notifications() {
        let rpc = CannedRpc::new(vec![Ok(listing())]);
        let api = HiveApi::new(&rpc);

        let notes = api.get_notifications("alice", false, 100).await.unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0]["type"], "vote");
        assert_eq!(rpc.methods(), vec!["bridge.account_notifications"]);
        assert_eq!(
            rpc.calls.lock().unwrap()[0].1,
            json!({ "account": "alice", "limit": 100 })
        );
    }

    #[tokio::test]
    async fn test_unread_caps_limit() {
        let rpc = CannedRpc::new(vec![
            Ok(json!({ "lastread": "2024-03-01T09:00:00", "unread": 2 })),
            Ok(listing()),
        ]);
        let api = HiveApi::new(&rpc);

        let notes = api.get_notifications("@alice", true, 100).await.unwrap();

        assert_eq!(notes.len(), 2);
        let calls = rpc.calls.lock().unwrap();
        assert_eq!(calls[0].0, "bridge.unread_notifications");
        assert_eq!(calls[1].1, json!({ "account": "alice", "limit": 2 }));
    }

    #[tokio::test]
    async fn test_nothing_unread_skips_listing() {
        let rpc = CannedRpc::new(vec![Ok(json!({ "lastread": "2024-03-01T09:00:00", "unread": 0 }))]);
        let api = HiveApi::new(&rpc);

        assert!(api.get_notifications("alice", true, 100).await.unwrap().is_empty());
        assert_eq!(rpc.methods(), vec!["bridge.unread_notifications"]);
    }

    #[tokio::test]
    async fn test_limit_clamped() {
        let rpc = CannedRpc::new(vec![Ok(json!([]))]);
        let api = HiveApi::new(&rpc);

        api.get_notifications("alice", false, 5000).await.unwrap();

        assert_eq!(
            rpc.calls.lock().unwrap()[0].1,
            json!({ "account": "alice", "limit": MAX_NOTIFICATIONS })
        );
    }

    #[tokio::test]
    async fn test_rpc_error_propagates() {
        let rpc = CannedRpc::new(vec![Err(ActivityError::Rpc {
            code: -32602,
            message: "Invalid parameters".to_string(),
        })]);
        let api = HiveApi::new(&rpc);

        assert!(matches!(
            api.get_notifications("alice", true, 100).await,
            Err(ActivityError::Rpc { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_array_listing() {
        let rpc = CannedRpc::new(vec![Ok(json!({ "oops": true }))]);
        let api = HiveApi::new(&rpc);

        assert!(matches!(
            api.get_notifications("alice", false, 10).await,
            Err(ActivityError::UnexpectedShape(_))
        ));
    }
}
