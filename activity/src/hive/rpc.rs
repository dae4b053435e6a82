use {
    super::HiveRpc,
    crate::{
        config::HiveConfig,
        error::{ActivityError, ActivityResult},
    },
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
    serde_json::Value,
    std::future::Future,
};

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: &'a Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl RpcResponse {
    fn into_result(self) -> ActivityResult<Value> {
        match (self.error, self.result) {
            (Some(err), _) => Err(ActivityError::Rpc {
                code: err.code,
                message: err.message,
            }),
            (None, Some(result)) => Ok(result),
            (None, None) => Err(ActivityError::UnexpectedShape(
                "RPC response has neither result nor error".to_string(),
            )),
        }
    }
}

/// JSON-RPC 2.0 client over a list of Hive API nodes.
///
/// Nodes are tried in order; a node that fails at the transport level (connection,
/// timeout, non-2xx, unreadable body) is skipped. An RPC `error` object is returned
/// as-is without trying the remaining nodes.
pub struct HiveRpcClient {
    client: reqwest::Client,
    nodes: Vec<String>,
}

impl HiveRpcClient {
    pub fn new(config: &HiveConfig) -> ActivityResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            nodes: config.nodes.clone(),
        })
    }

    async fn post(&self, node: &str, body: &RpcRequest<'_>) -> ActivityResult<RpcResponse> {
        let resp = self.client.post(node).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ActivityError::Status {
                status,
                url: node.to_string(),
            });
        }

        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl HiveRpc for HiveRpcClient {
    async fn call(&self, method: &str, params: Value) -> ActivityResult<Value> {
        let body = RpcRequest {
            jsonrpc: "2.0",
            method,
            params: &params,
            id: 1,
        };

        let response = first_available(&self.nodes, |node| self.post(node, &body)).await?;
        response.into_result()
    }
}

/// Runs `attempt` against each node in order and returns the first success.
async fn first_available<'n, T, F, Fut>(nodes: &'n [String], mut attempt: F) -> ActivityResult<T>
where
    F: FnMut(&'n str) -> Fut,
    Fut: Future<Output = ActivityResult<T>>,
{
    for node in nodes {
        match attempt(node).await {
            Ok(value) => return Ok(value),
            Err(e) => log::warn!("RPC node {node} failed: {e}"),
        }
    }
    Err(ActivityError::AllNodesFailed(nodes.len()))
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json, std::cell::RefCell};

    fn nodes() -> Vec<String> {
        vec![
            "https://a.example".to_string(),
            "https://b.example".to_string(),
            "https://c.example".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_first_available_skips_failed_nodes() {
        let nodes = nodes();
        let tried = RefCell::new(Vec::new());

        let result = first_available(&nodes, |node| {
            tried.borrow_mut().push(node.to_string());
            let ok = node.starts_with("https://b");
            async move {
                if ok {
                    Ok(node.to_string())
                } else {
                    Err(ActivityError::UnexpectedShape("down".to_string()))
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "https://b.example");
        assert_eq!(
            tried.into_inner(),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[tokio::test]
    async fn test_first_available_all_fail() {
        let nodes = nodes();
        let result: ActivityResult<()> = first_available(&nodes, |_| async {
            Err(ActivityError::UnexpectedShape("down".to_string()))
        })
        .await;
        assert!(matches!(result, Err(ActivityError::AllNodesFailed(3))));
    }

    #[test]
    fn test_response_result() {
        let resp: RpcResponse =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "result": [1, 2], "id": 1 })).unwrap();
        assert_eq!(resp.into_result().unwrap(), json!([1, 2]));
    }

    #[test]
    fn test_response_error() {
        let resp: RpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "error": { "code": -32602, "message": "Invalid parameters" },
            "id": 1
        }))
        .unwrap();
        assert!(matches!(
            resp.into_result(),
            Err(ActivityError::Rpc { code: -32602, ref message }) if message == "Invalid parameters"
        ));
    }

    #[test]
    fn test_response_null_result_is_unexpected() {
        let resp: RpcResponse =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "result": null, "id": 1 })).unwrap();
        // serde maps an explicit null into None
        assert!(matches!(
            resp.into_result(),
            Err(ActivityError::UnexpectedShape(_))
        ));
    }

    #[test]
    fn test_request_shape() {
        let params = json!({ "account": "alice", "limit": 10 });
        let body = RpcRequest {
            jsonrpc: "2.0",
            method: "bridge.account_notifications",
            params: &params,
            id: 1,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "method": "bridge.account_notifications",
                "params": { "account": "alice", "limit": 10 },
                "id": 1
            })
        );
    }
}
