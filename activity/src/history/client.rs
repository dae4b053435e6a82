use {
    super::{HistoryPageSource, PageRequest, RawRecord},
    crate::{
        config::HistoryConfig,
        error::{ActivityError, ActivityResult},
    },
    async_trait::async_trait,
    serde_json::Value,
};

/// HTTP client for `GET <base>/accountHistory`.
pub struct HiveEngineHistoryClient {
    client: reqwest::Client,
    url: String,
}

impl HiveEngineHistoryClient {
    /// Builds the client; the configured timeout applies to every page request.
    pub fn new(config: &HistoryConfig) -> ActivityResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            url: format!("{}/accountHistory", config.base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl HistoryPageSource for HiveEngineHistoryClient {
    async fn fetch_page(&self, request: &PageRequest) -> ActivityResult<Vec<RawRecord>> {
        let resp = self.client.get(&self.url).query(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ActivityError::Status {
                status,
                url: self.url.clone(),
            });
        }

        let body = resp.text().await?;
        log::debug!(
            "accountHistory offset={} returned {} bytes",
            request.offset,
            body.len()
        );
        parse_page(&body)
    }
}

/// Decodes a page body: a JSON array of objects.
fn parse_page(body: &str) -> ActivityResult<Vec<RawRecord>> {
    match serde_json::from_str::<Value>(body)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => Ok(record),
                other => Err(ActivityError::UnexpectedShape(format!(
                    "expected a record object, got {other}"
                ))),
            })
            .collect(),
        other => Err(ActivityError::UnexpectedShape(format!(
            "expected an array of records, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
