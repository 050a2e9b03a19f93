use super::describe_failure;
use crate::traits::ContentIndex;
use crate::{IndexedItem, ItemType, QueryError, SearchError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::Url;

const DEFAULT_PAGE_LIMIT: u64 = 100;

/// Content management API client used for model listing and the free-text
/// record index.
pub struct ManagementClient {
    client: Arc<Client>,
    endpoint: String,
    api_token: String,
    page_limit: u64,
}

impl ManagementClient {
    pub fn new(endpoint: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            endpoint: endpoint.into(),
            api_token: api_token.into(),
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn with_page_limit(mut self, page_limit: u64) -> Self {
        self.page_limit = page_limit.max(1);
        self
    }

    fn url(&self, path: &str) -> Result<Url, SearchError> {
        let base = self.endpoint.trim_end_matches('/');
        Url::parse(&format!("{base}/{path}")).map_err(|error| QueryError::from(error).into())
    }

    async fn get_json(&self, url: Url) -> Result<Value, SearchError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .header("Accept", "application/json")
            .header("X-Api-Version", "3")
            .send()
            .await
            .map_err(QueryError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Index {
                details: describe_failure(status, &body),
            });
        }

        Ok(response.json().await.map_err(QueryError::from)?)
    }
}

#[async_trait]
impl ContentIndex for ManagementClient {
    async fn item_types(&self) -> Result<Vec<ItemType>, SearchError> {
        let body = self.get_json(self.url("item-types")?).await?;
        let rows = body
            .pointer("/data")
            .and_then(Value::as_array)
            .ok_or_else(|| SearchError::Index {
                details: "item type listing has no data".to_string(),
            })?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                Some(ItemType {
                    id: row.pointer("/id").and_then(Value::as_str)?.to_string(),
                    api_key: row
                        .pointer("/attributes/api_key")
                        .and_then(Value::as_str)?
                        .to_string(),
                    name: row
                        .pointer("/attributes/name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                })
            })
            .collect())
    }

    async fn search_items(
        &self,
        type_keys: &[String],
        query: Option<&str>,
    ) -> Result<Vec<IndexedItem>, SearchError> {
        let mut items = Vec::new();
        let mut offset = 0u64;

        loop {
            let mut url = self.url("items")?;
            {
                let mut pairs = url.query_pairs_mut();
                pairs.append_pair("filter[type]", &type_keys.join(","));
                if let Some(query) = query {
                    pairs.append_pair("filter[query]", query);
                    pairs.append_pair("order_by", "_rank_DESC");
                }
                pairs.append_pair("page[offset]", &offset.to_string());
                pairs.append_pair("page[limit]", &self.page_limit.to_string());
            }

            let body = self.get_json(url).await?;
            let rows = body
                .pointer("/data")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let total_count = body
                .pointer("/meta/total_count")
                .and_then(Value::as_u64)
                .unwrap_or_default();

            let received = rows.len() as u64;
            items.extend(rows.iter().filter_map(|row| {
                Some(IndexedItem {
                    id: row.pointer("/id").and_then(Value::as_str)?.to_string(),
                    item_type_id: row
                        .pointer("/relationships/item_type/data/id")
                        .and_then(Value::as_str)?
                        .to_string(),
                })
            }));

            debug!(offset, received, total_count, "index page");
            offset += received;
            if received == 0 || offset >= total_count {
                break;
            }
        }

        Ok(items)
    }
}
