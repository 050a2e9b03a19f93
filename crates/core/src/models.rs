use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

pub type Variables = Map<String, Value>;

pub const PAGINATION_KEY: &str = "pagination";
pub const DEFAULT_PAGE_SIZE: u64 = 100;
pub const DEFAULT_CONCURRENCY: usize = 50;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// A GraphQL document sent to the content delivery endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDocument {
    pub name: &'static str,
    pub source: &'static str,
}

impl QueryDocument {
    pub const fn from_static(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }
}

/// One response of a paged query: the raw `data` object and its reported
/// `pagination.count`.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub data: Map<String, Value>,
    pub total_count: u64,
}

impl Page {
    /// First response key that is not the pagination block, in the order the
    /// backend sent them.
    pub fn collection_key(&self) -> Option<&str> {
        self.data
            .keys()
            .map(String::as_str)
            .find(|key| *key != PAGINATION_KEY)
    }
}

/// Accumulated response keys across pages.
///
/// Array values are concatenated in merge order. Any other value is replaced
/// by the most recently merged page, so callers must only request scalar
/// fields that are identical on every page (pagination metadata and similar).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedResult {
    values: Map<String, Value>,
}

impl MergedResult {
    pub fn merge(&mut self, data: Map<String, Value>) {
        for (key, value) in data {
            let value = match (self.values.get_mut(&key), value) {
                (Some(Value::Array(existing)), Value::Array(incoming)) => {
                    existing.extend(incoming);
                    continue;
                }
                (_, value) => value,
            };
            self.values.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn collection_key(&self) -> Option<&str> {
        self.values
            .keys()
            .map(String::as_str)
            .find(|key| *key != PAGINATION_KEY)
    }

    pub fn take_array(&mut self, key: &str) -> Vec<Value> {
        match self.values.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        }
    }
}

/// A CMS model as listed by the management API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemType {
    pub id: String,
    pub api_key: String,
    pub name: String,
}

/// A raw index match before it is tagged with its type key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedItem {
    pub id: String,
    pub item_type_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
    pub content_type_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub page_size: u64,
    pub concurrency: usize,
    pub batch_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub chunk_size: usize,
    pub fetch: FetchOptions,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            fetch: FetchOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteSearchParams {
    pub query: Option<String>,
    pub region_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSearchParams {
    pub query: Option<String>,
    pub region_id: Option<String>,
    pub member_category_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Site,
    Member,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Body of a search request as posted by the site.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(rename = "type", default)]
    pub kind: SearchKind,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    #[serde(default)]
    pub member_category_ids: Option<Vec<String>>,
}

impl SearchRequest {
    pub fn site_params(&self) -> SiteSearchParams {
        SiteSearchParams {
            query: self.query.clone(),
            region_id: self.region_id.clone(),
        }
    }

    pub fn member_params(&self) -> MemberSearchParams {
        MemberSearchParams {
            query: self.query.clone(),
            region_id: self.region_id.clone(),
            member_category_ids: self.member_category_ids.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub global: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn merge_concatenates_arrays_and_overwrites_scalars() {
        let mut merged = MergedResult::default();
        merged.merge(object(json!({"members": [1, 2], "pagination": {"count": 4}})));
        merged.merge(object(json!({"members": [3, 4], "pagination": {"count": 5}})));

        assert_eq!(merged.get("members"), Some(&json!([1, 2, 3, 4])));
        assert_eq!(merged.get("pagination"), Some(&json!({"count": 5})));
    }

    #[test]
    fn page_collection_key_skips_pagination() {
        let page = Page {
            data: object(json!({"pagination": {"count": 1}, "news": [{"id": "1"}]})),
            total_count: 1,
        };
        assert_eq!(page.collection_key(), Some("news"));
    }

    #[test]
    fn collection_key_follows_response_order() {
        let data: Map<String, Value> = serde_json::from_str(
            r#"{"pagination": {"count": 2}, "news": [{"id": "1"}], "members": [{"id": "2"}]}"#,
        )
        .unwrap();
        let page = Page {
            data: data.clone(),
            total_count: 2,
        };
        assert_eq!(page.collection_key(), Some("news"));

        let mut merged = MergedResult::default();
        merged.merge(data);
        assert_eq!(merged.collection_key(), Some("news"));
    }

    #[test]
    fn search_request_accepts_unknown_types() {
        let request: SearchRequest =
            serde_json::from_value(json!({"type": "commission", "query": "x"})).unwrap();
        assert_eq!(request.kind, SearchKind::Unknown);

        let request: SearchRequest = serde_json::from_value(json!({"query": "konst"})).unwrap();
        assert_eq!(request.kind, SearchKind::Unknown);

        let request: SearchRequest = serde_json::from_value(json!({
            "type": "member",
            "regionId": "42",
            "memberCategoryIds": ["7"]
        }))
        .unwrap();
        assert_eq!(request.kind, SearchKind::Member);
        assert_eq!(request.member_params().region_id.as_deref(), Some("42"));
        assert_eq!(request.query, None);
    }
}
