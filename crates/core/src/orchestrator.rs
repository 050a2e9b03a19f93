use crate::paging::query_all;
use crate::queries::{SEARCH_MEMBERS, SEARCH_MEMBERS_FREE, SITE_SEARCH};
use crate::slug::record_to_slug;
use crate::text::{normalize_query, truncate_paragraph, DEFAULT_MIN_LENGTH};
use crate::traits::{ContentIndex, ContentQuery};
use crate::{
    IndexedItem, ItemType, MemberSearchParams, MergedResult, SearchError, SearchHit, SearchKind,
    SearchOptions, SearchRequest, SiteSearchParams, Variables,
};
use serde_json::{json, Map, Value};
use std::time::Instant;
use tracing::{debug, info};

/// A content type whose index hits are hydrated into full records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HydrationTarget {
    pub type_key: &'static str,
    pub variable: &'static str,
    pub response_key: &'static str,
}

pub static HYDRATION_TARGETS: [HydrationTarget; 3] = [
    HydrationTarget {
        type_key: "member",
        variable: "memberIds",
        response_key: "members",
    },
    HydrationTarget {
        type_key: "news",
        variable: "newsIds",
        response_key: "news",
    },
    HydrationTarget {
        type_key: "member_news",
        variable: "memberNewsIds",
        response_key: "memberNews",
    },
];

pub fn hydration_target(type_key: &str) -> Option<&'static HydrationTarget> {
    HYDRATION_TARGETS
        .iter()
        .find(|target| target.type_key == type_key)
}

pub struct SearchAggregator<Q, I>
where
    Q: ContentQuery,
    I: ContentIndex,
{
    content: Q,
    index: I,
    options: SearchOptions,
}

impl<Q, I> SearchAggregator<Q, I>
where
    Q: ContentQuery + Send + Sync,
    I: ContentIndex + Send + Sync,
{
    pub fn new(content: Q, index: I) -> Self {
        Self::with_options(content, index, SearchOptions::default())
    }

    pub fn with_options(content: Q, index: I, options: SearchOptions) -> Self {
        Self {
            content,
            index,
            options,
        }
    }

    /// Dispatch a posted search request. Unknown request types yield an
    /// empty mapping.
    pub async fn search(&self, request: &SearchRequest) -> Result<Map<String, Value>, SearchError> {
        match request.kind {
            SearchKind::Site => self.site_search(&request.site_params()).await,
            SearchKind::Member => {
                let members = self.member_search(&request.member_params()).await?;
                let mut result = Map::new();
                result.insert("members".to_string(), Value::Array(members));
                Ok(result)
            }
            SearchKind::Unknown => Ok(Map::new()),
        }
    }

    /// Search the content index across all types and hydrate the supported
    /// ones, keyed by their response key. Types without records are left out.
    pub async fn site_search(
        &self,
        params: &SiteSearchParams,
    ) -> Result<Map<String, Value>, SearchError> {
        let query = normalize_query(params.query.as_deref());
        if query.is_none() && params.region_id.is_none() {
            return Ok(Map::new());
        }

        let started = Instant::now();
        let item_types = self.index.item_types().await?;
        let type_keys: Vec<String> = item_types.iter().map(|kind| kind.api_key.clone()).collect();
        let matches = self.index.search_items(&type_keys, query.as_deref()).await?;

        let hits: Vec<SearchHit> = tag_hits(&item_types, matches)
            .into_iter()
            .filter(|hit| hydration_target(&hit.content_type_key).is_some())
            .collect();

        let chunk_size = self.options.chunk_size.max(1);
        let mut merged = MergedResult::default();
        for (chunk, batch) in hits.chunks(chunk_size).enumerate() {
            debug!(chunk, size = batch.len(), "hydrating search hits");
            let variables = hydration_variables(batch, chunk_size);
            let data = self
                .content
                .query(&SITE_SEARCH, &variables)
                .await
                .map_err(|source| SearchError::HydrationChunk { chunk, source })?;
            merged.merge(data);
        }

        let mut results = Map::new();
        for target in &HYDRATION_TARGETS {
            let records = merged.take_array(target.response_key);
            if records.is_empty() {
                continue;
            }
            let records = records
                .into_iter()
                .map(|record| decorate_record(record, &item_types))
                .collect::<Result<Vec<_>, SearchError>>()?;
            results.insert(target.response_key.to_string(), Value::Array(records));
        }

        info!(
            query = query.as_deref().unwrap_or_default(),
            hits = hits.len(),
            types = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "site search"
        );
        Ok(results)
    }

    /// Member directory search, filtered by region and categories and, with
    /// a query, by name or bio.
    pub async fn member_search(
        &self,
        params: &MemberSearchParams,
    ) -> Result<Vec<Value>, SearchError> {
        let mut variables = Variables::new();
        if let Some(region_id) = &params.region_id {
            variables.insert("regionId".to_string(), json!(region_id));
        }
        if let Some(category_ids) = &params.member_category_ids {
            variables.insert("memberCategoryIds".to_string(), json!(category_ids));
        }

        let document = match normalize_query(params.query.as_deref()) {
            Some(query) => {
                variables.insert("query".to_string(), json!(query));
                &SEARCH_MEMBERS_FREE
            }
            None => &SEARCH_MEMBERS,
        };

        let mut merged = query_all(&self.content, document, &variables, &self.options.fetch).await?;
        Ok(merged.take_array("members"))
    }
}

fn tag_hits(item_types: &[ItemType], matches: Vec<IndexedItem>) -> Vec<SearchHit> {
    matches
        .into_iter()
        .filter_map(|item| {
            let kind = item_types.iter().find(|kind| kind.id == item.item_type_id);
            if kind.is_none() {
                debug!(id = %item.id, item_type = %item.item_type_id, "hit with unknown item type");
            }
            kind.map(|kind| SearchHit {
                id: item.id,
                content_type_key: kind.api_key.clone(),
            })
        })
        .collect()
}

fn hydration_variables(hits: &[SearchHit], chunk_size: usize) -> Variables {
    let mut variables = Variables::new();
    for target in &HYDRATION_TARGETS {
        let ids: Vec<&str> = hits
            .iter()
            .filter(|hit| hit.content_type_key == target.type_key)
            .map(|hit| hit.id.as_str())
            .collect();
        variables.insert(target.variable.to_string(), json!(ids));
    }
    variables.insert("first".to_string(), json!(chunk_size));
    variables.insert("skip".to_string(), json!(0));
    variables
}

fn decorate_record(record: Value, item_types: &[ItemType]) -> Result<Value, SearchError> {
    let slug = record_to_slug(&record, None)?;
    let mut fields = match record {
        Value::Object(fields) => fields,
        other => return Ok(other),
    };

    let category = fields
        .get("_modelApiKey")
        .and_then(Value::as_str)
        .and_then(|api_key| item_types.iter().find(|kind| kind.api_key == api_key))
        .map(|kind| Value::String(kind.name.clone()))
        .unwrap_or(Value::Null);
    fields.insert("category".to_string(), category);

    if let Some(text) = fields.get("text").and_then(Value::as_str) {
        let preview = truncate_paragraph(text, 1, false, DEFAULT_MIN_LENGTH);
        fields.insert("text".to_string(), Value::String(preview));
    }

    fields.insert("slug".to_string(), Value::String(slug));
    Ok(Value::Object(fields))
}
