use crate::{IndexedItem, ItemType, QueryDocument, QueryError, SearchError, Variables};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Content delivery seam: send a document plus variables, get the `data`
/// object back.
#[async_trait]
pub trait ContentQuery {
    async fn query(
        &self,
        document: &QueryDocument,
        variables: &Variables,
    ) -> Result<Map<String, Value>, QueryError>;
}

/// Content index seam: model listing and relevance-ranked free-text search.
#[async_trait]
pub trait ContentIndex {
    async fn item_types(&self) -> Result<Vec<ItemType>, SearchError>;

    /// Every match across `type_keys`, best first. Implementations walk all
    /// pages themselves.
    async fn search_items(
        &self,
        type_keys: &[String],
        query: Option<&str>,
    ) -> Result<Vec<IndexedItem>, SearchError>;
}
