pub mod error;
pub mod models;
pub mod orchestrator;
pub mod paging;
pub mod paths;
pub mod queries;
pub mod slug;
pub mod stores;
pub mod text;
pub mod traits;

pub use error::{QueryError, SearchError, SlugError};
pub use models::{
    FetchOptions, IndexedItem, ItemType, MemberSearchParams, MergedResult, Page, QueryDocument,
    Region, SearchHit, SearchKind, SearchOptions, SearchRequest, SiteSearchParams, Variables,
    DEFAULT_BATCH_DELAY, DEFAULT_CHUNK_SIZE, DEFAULT_CONCURRENCY, DEFAULT_PAGE_SIZE,
    PAGINATION_KEY,
};
pub use orchestrator::{hydration_target, HydrationTarget, SearchAggregator, HYDRATION_TARGETS};
pub use paging::{fetch_all_records, query_all, query_page};
pub use paths::{
    chunk_array, static_page_paths, static_pagination_paths, StaticPath,
    DEFAULT_LISTING_PAGE_SIZE,
};
pub use slug::record_to_slug;
pub use stores::{GraphqlClient, ManagementClient};
pub use text::{normalize_query, truncate_paragraph, DEFAULT_MIN_LENGTH};
pub use traits::{ContentIndex, ContentQuery};
