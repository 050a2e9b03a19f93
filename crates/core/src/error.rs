use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("not a pageable query: {document} has no pagination.count")]
    NotPageable { document: String },

    #[error("page request at skip={skip} failed: {source}")]
    BatchFailure {
        skip: u64,
        #[source]
        source: Box<QueryError>,
    },

    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("graphql error: {0}")]
    Graphql(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("hydration chunk {chunk} failed: {source}")]
    HydrationChunk {
        chunk: usize,
        #[source]
        source: QueryError,
    },

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("invalid response from content index: {details}")]
    Index { details: String },

    #[error(transparent)]
    Slug(#[from] SlugError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("record is empty")]
    MissingRecord,

    #[error("{typename} record has no slug")]
    MissingSlug { typename: String },

    #[error("{0} is an unknown record type")]
    UnknownType(String),
}
