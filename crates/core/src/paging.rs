use crate::traits::ContentQuery;
use crate::{FetchOptions, MergedResult, Page, QueryDocument, QueryError, Variables, PAGINATION_KEY};
use futures::future::join_all;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Fetch one page of `document` at `skip`, requiring a `pagination.count`
/// in the response.
pub async fn query_page<C>(
    client: &C,
    document: &QueryDocument,
    variables: &Variables,
    first: u64,
    skip: u64,
) -> Result<Page, QueryError>
where
    C: ContentQuery + ?Sized + Sync,
{
    let mut variables = variables.clone();
    variables.insert("first".to_string(), json!(first));
    variables.insert("skip".to_string(), json!(skip));

    let data = client.query(document, &variables).await?;
    let total_count = data
        .get(PAGINATION_KEY)
        .and_then(|pagination| pagination.get("count"))
        .and_then(Value::as_u64)
        .ok_or_else(|| QueryError::NotPageable {
            document: document.name.to_string(),
        })?;

    debug!(document = %document.name, first, skip, total_count, "fetched page");
    Ok(Page { data, total_count })
}

/// Walk a collection one page at a time until the reported count is covered.
///
/// `key` names the collection in the response; without it the first
/// non-pagination key of each page is used.
pub async fn fetch_all_records<C>(
    client: &C,
    document: &QueryDocument,
    key: Option<&str>,
    options: &FetchOptions,
) -> Result<Vec<Value>, QueryError>
where
    C: ContentQuery + ?Sized + Sync,
{
    let page_size = options.page_size.max(1);
    let variables = Variables::new();
    let mut records = Vec::new();
    let mut skip = 0;

    loop {
        let mut page = query_page(client, document, &variables, page_size, skip).await?;
        let collection = key
            .map(str::to_string)
            .or_else(|| page.collection_key().map(str::to_string));
        let items = match collection.and_then(|collection| page.data.remove(&collection)) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        let received = items.len();
        records.extend(items);

        if records.len() as u64 >= page.total_count {
            break;
        }
        if received == 0 {
            warn!(
                document = %document.name,
                fetched = records.len(),
                total_count = page.total_count,
                "collection ended before reported count"
            );
            break;
        }
        skip += page_size;
    }

    Ok(records)
}

/// Fetch every page of `document` with up to `options.concurrency` requests
/// in flight, merging all response keys into one result.
///
/// Pages are merged in offset order whatever order they complete in. A batch
/// is always awaited in full before its first failure (in offset order) is
/// returned.
pub async fn query_all<C>(
    client: &C,
    document: &QueryDocument,
    variables: &Variables,
    options: &FetchOptions,
) -> Result<MergedResult, QueryError>
where
    C: ContentQuery + ?Sized + Sync,
{
    let page_size = options.page_size.max(1);
    let concurrency = options.concurrency.max(1);

    let first = query_page(client, document, variables, page_size, 0).await?;
    let total_count = first.total_count;
    let mut merged = MergedResult::default();
    merged.merge(first.data);

    let step = usize::try_from(page_size).unwrap_or(usize::MAX);
    let offsets: Vec<u64> = (page_size..total_count).step_by(step).collect();

    for (index, batch) in offsets.chunks(concurrency).enumerate() {
        if index > 0 && !options.batch_delay.is_zero() {
            tokio::time::sleep(options.batch_delay).await;
        }

        debug!(
            document = %document.name,
            batch = index,
            requests = batch.len(),
            "flushing page batch"
        );

        let settled = join_all(batch.iter().map(|&skip| async move {
            let outcome = query_page(client, document, variables, page_size, skip).await;
            (skip, outcome)
        }))
        .await;

        let mut pages = Vec::with_capacity(settled.len());
        for (skip, outcome) in settled {
            match outcome {
                Ok(page) => pages.push(page),
                Err(error) => {
                    return Err(QueryError::BatchFailure {
                        skip,
                        source: Box::new(error),
                    })
                }
            }
        }

        for page in pages {
            merged.merge(page.data);
        }
    }

    Ok(merged)
}
