mod server;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use cms_search_core::queries::{ALL_MEMBERS, ALL_MEMBER_NEWS, ALL_NEWS, ALL_REGIONS};
use cms_search_core::{
    fetch_all_records, query_all, static_page_paths, static_pagination_paths, FetchOptions,
    GraphqlClient, ManagementClient, QueryDocument, Region, SearchAggregator, SearchKind,
    SearchOptions, SearchRequest, Variables, DEFAULT_LISTING_PAGE_SIZE,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "cms-search", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// GraphQL content delivery endpoint
    #[arg(long, env = "GRAPHQL_API_ENDPOINT", default_value = "https://graphql.datocms.com")]
    graphql_url: String,

    /// Content management API endpoint
    #[arg(long, env = "CMA_API_ENDPOINT", default_value = "https://site-api.datocms.com")]
    management_url: String,

    /// API token shared by both endpoints
    #[arg(long, env = "GRAPHQL_API_TOKEN", hide_env_values = true)]
    api_token: String,

    /// Records requested per page
    #[arg(long, default_value = "100")]
    page_size: u64,

    /// Page requests in flight per batch
    #[arg(long, default_value = "50")]
    concurrency: usize,

    /// Pause between page batches, in milliseconds
    #[arg(long, default_value = "100")]
    batch_delay_ms: u64,

    /// Index hits hydrated per query
    #[arg(long, default_value = "100")]
    chunk_size: usize,
}

impl Cli {
    fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            page_size: self.page_size,
            concurrency: self.concurrency,
            batch_delay: Duration::from_millis(self.batch_delay_ms),
        }
    }

    fn search_options(&self) -> SearchOptions {
        SearchOptions {
            chunk_size: self.chunk_size,
            fetch: self.fetch_options(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Serve the search endpoint at POST /api/search.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
    /// Run a search and print the JSON result.
    Search {
        /// Free-text query
        #[arg(long)]
        query: Option<String>,
        /// Search the member directory instead of the whole site.
        #[arg(long, default_value_t = false)]
        members: bool,
        /// Region record id
        #[arg(long)]
        region_id: Option<String>,
        /// Member category record ids
        #[arg(long)]
        member_category_id: Vec<String>,
    },
    /// Fetch a complete collection and print it as JSON.
    FetchAll {
        #[arg(long, value_enum)]
        collection: Collection,
        /// Fetch one page at a time instead of in concurrent batches.
        #[arg(long, default_value_t = false)]
        sequential: bool,
    },
    /// Print static generation paths for a collection.
    Paths {
        #[arg(long, value_enum)]
        collection: Collection,
        /// Route segment the record slug is bound to.
        #[arg(long)]
        segment: String,
        /// Build per-region listing paths.
        #[arg(long, default_value_t = false)]
        regional: bool,
        /// Build paginated listing paths instead of one path per record.
        #[arg(long, default_value_t = false)]
        paginated: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Collection {
    Members,
    News,
    MemberNews,
}

impl Collection {
    fn document(self) -> &'static QueryDocument {
        match self {
            Collection::Members => &ALL_MEMBERS,
            Collection::News => &ALL_NEWS,
            Collection::MemberNews => &ALL_MEMBER_NEWS,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let fetch_options = cli.fetch_options();
    let search_options = cli.search_options();
    let content = GraphqlClient::new(&cli.graphql_url, Some(cli.api_token.clone()));
    let index = ManagementClient::new(&cli.management_url, &cli.api_token);
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "cms-search boot"
    );

    match cli.command {
        Command::Serve { bind } => {
            let aggregator = SearchAggregator::with_options(content, index, search_options);
            let app = server::router(Arc::new(aggregator));

            let listener = tokio::net::TcpListener::bind(bind).await?;
            info!(address = %bind, "serving search endpoint");
            axum::serve(listener, app).await?;
        }
        Command::Search {
            query,
            members,
            region_id,
            member_category_id,
        } => {
            let aggregator = SearchAggregator::with_options(content, index, search_options);
            let request = SearchRequest {
                kind: if members {
                    SearchKind::Member
                } else {
                    SearchKind::Site
                },
                query,
                region_id,
                member_category_ids: if member_category_id.is_empty() {
                    None
                } else {
                    Some(member_category_id)
                },
            };

            let result = aggregator.search(&request).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::FetchAll {
            collection,
            sequential,
        } => {
            let document = collection.document();
            let records = if sequential {
                fetch_all_records(&content, document, None, &fetch_options).await?
            } else {
                let mut merged =
                    query_all(&content, document, &Variables::new(), &fetch_options).await?;
                let key = merged
                    .collection_key()
                    .map(str::to_string)
                    .unwrap_or_default();
                merged.take_array(&key)
            };

            info!(collection = %document.name, count = records.len(), "fetched collection");
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Command::Paths {
            collection,
            segment,
            regional,
            paginated,
        } => {
            let records =
                fetch_all_records(&content, collection.document(), None, &fetch_options).await?;

            let paths = if paginated {
                let regions = if regional {
                    let rows =
                        fetch_all_records(&content, &ALL_REGIONS, Some("regions"), &fetch_options)
                            .await?;
                    Some(
                        rows.into_iter()
                            .map(serde_json::from_value::<Region>)
                            .collect::<Result<Vec<_>, _>>()?,
                    )
                } else {
                    None
                };
                static_pagination_paths(
                    &records,
                    &segment,
                    regions.as_deref(),
                    DEFAULT_LISTING_PAGE_SIZE,
                )
            } else {
                static_page_paths(&records, &segment, regional)
            };

            println!("{}", serde_json::to_string_pretty(&paths)?);
        }
    }

    Ok(())
}
