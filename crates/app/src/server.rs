use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use cms_search_core::{ContentIndex, ContentQuery, SearchAggregator, SearchRequest};
use serde_json::json;
use std::sync::Arc;
use tracing::error;

pub fn router<Q, I>(aggregator: Arc<SearchAggregator<Q, I>>) -> Router
where
    Q: ContentQuery + Send + Sync + 'static,
    I: ContentIndex + Send + Sync + 'static,
{
    Router::new()
        .route("/api/search", post(search::<Q, I>))
        .with_state(aggregator)
}

async fn search<Q, I>(
    State(aggregator): State<Arc<SearchAggregator<Q, I>>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Response
where
    Q: ContentQuery + Send + Sync + 'static,
    I: ContentIndex + Send + Sync + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let message = rejection.body_text();
            error!(error = %message, "unreadable search request");
            return server_error(message);
        }
    };

    match aggregator.search(&request).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(failure) => {
            error!(kind = ?request.kind, error = %failure, "search failed");
            server_error(failure.to_string())
        }
    }
}

fn server_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
