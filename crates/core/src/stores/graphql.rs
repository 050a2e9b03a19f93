use super::describe_failure;
use crate::traits::ContentQuery;
use crate::{QueryDocument, QueryError, Variables};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use std::sync::Arc;

pub struct GraphqlClient {
    client: Arc<Client>,
    endpoint: String,
    api_token: Option<String>,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            endpoint: endpoint.into(),
            api_token,
        }
    }
}

#[async_trait]
impl ContentQuery for GraphqlClient {
    async fn query(
        &self,
        document: &QueryDocument,
        variables: &Variables,
    ) -> Result<Map<String, Value>, QueryError> {
        let mut request = self.client.post(&self.endpoint).json(&json!({
            "query": document.source,
            "operationName": document.name,
            "variables": variables,
        }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::BackendResponse {
                backend: "graphql".to_string(),
                details: describe_failure(status, &body),
            });
        }

        let mut body: Map<String, Value> = response.json().await?;

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let message = errors
                    .iter()
                    .map(|error| {
                        error
                            .get("message")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                            .unwrap_or_else(|| error.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(QueryError::Graphql(message));
            }
        }

        match body.remove("data") {
            Some(Value::Object(data)) => Ok(data),
            _ => Err(QueryError::BackendResponse {
                backend: "graphql".to_string(),
                details: format!("{} returned no data", document.name),
            }),
        }
    }
}
