pub mod graphql;
pub mod management;

pub use graphql::GraphqlClient;
pub use management::ManagementClient;

use reqwest::StatusCode;
use serde_json::Value;

/// Describe a failed CMS response from its status and body.
///
/// Management API errors arrive as `data[].attributes` with a `code` and
/// optional field `details`; GraphQL errors as `errors[].message`. Anything
/// else is kept as trimmed text.
pub(crate) fn describe_failure(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    let reasons: Vec<String> = match &parsed {
        Some(value) => {
            if let Some(errors) = value.get("data").and_then(Value::as_array) {
                errors.iter().filter_map(describe_api_error).collect()
            } else if let Some(errors) = value.get("errors").and_then(Value::as_array) {
                errors
                    .iter()
                    .filter_map(|error| error.get("message").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            } else {
                Vec::new()
            }
        }
        None => Vec::new(),
    };

    if !reasons.is_empty() {
        format!("{status}: {}", reasons.join("; "))
    } else if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    }
}

fn describe_api_error(error: &Value) -> Option<String> {
    let attributes = error.get("attributes")?;
    let code = attributes.get("code").and_then(Value::as_str)?;

    let details: Vec<&Value> = match attributes.get("details") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(detail @ Value::Object(_)) => vec![detail],
        _ => Vec::new(),
    };

    let mut parts = Vec::new();
    for detail in details {
        match detail.get("messages") {
            Some(Value::Array(messages)) => parts.extend(
                messages
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string),
            ),
            Some(Value::String(message)) => parts.push(message.clone()),
            _ => {}
        }
        if let Some(fields) = detail.get("extraneous_attributes").and_then(Value::as_array) {
            let fields: Vec<&str> = fields.iter().filter_map(Value::as_str).collect();
            parts.push(format!("error fields: {}", fields.join(", ")));
        } else if let Some(field) = detail
            .get("field_label")
            .or_else(|| detail.get("field"))
            .and_then(Value::as_str)
        {
            let field_type = detail
                .get("field_type")
                .and_then(Value::as_str)
                .unwrap_or("field");
            let field_code = detail.get("code").and_then(Value::as_str).unwrap_or(code);
            parts.push(format!("{field} ({field_type}): {field_code}"));
        }
    }

    if parts.is_empty() {
        Some(code.to_string())
    } else {
        Some(format!("{code} ({})", parts.join(". ")))
    }
}
