//! Wire types for the dialog platform's webhook protocol.
//!
//! The platform keeps all conversation state on its side and echoes it back
//! as output contexts on every turn; the handler merges those into a single
//! parameter map and emits the next turn's contexts in the response.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Turns a context stays active before the platform discards it.
pub const CONTEXT_LIFESPAN: i32 = 30;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    pub query_result: QueryResult,
    pub session: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub intent: IntentRef,
    pub parameters: Map<String, Value>,
    pub output_contexts: Vec<InboundContext>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRef {
    pub display_name: String,
}

/// An inbound context. Only the parameter payload matters here; the
/// context's own name is ignored when merging.
#[derive(Debug, Deserialize)]
pub struct InboundContext {
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub output_contexts: Vec<OutboundContext>,
}

impl WebhookResponse {
    pub fn text(fulfillment_text: impl Into<String>) -> Self {
        Self {
            fulfillment_text: fulfillment_text.into(),
            output_contexts: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: OutboundContext) -> Self {
        self.output_contexts.push(context);
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundContext {
    pub name: String,
    pub lifespan_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
}

impl OutboundContext {
    /// Context names are scoped to the caller's session:
    /// `{session}/contexts/{short_name}`.
    pub fn new(session: &str, short_name: &str) -> Self {
        Self {
            name: format!("{}/contexts/{}", session, short_name),
            lifespan_count: CONTEXT_LIFESPAN,
            parameters: None,
        }
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// Flatten every inbound context's parameters into one map. Later contexts
/// override earlier keys.
pub fn merge_context_parameters(contexts: &[InboundContext]) -> Map<String, Value> {
    let mut merged = Map::new();
    for context in contexts {
        for (key, value) in &context.parameters {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}

/// Extract a non-empty string parameter. Empty strings count as absent.
pub fn string_param(params: &Map<String, Value>, key: &str) -> Option<String> {
    match params.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Extract a required numeric parameter. The platform sends numbers as JSON
/// floats and echoes context values back as strings, so both are accepted.
/// Zero counts as absent, matching the platform's empty-value convention.
pub fn numeric_param(params: &Map<String, Value>, key: &str) -> Option<i64> {
    let n = match params.get(key)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => s.trim().parse::<f64>().ok()? as i64,
        _ => return None,
    };
    if n == 0 {
        None
    } else {
        Some(n)
    }
}

/// Render a parameter value for interpolation into fulfillment text.
/// Whole floats print without the trailing fraction.
pub fn display_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n),
        Value::Null => "none".to_string(),
        other => other.to_string(),
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(f) = n.as_f64() {
        if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
            return format!("{}", f as i64);
        }
    }
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn merge_later_contexts_override_earlier() {
        let contexts: Vec<InboundContext> = serde_json::from_value(json!([
            { "name": "a", "parameters": { "movie_title": "Dune", "seats": 2.0 } },
            { "name": "b", "parameters": { "seats": 4.0 } },
            { "name": "c" },
        ]))
        .unwrap();

        let merged = merge_context_parameters(&contexts);
        assert_eq!(merged.get("movie_title"), Some(&json!("Dune")));
        assert_eq!(merged.get("seats"), Some(&json!(4.0)));
    }

    #[test]
    fn string_param_rejects_empty_and_non_strings() {
        let p = params(json!({ "a": "Dune", "b": "", "c": 3.0 }));
        assert_eq!(string_param(&p, "a").as_deref(), Some("Dune"));
        assert_eq!(string_param(&p, "b"), None);
        assert_eq!(string_param(&p, "c"), None);
        assert_eq!(string_param(&p, "missing"), None);
    }

    #[test]
    fn numeric_param_accepts_floats_and_strings() {
        let p = params(json!({ "f": 7.0, "i": 3, "s": "2", "frac": 2.9 }));
        assert_eq!(numeric_param(&p, "f"), Some(7));
        assert_eq!(numeric_param(&p, "i"), Some(3));
        assert_eq!(numeric_param(&p, "s"), Some(2));
        assert_eq!(numeric_param(&p, "frac"), Some(2));
    }

    #[test]
    fn numeric_param_treats_zero_and_junk_as_missing() {
        let p = params(json!({ "zero": 0, "fzero": 0.0, "empty": "", "word": "abc", "null": null }));
        assert_eq!(numeric_param(&p, "zero"), None);
        assert_eq!(numeric_param(&p, "fzero"), None);
        assert_eq!(numeric_param(&p, "empty"), None);
        assert_eq!(numeric_param(&p, "word"), None);
        assert_eq!(numeric_param(&p, "null"), None);
        assert_eq!(numeric_param(&p, "missing"), None);
    }

    #[test]
    fn display_param_formats_whole_floats_without_fraction() {
        assert_eq!(display_param(&json!(2.0)), "2");
        assert_eq!(display_param(&json!(2.5)), "2.5");
        assert_eq!(display_param(&json!("Dune")), "Dune");
        assert_eq!(display_param(&Value::Null), "none");
    }

    #[test]
    fn context_name_is_scoped_to_session() {
        let ctx = OutboundContext::new("projects/demo/agent/sessions/abc", "awaiting_seats");
        assert_eq!(
            ctx.name,
            "projects/demo/agent/sessions/abc/contexts/awaiting_seats"
        );
        assert_eq!(ctx.lifespan_count, 30);
        assert!(ctx.parameters.is_none());
    }

    #[test]
    fn response_omits_empty_context_list() {
        let body = serde_json::to_value(WebhookResponse::text("done")).unwrap();
        assert_eq!(body, json!({ "fulfillmentText": "done" }));
    }
}
