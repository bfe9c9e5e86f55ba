//! # Web Search Tool
//!
//! `search_web` radkit tool handed to the researcher agent.
//! Queries SearXNG instances and never fails the agent run: when no backend
//! answers, the tool reports that nothing could be searched.

use radkit::macros::tool;
use radkit::tools::ToolResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_MAX_RESULTS: u32 = 5;

/// Arguments for web search
#[derive(Deserialize, JsonSchema)]
pub struct SearchWebArgs {
    /// Search query
    pub query: String,
    /// Maximum number of results (default: 5)
    pub max_results: Option<u32>,
}

/// Search the web for information
#[tool(
    description = "Search the web for information about a topic. Returns search results with titles, URLs and snippets."
)]
pub async fn search_web(args: SearchWebArgs) -> ToolResult {
    let max_results = args.max_results.unwrap_or(DEFAULT_MAX_RESULTS);

    if let Some(results) = try_searxng(&args.query, max_results).await {
        return ToolResult::success(json!({
            "query": args.query,
            "source": "searxng",
            "results": results
        }));
    }

    tracing::debug!(query = %args.query, "no search backend answered");
    ToolResult::success(json!({
        "query": args.query,
        "source": "none",
        "results": [],
        "message": "No search backend available. Answer from your own knowledge."
    }))
}

/// Endpoints tried in order: `SEARXNG_URL`, public instances, local fallback.
fn searxng_endpoints(custom_url: Option<&str>) -> Vec<String> {
    let mut endpoints = Vec::new();
    if let Some(url) = custom_url.filter(|u| !u.trim().is_empty()) {
        endpoints.push(format!("{}/search", url.trim().trim_end_matches('/')));
    }
    endpoints.extend([
        "https://searx.be/search".to_string(),
        "https://search.sapti.me/search".to_string(),
        "https://searx.tiekoetter.com/search".to_string(),
        "http://localhost:8888/search".to_string(),
    ]);
    endpoints
}

async fn try_searxng(query: &str, max_results: u32) -> Option<Vec<Value>> {
    let custom_url = std::env::var("SEARXNG_URL").ok();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .ok()?;

    for endpoint in searxng_endpoints(custom_url.as_deref()) {
        let url = format!("{}?q={}&format=json", endpoint, urlencoding::encode(query));
        let Ok(response) = client.get(&url).send().await else {
            continue;
        };
        if let Ok(body) = response.json::<Value>().await {
            if let Some(results) = summarize_results(&body, max_results) {
                return Some(results);
            }
        }
    }

    None
}

/// Reduce a SearXNG JSON response to title/url/snippet triples.
fn summarize_results(body: &Value, max_results: u32) -> Option<Vec<Value>> {
    let results = body.get("results")?.as_array()?;
    let field = |r: &Value, key: &str| r.get(key).and_then(Value::as_str).unwrap_or("").to_string();
    Some(
        results
            .iter()
            .take(max_results as usize)
            .map(|r| {
                json!({
                    "title": field(r, "title"),
                    "url": field(r, "url"),
                    "snippet": field(r, "content")
                })
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_endpoint_comes_first() {
        let endpoints = searxng_endpoints(Some("https://search.example.org/"));
        assert_eq!(endpoints[0], "https://search.example.org/search");
        assert_eq!(endpoints.len(), 5);
    }

    #[test]
    fn test_blank_custom_endpoint_ignored() {
        assert_eq!(searxng_endpoints(Some("  ")).len(), 4);
        assert_eq!(searxng_endpoints(None).len(), 4);
    }

    #[test]
    fn test_summarize_results_limits_and_maps() {
        let body = json!({
            "results": [
                {"title": "Cats", "url": "https://a", "content": "Cats purr."},
                {"title": "Dogs", "url": "https://b"},
                {"title": "Birds", "url": "https://c", "content": "Birds fly."}
            ]
        });
        let results = summarize_results(&body, 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["snippet"], "Cats purr.");
        assert_eq!(results[1]["snippet"], "");
    }

    #[test]
    fn test_summarize_results_without_results_key() {
        assert!(summarize_results(&json!({"error": "rate limited"}), 5).is_none());
    }
}
