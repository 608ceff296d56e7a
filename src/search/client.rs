//! HTTP client for the recipe resolution service.

use log::debug;
use serde_json::Value;

use super::recipe::SearchResponse;
use super::types::SearchRequest;
use crate::config::ExplorerConfig;
use crate::error::ExplorerError;

#[derive(Clone, Debug)]
pub struct ResolverClient {
	endpoint: String,
	http_client: reqwest::Client,
}

impl ResolverClient {
	pub fn new(config: &ExplorerConfig) -> Result<Self, ExplorerError> {
		let builder = reqwest::Client::builder();
		#[cfg(not(target_arch = "wasm32"))]
		let builder = builder.timeout(std::time::Duration::from_secs(config.request_timeout_secs));
		let http_client = builder
			.build()
			.map_err(|e| ExplorerError::Request(e.to_string()))?;

		Ok(Self {
			endpoint: config.search_endpoint(),
			http_client,
		})
	}

	#[cfg(test)]
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// Post one search and decode the reply leniently.
	pub async fn resolve(&self, request: &SearchRequest) -> Result<SearchResponse, ExplorerError> {
		debug!("POST {} {:?}", self.endpoint, request);
		let response = self
			.http_client
			.post(&self.endpoint)
			.json(request)
			.send()
			.await?;

		let status = response.status();
		let body = response.text().await?;
		if !status.is_success() {
			return Err(ExplorerError::Status {
				status: status.as_u16(),
				message: error_message(&body).unwrap_or_else(|| {
					status.canonical_reason().unwrap_or("request failed").to_string()
				}),
			});
		}
		SearchResponse::from_json(&body)
	}
}

/// Extract the service's `{"error": "..."}` message, if the body carries one.
fn error_message(body: &str) -> Option<String> {
	let value: Value = serde_json::from_str(body).ok()?;
	value.get("error")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn service_error_bodies_are_extracted() {
		assert_eq!(
			error_message(r#"{"error": "TargetName required for Bidirectional"}"#).as_deref(),
			Some("TargetName required for Bidirectional")
		);
		assert_eq!(error_message("Bad Gateway"), None);
		assert_eq!(error_message(r#"{"status": "error"}"#), None);
	}

	#[test]
	fn endpoint_comes_from_config() {
		let config = ExplorerConfig {
			service_url: "http://recipes.local/".into(),
			..ExplorerConfig::default()
		};
		let client = ResolverClient::new(&config).unwrap();
		assert_eq!(client.endpoint(), "http://recipes.local/api/search");
	}
}
