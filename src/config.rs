//! Runtime configuration, embedded at build time from `assets/explorer.json`.

use log::warn;
use serde::Deserialize;

const EMBEDDED_CONFIG: &str = include_str!("../assets/explorer.json");

/// Tunables for the service endpoint, the picker and the search animations.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ExplorerConfig {
	/// Base URL of the resolution service; `/api/search` is appended.
	pub service_url: String,
	/// Elements per picker page.
	pub page_size: usize,
	/// Percentage added per progress tick while a request is outstanding.
	pub progress_step: u8,
	/// Progress never passes this value until the response arrives.
	pub progress_ceiling: u8,
	pub progress_tick_ms: u64,
	/// Cadence at which additional recipes are revealed.
	pub reveal_interval_ms: u64,
	pub zoom_min: f64,
	pub zoom_max: f64,
	/// Additive zoom change for the +/- buttons.
	pub zoom_step: f64,
	/// Only honoured on native targets; browser fetch has no client timeout.
	pub request_timeout_secs: u64,
}

impl Default for ExplorerConfig {
	fn default() -> Self {
		Self {
			service_url: "http://localhost:8081".into(),
			page_size: 8,
			progress_step: 5,
			progress_ceiling: 95,
			progress_tick_ms: 200,
			reveal_interval_ms: 400,
			zoom_min: 0.25,
			zoom_max: 3.0,
			zoom_step: 0.1,
			request_timeout_secs: 30,
		}
	}
}

impl ExplorerConfig {
	/// Load the embedded configuration, falling back to defaults if it is unreadable.
	pub fn load() -> Self {
		Self::from_json(EMBEDDED_CONFIG).unwrap_or_else(|err| {
			warn!("Invalid embedded config, using defaults: {err}");
			Self::default()
		})
	}

	/// Parse a (possibly partial) configuration and repair inconsistent values.
	pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
		let mut config: Self = serde_json::from_str(raw)?;
		config.sanitize();
		Ok(config)
	}

	/// Endpoint the search request is posted to.
	pub fn search_endpoint(&self) -> String {
		format!("{}/api/search", self.service_url.trim_end_matches('/'))
	}

	fn sanitize(&mut self) {
		let defaults = Self::default();
		if self.page_size == 0 {
			self.page_size = defaults.page_size;
		}
		self.progress_ceiling = self.progress_ceiling.min(99);
		self.progress_step = self.progress_step.max(1);
		if !(self.zoom_min > 0.0 && self.zoom_min < self.zoom_max) {
			self.zoom_min = defaults.zoom_min;
			self.zoom_max = defaults.zoom_max;
		}
		if self.zoom_step <= 0.0 {
			self.zoom_step = defaults.zoom_step;
		}
	}
}
