//! Search lifecycle: configuration, progress, results and stale-response protection.
//!
//! The session itself performs no I/O. [`SearchSession::start_search`] hands out a
//! [`PendingSearch`] tagged with a generation; whoever sends the request reports back through
//! [`SearchSession::complete`] with that generation. Any report or progress tick carrying an
//! older generation is discarded, so a superseded or reset search can never publish.

use log::{debug, info, warn};

use super::recipe::{RecipeNode, SearchResponse};
use super::types::{ConfigPatch, SearchConfig, SearchRequest, SessionMetrics, Strategy};
use crate::catalog::ElementCatalog;
use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::selection::Selection;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchState {
	#[default]
	Idle,
	Searching,
	Succeeded,
	Failed,
}

/// Monotonic tag identifying one `start_search` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
	fn next(self) -> Self {
		Self(self.0 + 1)
	}
}

/// A request the caller must send, and the generation to report its outcome under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSearch {
	pub generation: Generation,
	pub request: SearchRequest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
	Applied,
	/// A newer search or a reset happened first; the outcome was dropped.
	Stale,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchSession {
	config: SearchConfig,
	state: SearchState,
	generation: Generation,
	metrics: SessionMetrics,
	results: Vec<RecipeNode>,
	last_error: Option<ExplorerError>,
	progress_step: u8,
	progress_ceiling: u8,
}

impl Default for SearchSession {
	fn default() -> Self {
		Self::new(&ExplorerConfig::default())
	}
}

impl SearchSession {
	pub fn new(config: &ExplorerConfig) -> Self {
		Self {
			config: SearchConfig::default(),
			state: SearchState::Idle,
			generation: Generation::default(),
			metrics: SessionMetrics::default(),
			results: Vec::new(),
			last_error: None,
			progress_step: config.progress_step,
			progress_ceiling: config.progress_ceiling,
		}
	}

	pub fn config(&self) -> &SearchConfig {
		&self.config
	}

	pub fn strategy(&self) -> Strategy {
		self.config.strategy
	}

	#[cfg(test)]
	pub fn state(&self) -> SearchState {
		self.state
	}

	pub fn is_searching(&self) -> bool {
		self.state == SearchState::Searching
	}

	#[cfg(test)]
	pub fn generation(&self) -> Generation {
		self.generation
	}

	pub fn metrics(&self) -> SessionMetrics {
		self.metrics
	}

	pub fn results(&self) -> &[RecipeNode] {
		&self.results
	}

	pub fn last_error(&self) -> Option<&ExplorerError> {
		self.last_error.as_ref()
	}

	/// Merge a config change. It applies to the next search only.
	pub fn configure(&mut self, patch: ConfigPatch) {
		self.config.apply(patch);
	}

	/// Begin a search for `selection`, superseding any search still in flight.
	///
	/// Returns `None`, leaving the session untouched, when nothing is selected.
	pub fn start_search(&mut self, selection: &Selection) -> Option<PendingSearch> {
		let source = selection.source()?;
		let target = match self.config.strategy {
			Strategy::Bidirectional => selection.target().map(|e| e.name.clone()),
			Strategy::Bfs | Strategy::Dfs => None,
		};

		if self.is_searching() {
			info!("Superseding in-flight search {:?}", self.generation);
		}
		self.generation = self.generation.next();
		self.state = SearchState::Searching;
		self.metrics = SessionMetrics::default();
		self.results.clear();
		self.last_error = None;

		let request = SearchRequest {
			element_name: source.name.clone(),
			target_name: target,
			algorithm: self.config.strategy,
			recipe_type: self.config.selection_mode,
			max_recipes: self.config.max_recipes,
		};
		info!(
			"Starting {} search for {} ({:?})",
			request.algorithm, request.element_name, self.generation
		);
		Some(PendingSearch {
			generation: self.generation,
			request,
		})
	}

	/// Advance simulated progress for `generation`. Returns whether further ticks are useful.
	pub fn tick_progress(&mut self, generation: Generation) -> bool {
		if generation != self.generation || !self.is_searching() {
			return false;
		}
		let progress = &mut self.metrics.progress_percent;
		*progress = progress
			.saturating_add(self.progress_step)
			.min(self.progress_ceiling);
		*progress < self.progress_ceiling
	}

	/// Apply the outcome of the request sent for `generation`.
	///
	/// Failures are stored for display and also returned; stale outcomes are dropped
	/// silently whether they succeeded or not.
	pub fn complete(
		&mut self,
		generation: Generation,
		outcome: Result<SearchResponse, ExplorerError>,
		elapsed_ms: u64,
		catalog: &ElementCatalog,
	) -> Result<Completion, ExplorerError> {
		if generation != self.generation || !self.is_searching() {
			debug!("Discarding outcome of stale search {generation:?}");
			return Ok(Completion::Stale);
		}

		match outcome {
			Ok(response) => {
				let mut results = response.results;
				for node in &mut results {
					node.attach_icons(catalog);
				}
				self.metrics = SessionMetrics {
					execution_time_ms: elapsed_ms,
					nodes_visited: response.nodes_visited.unwrap_or(0),
					total_recipes: results.len() as u64,
					progress_percent: 100,
				};
				info!(
					"Search {generation:?} found {} recipe(s) in {elapsed_ms}ms (service reported {:?}ms)",
					results.len(),
					response.execution_time_ms
				);
				self.results = results;
				self.state = SearchState::Succeeded;
				Ok(Completion::Applied)
			}
			Err(err) => {
				warn!("Search {generation:?} failed: {err}");
				self.metrics.progress_percent = 0;
				self.state = SearchState::Failed;
				self.last_error = Some(err.clone());
				Err(err)
			}
		}
	}

	/// Drop results and metrics and return to `Idle`, invalidating anything in flight.
	pub fn reset_search(&mut self) {
		self.generation = self.generation.next();
		self.state = SearchState::Idle;
		self.metrics = SessionMetrics::default();
		self.results.clear();
		self.last_error = None;
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use serde_json::json;

	use super::*;
	use crate::catalog::Element;
	use crate::search::SelectionMode;

	fn catalog() -> ElementCatalog {
		ElementCatalog::from_elements([
			Element::new("Mud", "mud.svg"),
			Element::new("Water", "water.svg"),
			Element::new("Earth", "earth.svg"),
		])
	}

	fn selected(names: &[&str], strategy: Strategy) -> Selection {
		let mut selection = Selection::default();
		for name in names {
			selection.select(Element::new(*name, ""), strategy);
		}
		selection
	}

	fn mud_response() -> SearchResponse {
		SearchResponse::from_value(&json!({
			"results": [{ "name": "Mud", "children": [] }],
			"nodesVisited": 12
		}))
	}

	#[test]
	fn empty_selection_is_a_no_op() {
		let mut session = SearchSession::default();
		assert_eq!(session.start_search(&Selection::default()), None);
		assert_eq!(session.state(), SearchState::Idle);
		assert_eq!(session.generation(), Generation::default());
	}

	#[test]
	fn successful_search_publishes_results_and_metrics() {
		let mut session = SearchSession::default();
		let pending = session
			.start_search(&selected(&["Mud"], Strategy::Bfs))
			.unwrap();
		assert_eq!(session.state(), SearchState::Searching);

		let applied = session.complete(pending.generation, Ok(mud_response()), 37, &catalog());
		assert_eq!(applied, Ok(Completion::Applied));
		assert_eq!(session.state(), SearchState::Succeeded);
		assert_eq!(
			session.metrics(),
			SessionMetrics {
				execution_time_ms: 37,
				nodes_visited: 12,
				total_recipes: 1,
				progress_percent: 100,
			}
		);
		assert_eq!(session.results()[0].icon_ref, "mud.svg");
	}

	#[test]
	fn missing_node_count_defaults_to_zero() {
		let mut session = SearchSession::default();
		let pending = session
			.start_search(&selected(&["Mud"], Strategy::Dfs))
			.unwrap();
		let response = SearchResponse::from_value(&json!({ "results": [{ "name": "Mud" }, { "name": "Mud" }] }));
		session
			.complete(pending.generation, Ok(response), 5, &catalog())
			.unwrap();
		assert_eq!(session.metrics().nodes_visited, 0);
		assert_eq!(session.metrics().total_recipes, 2);
	}

	#[test]
	fn request_carries_config_and_target_for_bidirectional() {
		let mut session = SearchSession::default();
		session.configure(ConfigPatch::strategy(Strategy::Bidirectional));
		session.configure(ConfigPatch::selection_mode(SelectionMode::Limit));
		session.configure(ConfigPatch::max_recipes(7));
		let pending = session
			.start_search(&selected(&["Water", "Mud"], Strategy::Bidirectional))
			.unwrap();
		assert_eq!(
			pending.request,
			SearchRequest {
				element_name: "Water".into(),
				target_name: Some("Mud".into()),
				algorithm: Strategy::Bidirectional,
				recipe_type: SelectionMode::Limit,
				max_recipes: 7,
			}
		);
	}

	#[test]
	fn configure_during_search_only_affects_the_next_request() {
		let mut session = SearchSession::default();
		let first = session
			.start_search(&selected(&["Mud"], Strategy::Bfs))
			.unwrap();
		session.configure(ConfigPatch::strategy(Strategy::Dfs));
		assert_eq!(first.request.algorithm, Strategy::Bfs);
		assert!(session.is_searching());
		let second = session
			.start_search(&selected(&["Mud"], Strategy::Dfs))
			.unwrap();
		assert_eq!(second.request.algorithm, Strategy::Dfs);
	}

	#[test]
	fn superseded_response_is_discarded() {
		let mut session = SearchSession::default();
		let first = session
			.start_search(&selected(&["Water"], Strategy::Bfs))
			.unwrap();
		let second = session
			.start_search(&selected(&["Mud"], Strategy::Bfs))
			.unwrap();

		let late = SearchResponse::from_value(&json!({ "results": [{ "name": "Water" }], "nodesVisited": 99 }));
		assert_eq!(
			session.complete(first.generation, Ok(late), 80, &catalog()),
			Ok(Completion::Stale)
		);
		assert!(session.is_searching());
		assert!(session.results().is_empty());

		session
			.complete(second.generation, Ok(mud_response()), 20, &catalog())
			.unwrap();
		assert_eq!(session.results()[0].name, "Mud");
		assert_eq!(session.metrics().nodes_visited, 12);
	}

	#[test]
	fn first_response_arriving_after_second_is_still_discarded() {
		let mut session = SearchSession::default();
		let first = session
			.start_search(&selected(&["Water"], Strategy::Bfs))
			.unwrap();
		let second = session
			.start_search(&selected(&["Mud"], Strategy::Bfs))
			.unwrap();
		session
			.complete(second.generation, Ok(mud_response()), 20, &catalog())
			.unwrap();
		let late = SearchResponse::from_value(&json!({ "results": [] }));
		assert_eq!(
			session.complete(first.generation, Ok(late), 80, &catalog()),
			Ok(Completion::Stale)
		);
		assert_eq!(session.metrics().total_recipes, 1);
	}

	#[test]
	fn progress_is_clamped_below_completion() {
		let mut session = SearchSession::default();
		let pending = session
			.start_search(&selected(&["Mud"], Strategy::Bfs))
			.unwrap();
		let mut ticks = 0;
		while session.tick_progress(pending.generation) {
			ticks += 1;
			assert!(ticks < 100, "progress never reached its ceiling");
		}
		assert_eq!(session.metrics().progress_percent, 95);
		assert!(!session.tick_progress(pending.generation));
		assert_eq!(session.metrics().progress_percent, 95);

		session
			.complete(pending.generation, Ok(mud_response()), 1, &catalog())
			.unwrap();
		assert_eq!(session.metrics().progress_percent, 100);
		assert!(!session.tick_progress(pending.generation));
		assert_eq!(session.metrics().progress_percent, 100);
	}

	#[test]
	fn stale_progress_ticks_do_nothing() {
		let mut session = SearchSession::default();
		let first = session
			.start_search(&selected(&["Mud"], Strategy::Bfs))
			.unwrap();
		session.start_search(&selected(&["Mud"], Strategy::Bfs));
		assert!(!session.tick_progress(first.generation));
		assert_eq!(session.metrics().progress_percent, 0);
	}

	#[test]
	fn failure_is_surfaced_and_retry_ready() {
		let mut session = SearchSession::default();
		let selection = selected(&["Mud"], Strategy::Bfs);
		let pending = session.start_search(&selection).unwrap();
		session.tick_progress(pending.generation);

		let err = ExplorerError::Request("connection refused".into());
		assert_eq!(
			session.complete(pending.generation, Err(err.clone()), 3, &catalog()),
			Err(err.clone())
		);
		assert_eq!(session.state(), SearchState::Failed);
		assert_eq!(session.metrics().progress_percent, 0);
		assert_eq!(session.last_error(), Some(&err));

		let retry = session.start_search(&selection).unwrap();
		assert_eq!(session.state(), SearchState::Searching);
		assert_eq!(session.last_error(), None);
		session
			.complete(retry.generation, Ok(mud_response()), 3, &catalog())
			.unwrap();
		assert_eq!(session.state(), SearchState::Succeeded);
	}

	#[test]
	fn stale_failure_is_not_surfaced() {
		let mut session = SearchSession::default();
		let first = session
			.start_search(&selected(&["Mud"], Strategy::Bfs))
			.unwrap();
		session.start_search(&selected(&["Mud"], Strategy::Bfs));
		let outcome = session.complete(
			first.generation,
			Err(ExplorerError::Decode("bad".into())),
			1,
			&catalog(),
		);
		assert_eq!(outcome, Ok(Completion::Stale));
		assert!(session.is_searching());
		assert_eq!(session.last_error(), None);
	}

	#[test]
	fn reset_clears_and_invalidates_in_flight_search() {
		let mut session = SearchSession::default();
		let pending = session
			.start_search(&selected(&["Mud"], Strategy::Bfs))
			.unwrap();
		session.tick_progress(pending.generation);
		session.reset_search();
		assert_eq!(session.state(), SearchState::Idle);
		assert_eq!(session.metrics(), SessionMetrics::default());

		assert_eq!(
			session.complete(pending.generation, Ok(mud_response()), 1, &catalog()),
			Ok(Completion::Stale)
		);
		assert_eq!(session.state(), SearchState::Idle);
		assert!(session.results().is_empty());
	}

	#[test]
	fn reset_from_any_state_returns_to_idle() {
		let mut session = SearchSession::default();
		let pending = session
			.start_search(&selected(&["Mud"], Strategy::Bfs))
			.unwrap();
		session
			.complete(pending.generation, Err(ExplorerError::Request("x".into())), 1, &catalog())
			.ok();
		session.reset_search();
		assert_eq!(session.state(), SearchState::Idle);
		assert_eq!(session.last_error(), None);
	}
}
