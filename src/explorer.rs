//! Reactive controller tying the selection, the search session and the result pager together.
//!
//! Every piece of state is an owned container held in a signal; components reach the
//! controller through context and only call the operations below. Timers are keyed to the
//! search generation that started them and are cleared whenever that search is superseded,
//! reset or finished.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, warn};

use crate::catalog::{Element, ElementCatalog};
use crate::components::recipe_tree::{RecipePager, ZoomBounds};
use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::search::{
	Completion, ConfigPatch, Generation, PendingSearch, ResolverClient, SearchResponse,
	SearchSession, Strategy,
};
use crate::selection::Selection;
use crate::view::{ViewAction, ViewState};

#[derive(Debug, Default)]
struct SearchTimers {
	progress: Option<(Generation, IntervalHandle)>,
	reveal: Option<(Generation, IntervalHandle)>,
}

#[derive(Clone, Copy)]
pub struct Explorer {
	pub catalog: StoredValue<ElementCatalog>,
	pub config: StoredValue<ExplorerConfig>,
	pub selection: RwSignal<Selection>,
	pub session: RwSignal<SearchSession>,
	pub pager: RwSignal<RecipePager>,
	pub view: RwSignal<ViewState>,
	timers: StoredValue<SearchTimers>,
}

impl Explorer {
	pub fn new(config: ExplorerConfig) -> Self {
		Self {
			catalog: StoredValue::new(ElementCatalog::load()),
			session: RwSignal::new(SearchSession::new(&config)),
			config: StoredValue::new(config),
			selection: RwSignal::new(Selection::default()),
			pager: RwSignal::new(RecipePager::default()),
			view: RwSignal::new(ViewState::default()),
			timers: StoredValue::new(SearchTimers::default()),
		}
	}

	/// The controller provided by the app root.
	pub fn from_context() -> Self {
		expect_context::<Explorer>()
	}

	pub fn strategy(&self) -> Strategy {
		self.session.with(|s| s.strategy())
	}

	/// Whether a search is in flight. Progress ticks leave it untouched, so views keyed on it
	/// are not rebuilt while the request is outstanding.
	pub fn loading(&self) -> Memo<bool> {
		let session = self.session;
		Memo::new(move |_| session.with(|s| s.is_searching()))
	}

	pub fn progress(&self) -> Memo<u8> {
		let session = self.session;
		Memo::new(move |_| session.with(|s| s.metrics().progress_percent))
	}

	pub fn zoom_bounds(&self) -> (ZoomBounds, f64) {
		self.config.with_value(|c| {
			(
				ZoomBounds {
					min: c.zoom_min,
					max: c.zoom_max,
				},
				c.zoom_step,
			)
		})
	}

	pub fn select(&self, element: Element) {
		let strategy = self.session.with_untracked(|s| s.strategy());
		self.selection.update(|sel| {
			sel.select(element, strategy);
		});
	}

	pub fn configure(&self, patch: ConfigPatch) {
		self.session.update(|s| s.configure(patch));
		if let Some(strategy) = patch.strategy {
			self.selection.update(|sel| sel.enforce_arity(strategy));
		}
	}

	/// Whether the current selection satisfies the chosen strategy.
	pub fn can_search(&self) -> bool {
		let strategy = self.strategy();
		self.selection.with(|sel| sel.is_ready(strategy))
	}

	pub fn start_exploring(&self) {
		self.view.update(|v| {
			v.apply(ViewAction::StartExploring);
		});
	}

	/// Start (or restart) a search for the current selection and show the results view.
	pub fn start_search(&self) {
		if !untrack(|| self.can_search()) {
			return;
		}
		if self.view.with_untracked(|v| v.transition(ViewAction::ShowResults)).is_none() {
			return;
		}
		let selection = self.selection.get_untracked();
		let Some(pending) = self.session.try_update(|s| s.start_search(&selection)).flatten() else {
			return;
		};

		self.cancel_timers();
		self.pager.update(RecipePager::clear);
		self.view.update(|v| {
			v.apply(ViewAction::ShowResults);
		});
		self.start_progress(pending.generation);
		self.dispatch(pending);
	}

	pub fn back_to_search(&self) {
		self.cancel_timers();
		self.session.update(SearchSession::reset_search);
		self.pager.update(RecipePager::clear);
		self.view.update(|v| {
			v.apply(ViewAction::BackToSearch);
		});
	}

	fn dispatch(self, pending: PendingSearch) {
		let config = self.config.get_value();
		spawn_local(async move {
			let started = js_sys::Date::now();
			let outcome = match ResolverClient::new(&config) {
				Ok(client) => client.resolve(&pending.request).await,
				Err(err) => Err(err),
			};
			let elapsed_ms = (js_sys::Date::now() - started).max(0.0).round() as u64;
			self.finish(pending.generation, outcome, elapsed_ms);
		});
	}

	fn finish(
		&self,
		generation: Generation,
		outcome: Result<SearchResponse, ExplorerError>,
		elapsed_ms: u64,
	) {
		let completion = self.catalog.with_value(|catalog| {
			self.session
				.try_update(|s| s.complete(generation, outcome, elapsed_ms, catalog))
		});
		match completion {
			Some(Ok(Completion::Applied)) => {
				self.stop_progress(generation);
				let total = self.session.with_untracked(|s| s.results().len());
				self.pager.update(|p| p.publish(total, generation));
				if total > 1 {
					self.start_reveal(generation);
				}
			}
			Some(Err(err)) => {
				self.stop_progress(generation);
				error!("Search failed: {err}");
			}
			Some(Ok(Completion::Stale)) | None => {
				debug!("Ignoring outcome of superseded search {generation:?}");
			}
		}
	}

	fn start_progress(&self, generation: Generation) {
		let tick = Duration::from_millis(self.config.with_value(|c| c.progress_tick_ms));
		let this = *self;
		let ticker = move || {
			let more = this
				.session
				.try_update(|s| s.tick_progress(generation))
				.unwrap_or(false);
			if !more {
				this.stop_progress(generation);
			}
		};
		match set_interval_with_handle(ticker, tick) {
			Ok(handle) => self.timers.update_value(|t| t.progress = Some((generation, handle))),
			Err(err) => warn!("Progress timer unavailable: {err:?}"),
		}
	}

	fn start_reveal(&self, generation: Generation) {
		let cadence = Duration::from_millis(self.config.with_value(|c| c.reveal_interval_ms));
		let this = *self;
		let reveal = move || {
			let more = this
				.pager
				.try_update(|p| p.reveal_next(generation))
				.unwrap_or(false);
			if !more {
				this.stop_reveal(generation);
			}
		};
		match set_interval_with_handle(reveal, cadence) {
			Ok(handle) => self.timers.update_value(|t| t.reveal = Some((generation, handle))),
			Err(err) => {
				warn!("Reveal timer unavailable, showing every recipe: {err:?}");
				self.pager.update(|p| while p.reveal_next(generation) {});
			}
		}
	}

	fn stop_progress(&self, generation: Generation) {
		self.timers.update_value(|t| {
			if let Some((owner, handle)) = t.progress {
				if owner == generation {
					handle.clear();
					t.progress = None;
				}
			}
		});
	}

	fn stop_reveal(&self, generation: Generation) {
		self.timers.update_value(|t| {
			if let Some((owner, handle)) = t.reveal {
				if owner == generation {
					handle.clear();
					t.reveal = None;
				}
			}
		});
	}

	fn cancel_timers(&self) {
		self.timers.update_value(|t| {
			for (_, handle) in [t.progress.take(), t.reveal.take()].into_iter().flatten() {
				handle.clear();
			}
		});
	}
}
