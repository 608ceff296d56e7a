use leptos::prelude::*;

use crate::components::metrics_panel::MetricsPanel;
use crate::components::recipe_tree::RecipeTreeViewer;
use crate::error::ExplorerError;
use crate::explorer::Explorer;

#[component]
pub fn Results() -> impl IntoView {
	let explorer = Explorer::from_context();
	let (zoom, zoom_step) = explorer.zoom_bounds();

	let failure = Memo::new(move |_| explorer.session.with(|s| s.last_error().cloned()));
	let results = Memo::new(move |_| explorer.session.with(|s| s.results().to_vec()));
	let loading = explorer.loading();
	let progress = explorer.progress();

	view! {
		<div class="results-container">
			<div class="results-header">
				<button class="back-button" on:click=move |_| explorer.back_to_search()>
					"← Back to Search"
				</button>
			</div>

			<div class="results-content">
				<MetricsPanel />
				<div class="visualization-container">
					<h2 class="visualization-title">"Recipe Visualization"</h2>
					{move || match failure.get() {
						Some(error) => view! { <SearchFailure error=error /> }.into_any(),
						None => {
							view! {
								<RecipeTreeViewer
									results=results
									loading=loading
									progress=progress
									pager=explorer.pager
									zoom=zoom
									zoom_step=zoom_step
								/>
							}
							.into_any()
						}
					}}
				</div>
			</div>
		</div>
	}
}

#[component]
fn SearchFailure(error: ExplorerError) -> impl IntoView {
	let explorer = Explorer::from_context();

	view! {
		<div class="search-failure">
			<h3>"Search failed"</h3>
			<p class="error-message">{error.to_string()}</p>
			<p class="muted">{error.hint()}</p>
			<div class="failure-actions">
				<button class="retry-button" on:click=move |_| explorer.start_search()>
					"Retry"
				</button>
				<button class="back-button" on:click=move |_| explorer.back_to_search()>
					"Back to search"
				</button>
			</div>
		</div>
	}
}
