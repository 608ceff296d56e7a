use leptos::prelude::*;

use crate::components::controls_panel::ControlsPanel;
use crate::components::element_picker::ElementPicker;
use crate::explorer::Explorer;
use crate::search::Strategy;

#[component]
pub fn Search() -> impl IntoView {
	let explorer = Explorer::from_context();
	let subtitle = move || match explorer.strategy() {
		Strategy::Bidirectional => "Select a source element, then a target element",
		Strategy::Bfs | Strategy::Dfs => "Select an element below to find its recipes",
	};

	view! {
		<div class="search-container">
			<h1 class="search-title">"Search Elements"</h1>
			<p class="search-subtitle">{subtitle}</p>

			<div class="search-content">
				<div class="search-grid">
					<ElementPicker />
				</div>
				<div class="controls-container">
					<ControlsPanel />
					<button
						class="search-button"
						disabled=move || !explorer.can_search()
						on:click=move |_| explorer.start_search()
					>
						<span class="search-icon">"🔍"</span>
						" Start Search"
					</button>
				</div>
			</div>
		</div>
	}
}
