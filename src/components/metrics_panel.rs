use leptos::prelude::*;

use crate::explorer::Explorer;
use crate::format::{format_number, format_time};

/// Selected elements, search settings, progress and timing of the latest search.
#[component]
pub fn MetricsPanel() -> impl IntoView {
	let explorer = Explorer::from_context();
	let metrics = Memo::new(move |_| explorer.session.with(|s| s.metrics()));
	let config = Memo::new(move |_| explorer.session.with(|s| s.config().clone()));

	let selected = move || {
		let elements = explorer.selection.with(|s| s.elements().to_vec());
		if elements.is_empty() {
			return view! { <span>"None"</span> }.into_any();
		}
		let count = elements.len();
		elements
			.into_iter()
			.enumerate()
			.map(|(i, el)| {
				view! {
					<span class="element-item-detail">
						<img src=el.icon_ref alt=el.name.clone() />
						{el.name}
						{(i == 0 && count > 1).then_some(" → ")}
					</span>
				}
			})
			.collect_view()
			.into_any()
	};

	view! {
		<div class="recipe-details">
			<h2>"Recipe Details"</h2>

			<div class="detail-section">
				<h3>"Target Element(s)"</h3>
				<div class="detail-value target-element">{selected}</div>
			</div>

			<div class="detail-section">
				<h3>"Algorithm"</h3>
				<div class="detail-value">{move || config.with(|c| c.strategy.label())}</div>
			</div>

			<div class="detail-section">
				<h3>"Recipe Type"</h3>
				<div class="detail-value">{move || config.with(|c| c.selection_mode.label())}</div>
			</div>

			<div class="detail-section">
				<h3>"Progress"</h3>
				<div class="progress-bar">
					<div class="progress-fill" style:width=move || format!("{}%", metrics.get().progress_percent)></div>
				</div>
			</div>

			<div class="detail-section">
				<h3>"Total Recipes"</h3>
				<div class="detail-value">{move || format_number(metrics.get().total_recipes)}</div>
			</div>

			<div class="metrics">
				<div class="metric">
					<div class="metric-icon">"⏱️"</div>
					<div class="metric-details">
						<h3>"Execution Time"</h3>
						<div class="metric-value">{move || format_time(metrics.get().execution_time_ms)}</div>
					</div>
				</div>
				<div class="metric">
					<div class="metric-icon">"🔍"</div>
					<div class="metric-details">
						<h3>"Nodes Visited"</h3>
						<div class="metric-value">{move || format_number(metrics.get().nodes_visited)}</div>
					</div>
				</div>
			</div>
		</div>
	}
}
