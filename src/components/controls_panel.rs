use leptos::prelude::*;

use crate::explorer::Explorer;
use crate::search::{ConfigPatch, MAX_RECIPES_LIMIT, SelectionMode, Strategy};

/// Strategy and recipe-mode radios plus the recipe cap for `Limit`.
#[component]
pub fn ControlsPanel() -> impl IntoView {
	let explorer = Explorer::from_context();
	let config = Memo::new(move |_| explorer.session.with(|s| s.config().clone()));
	let modes = std::iter::once(SelectionMode::Best).chain(SelectionMode::ALL);

	view! {
		<div class="controls-panel">
			<div class="algorithm-options">
				<h3>"Algorithm Options"</h3>
				{Strategy::ALL
					.into_iter()
					.map(|strategy| {
						let id = format!("strategy-{}", strategy.label().to_lowercase());
						view! {
							<div class="option">
								<input
									type="radio"
									id=id.clone()
									name="algorithm"
									prop:checked=move || config.with(|c| c.strategy == strategy)
									on:change=move |_| explorer.configure(ConfigPatch::strategy(strategy))
								/>
								<label for=id>
									<strong>{strategy.label()}</strong>
									<div class="option-description">{strategy.description()}</div>
								</label>
							</div>
						}
					})
					.collect_view()}
			</div>

			<div class="recipe-options">
				<h3>"Recipe Options"</h3>
				{modes
					.map(|mode| {
						let id = format!("mode-{mode:?}").to_lowercase();
						view! {
							<div class="option">
								<input
									type="radio"
									id=id.clone()
									name="recipe-type"
									prop:checked=move || config.with(|c| c.selection_mode == mode)
									on:change=move |_| explorer.configure(ConfigPatch::selection_mode(mode))
								/>
								<label for=id>
									<strong>{mode.label()}</strong>
									<div class="option-description">{mode.description()}</div>
								</label>
							</div>
						}
					})
					.collect_view()}

				<Show when=move || config.with(|c| c.selection_mode == SelectionMode::Limit)>
					<div class="max-recipes">
						<label for="max-recipes">"Maximum Recipes"</label>
						<input
							type="number"
							id="max-recipes"
							min="1"
							max=MAX_RECIPES_LIMIT.to_string()
							prop:value=move || config.with(|c| c.max_recipes.to_string())
							on:change=move |ev| {
								if let Some(max) = parse_max_recipes(&event_target_value(&ev)) {
									explorer.configure(ConfigPatch::max_recipes(max));
								}
							}
						/>
					</div>
				</Show>
			</div>
		</div>
	}
}

/// Parse the cap field; anything numeric is clamped into range, anything else is ignored.
fn parse_max_recipes(raw: &str) -> Option<u32> {
	let value: i64 = raw.trim().parse().ok()?;
	Some(value.clamp(1, i64::from(MAX_RECIPES_LIMIT)) as u32)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn recipe_cap_input_is_clamped() {
		assert_eq!(parse_max_recipes("12"), Some(12));
		assert_eq!(parse_max_recipes(" 0 "), Some(1));
		assert_eq!(parse_max_recipes("-4"), Some(1));
		assert_eq!(parse_max_recipes("99"), Some(MAX_RECIPES_LIMIT));
		assert_eq!(parse_max_recipes(""), None);
		assert_eq!(parse_max_recipes("many"), None);
	}
}
