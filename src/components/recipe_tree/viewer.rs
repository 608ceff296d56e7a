use leptos::prelude::*;

use super::component::RecipeTreeCanvas;
use super::pager::RecipePager;
use super::state::ZoomBounds;
use crate::search::RecipeNode;

/// Busy, empty or diagram view of a recipe result, with paging between alternatives.
#[component]
pub fn RecipeTreeViewer(
	#[prop(into)] results: Signal<Vec<RecipeNode>>,
	#[prop(into)] loading: Signal<bool>,
	#[prop(into)] progress: Signal<u8>,
	pager: RwSignal<RecipePager>,
	zoom: ZoomBounds,
	zoom_step: f64,
) -> impl IntoView {
	let active = Memo::new(move |_| {
		let index = pager.with(|p| p.active());
		results.with(|r| r.get(index).cloned())
	});
	let has_results = Memo::new(move |_| results.with(|r| !r.is_empty()));

	move || {
		if loading.get() {
			view! {
				<div class="tree-loading">
					<div class="spinner"></div>
					<p>"Searching for recipes..."</p>
					<div class="progress-bar">
						<div class="progress-fill" style:width=move || format!("{}%", progress.get())></div>
					</div>
				</div>
			}
			.into_any()
		} else if !has_results.get() {
			view! {
				<div class="tree-empty">
					<p>"No recipe found for the selected element."</p>
				</div>
			}
			.into_any()
		} else {
			view! {
				<div class="tree-viewer">
					<RecipePagerBar pager=pager />
					<div class="tree-body">
						<RecipeTreeCanvas recipe=active zoom=zoom zoom_step=zoom_step />
						<RecipeSteps recipe=active />
					</div>
				</div>
			}
			.into_any()
		}
	}
}

#[component]
fn RecipePagerBar(pager: RwSignal<RecipePager>) -> impl IntoView {
	let label = move || {
		pager.with(|p| {
			if p.is_fully_revealed() {
				format!("Recipe {} of {}", p.active() + 1, p.total())
			} else {
				format!(
					"Recipe {} of {} ({} more on the way)",
					p.active() + 1,
					p.revealed(),
					p.total() - p.revealed()
				)
			}
		})
	};

	view! {
		<div class="recipe-pager">
			<button
				class="pager-button"
				disabled=move || !pager.with(|p| p.has_prev())
				on:click=move |_| pager.update(|p| p.prev())
			>
				"← Prev"
			</button>
			<span class="pager-label">{label}</span>
			<button
				class="pager-button"
				disabled=move || !pager.with(|p| p.has_next())
				on:click=move |_| pager.update(|p| p.next())
			>
				"Next →"
			</button>
		</div>
	}
}

#[component]
fn RecipeSteps(#[prop(into)] recipe: Signal<Option<RecipeNode>>) -> impl IntoView {
	let steps = move || recipe.with(|r| r.as_ref().map(|n| n.recipe_steps.clone()).unwrap_or_default());

	view! {
		<aside class="recipe-steps">
			<h3>"Steps"</h3>
			{move || {
				let steps = steps();
				if steps.is_empty() {
					view! { <p class="muted">"No step list for this recipe."</p> }.into_any()
				} else {
					view! {
						<ol>
							{steps.into_iter().map(|step| view! { <li>{step}</li> }).collect_view()}
						</ol>
					}
					.into_any()
				}
			}}
		</aside>
	}
}
