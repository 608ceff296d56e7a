use leptos::prelude::*;

use crate::catalog::{self, Element};
use crate::explorer::Explorer;
use crate::selection::SlotMarker;

/// One entry of the picker's page strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
	Page(usize),
	Ellipsis,
}

/// First three pages, an ellipsis once pages are skipped, then the last page.
pub fn pagination_items(total_pages: usize) -> Vec<PageItem> {
	let mut items: Vec<PageItem> = (1..=total_pages.clamp(1, 3)).map(PageItem::Page).collect();
	if total_pages > 4 {
		items.push(PageItem::Ellipsis);
	}
	if total_pages > 3 {
		items.push(PageItem::Page(total_pages));
	}
	items
}

/// Filterable, paged grid of catalog elements feeding the selection.
#[component]
pub fn ElementPicker() -> impl IntoView {
	let explorer = Explorer::from_context();
	let page_size = explorer.config.with_value(|c| c.page_size);
	let (term, set_term) = signal(String::new());
	let current_page = RwSignal::new(1usize);

	let filtered = Memo::new(move |_| term.with(|t| explorer.catalog.with_value(|c| c.filter(t))));
	let total_pages = Memo::new(move |_| filtered.with(|f| catalog::page_count(f.len(), page_size)).max(1));
	let visible = move || filtered.with(|f| catalog::page(f, current_page.get(), page_size));

	view! {
		<div class="element-picker-container">
			<div class="search-bar-container">
				<input
					type="text"
					class="search-input"
					placeholder="Search items..."
					prop:value=move || term.get()
					on:input=move |ev| {
						set_term.set(event_target_value(&ev));
						current_page.set(1);
					}
				/>
			</div>

			<div class="elements-grid">
				{move || {
					let items = visible();
					if items.is_empty() {
						view! { <p class="muted">"No elements match your search."</p> }.into_any()
					} else {
						items.into_iter().map(|element| view! { <ElementTile element=element /> }).collect_view().into_any()
					}
				}}
			</div>

			<div class="pagination">
				<button
					class="pagination-button"
					disabled=move || current_page.get() <= 1
					on:click=move |_| current_page.update(|p| *p = p.saturating_sub(1).max(1))
				>
					"<"
				</button>
				{move || {
					pagination_items(total_pages.get())
						.into_iter()
						.map(|item| match item {
							PageItem::Page(n) => view! {
								<button
									class=move || if current_page.get() == n { "pagination-button active" } else { "pagination-button" }
									on:click=move |_| current_page.set(n)
								>
									{n}
								</button>
							}
							.into_any(),
							PageItem::Ellipsis => view! { <span class="pagination-ellipsis">"..."</span> }.into_any(),
						})
						.collect_view()
				}}
				<button
					class="pagination-button"
					disabled=move || current_page.get() >= total_pages.get()
					on:click=move |_| {
						let last = total_pages.get_untracked();
						current_page.update(|p| *p = (*p + 1).min(last));
					}
				>
					">"
				</button>
			</div>
		</div>
	}
}

#[component]
fn ElementTile(element: Element) -> impl IntoView {
	let explorer = Explorer::from_context();
	let name = element.name.clone();
	let class = move || {
		let marker = explorer.selection.with(|s| s.marker_for(&name));
		match marker.map(SlotMarker::css_class) {
			Some(slot) => format!("element-item {slot}"),
			None => "element-item".to_string(),
		}
	};
	let (icon, label, title) = (element.icon_ref.clone(), element.name.clone(), element.description.clone());

	view! {
		<div class=class title=title on:click=move |_| explorer.select(element.clone())>
			<div class="element-icon">
				<img src=icon alt=label.clone() />
			</div>
			<div class="element-name">{label}</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::PageItem::{Ellipsis, Page};
	use super::*;

	#[test]
	fn short_catalogs_list_every_page() {
		assert_eq!(pagination_items(0), vec![Page(1)]);
		assert_eq!(pagination_items(1), vec![Page(1)]);
		assert_eq!(pagination_items(3), vec![Page(1), Page(2), Page(3)]);
		assert_eq!(pagination_items(4), vec![Page(1), Page(2), Page(3), Page(4)]);
	}

	#[test]
	fn long_catalogs_elide_the_middle() {
		assert_eq!(
			pagination_items(6),
			vec![Page(1), Page(2), Page(3), Ellipsis, Page(6)]
		);
	}
}
