use leptos::prelude::*;

use crate::explorer::Explorer;
use crate::pages::landing::Landing;
use crate::pages::results::Results;
use crate::pages::search::Search;
use crate::view::ViewState;

/// Default Home Page; switches between the landing, search and results views.
#[component]
pub fn Home() -> impl IntoView {
	let explorer = Explorer::from_context();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="app">
				{move || match explorer.view.get() {
					ViewState::Landing => view! { <Landing /> }.into_any(),
					ViewState::Search => view! { <Search /> }.into_any(),
					ViewState::Results => view! { <Results /> }.into_any(),
				}}
			</div>
		</ErrorBoundary>
	}
}
