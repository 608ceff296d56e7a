use leptos::prelude::*;

use crate::explorer::Explorer;

const BASIC_ELEMENTS: [(&str, &str, &str); 4] = [
	("Water", "💧", "The fluid of life"),
	("Fire", "🔥", "The energy of transformation"),
	("Earth", "🌋", "The foundation of creation"),
	("Air", "💨", "The breath of existence"),
];

#[component]
pub fn Landing() -> impl IntoView {
	let explorer = Explorer::from_context();

	view! {
		<div class="landing-container">
			<div class="landing-content">
				<h1 class="discover-text">"Discover the Secrets of"</h1>
				<h1 class="title">"Little Alchemy 2"</h1>
				<h2 class="subtitle">"Recipe Finder"</h2>

				<div class="basic-elements">
					{BASIC_ELEMENTS
						.into_iter()
						.map(|(name, glyph, blurb)| {
							view! {
								<div class="element-card">
									<div class="element-icon">{glyph}</div>
									<h3>{name}</h3>
									<p class="element-description">{blurb}</p>
								</div>
							}
						})
						.collect_view()}
				</div>

				<p class="description">
					"Every element starts from the four basics. Pick any element and see how it is made, "
					"step by step, using the search strategy of your choice."
				</p>

				<button class="start-button" on:click=move |_| explorer.start_exploring()>
					"Start Exploring"
				</button>
			</div>
		</div>
	}
}
