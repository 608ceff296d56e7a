//! Leptos client-side app for exploring Little Alchemy 2 recipes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod catalog;
mod components;
mod config;
mod error;
mod explorer;
mod format;
mod pages;
mod search;
mod selection;
mod view;

// Top-Level pages
use crate::config::ExplorerConfig;
use crate::explorer::Explorer;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the recipe finder and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let explorer = Explorer::new(ExplorerConfig::load());
	info!(
		"Explorer ready with {} elements",
		explorer.catalog.with_value(|c| c.len())
	);
	provide_context(explorer);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Little Alchemy 2 Recipe Finder" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
