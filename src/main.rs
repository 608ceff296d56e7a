//! Browser entry point: mounts the recipe finder.
// the library links every dependency; the binary only needs leptos
#![allow(unused_crate_dependencies)]

use alchemy_recipe_explorer::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
