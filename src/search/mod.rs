mod client;
mod recipe;
mod session;
mod types;

pub use client::ResolverClient;
pub use recipe::{RecipeNode, SearchResponse};
pub use session::{Completion, Generation, PendingSearch, SearchSession};
pub use types::{ConfigPatch, MAX_RECIPES_LIMIT, SelectionMode, Strategy};
