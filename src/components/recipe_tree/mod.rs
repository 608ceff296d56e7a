mod component;
mod layout;
mod pager;
mod render;
mod state;
mod types;
mod viewer;

pub use pager::RecipePager;
pub use state::ZoomBounds;
pub use viewer::RecipeTreeViewer;
