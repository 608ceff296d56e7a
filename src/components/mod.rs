pub mod controls_panel;
pub mod element_picker;
pub mod metrics_panel;
pub mod recipe_tree;
