use std::collections::HashSet;

use super::layout::layout_recipe;
use super::types::TreeLayout;
use crate::search::RecipeNode;

/// Screen-space gap kept left of the root when the view is reset.
pub const LEFT_MARGIN: f64 = 80.0;
/// Extra hit area around a node, in graph units.
pub const HIT_PADDING: f64 = 4.0;
/// Tree levels revealed per second while a new recipe grows in.
const GROW_RATE: f64 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBounds {
	pub min: f64,
	pub max: f64,
}

impl ZoomBounds {
	pub fn clamp(&self, k: f64) -> f64 {
		k.clamp(self.min, self.max)
	}
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
	pub highlight_t: f64,
}

/// Laid-out recipe plus everything needed to draw and navigate it.
pub struct RecipeTreeState {
	pub layout: TreeLayout,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub zoom: ZoomBounds,
	pub zoom_step: f64,
	/// Levels revealed so far; level `d` is fully visible once this reaches `d + 1`.
	pub grow: f64,
	pub animation_running: bool,
}

impl RecipeTreeState {
	pub fn new(width: f64, height: f64, zoom: ZoomBounds, zoom_step: f64) -> Self {
		Self {
			layout: TreeLayout::default(),
			transform: ViewTransform::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			zoom,
			zoom_step,
			grow: 0.0,
			animation_running: false,
		}
	}

	/// Lay out `recipe` (or clear the canvas) and restart the grow-in animation.
	pub fn set_recipe(&mut self, recipe: Option<&RecipeNode>) {
		self.layout = recipe.map(layout_recipe).unwrap_or_default();
		self.hover = HoverState::default();
		self.pan = PanState::default();
		self.grow = 0.0;
		self.animation_running = !self.layout.is_empty();
		self.reset_view();
	}

	/// Transform that puts the root near the left edge with the tree vertically centred.
	pub fn default_transform(&self) -> ViewTransform {
		let bounds = self.layout.bounds();
		ViewTransform {
			x: LEFT_MARGIN - bounds.min_x,
			y: self.height / 2.0 - bounds.center_y(),
			k: 1.0,
		}
	}

	pub fn reset_view(&mut self) {
		self.transform = self.default_transform();
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.layout.nodes.iter().position(|node| {
			let reach = node.size / 2.0 + HIT_PADDING;
			self.level_alpha(node.depth) > 0.0
				&& (node.x - gx).abs() <= reach
				&& (node.y - gy).abs() <= reach
		})
	}

	/// Multiply the zoom by `factor`, keeping the graph point under `(sx, sy)` in place.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		if !factor.is_finite() || factor <= 0.0 {
			return;
		}
		self.set_zoom(sx, sy, self.transform.k * factor);
	}

	/// Step the zoom by `steps` button presses around the canvas centre.
	pub fn zoom_steps(&mut self, steps: f64) {
		if !steps.is_finite() {
			return;
		}
		let k = self.transform.k + steps * self.zoom_step;
		self.set_zoom(self.width / 2.0, self.height / 2.0, k);
	}

	fn set_zoom(&mut self, sx: f64, sy: f64, k: f64) {
		let new_k = self.zoom.clamp(k);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, x: f64, y: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors.clear();
		self.animation_running = true;
		if let Some(idx) = node {
			for edge in &self.layout.edges {
				if edge.source == idx {
					self.hover.neighbors.insert(edge.target);
				} else if edge.target == idx {
					self.hover.neighbors.insert(edge.source);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.highlight_t > 0.0
	}

	/// Opacity of nodes at `depth` during the grow-in animation.
	pub fn level_alpha(&self, depth: usize) -> f64 {
		(self.grow - depth as f64).clamp(0.0, 1.0)
	}

	pub fn tick(&mut self, dt: f64) {
		let full = self.layout.max_depth as f64 + 1.0;
		if self.grow < full {
			self.grow = (self.grow + dt * GROW_RATE).min(full);
		}

		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * (6.0 * dt).min(1.0);
		if target == 0.0 && self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
		}
		self.animation_running = self.grow < full || self.hover.highlight_t != target;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	const BOUNDS: ZoomBounds = ZoomBounds { min: 0.25, max: 3.0 };

	fn mud() -> RecipeNode {
		RecipeNode::leaf("Mud")
			.with_children(vec![RecipeNode::leaf("Water"), RecipeNode::leaf("Earth")])
	}

	fn state() -> RecipeTreeState {
		let mut state = RecipeTreeState::new(800.0, 600.0, BOUNDS, 0.1);
		state.set_recipe(Some(&mud()));
		state
	}

	fn in_bounds(state: &RecipeTreeState) -> bool {
		(BOUNDS.min..=BOUNDS.max).contains(&state.transform.k)
	}

	#[test]
	fn zoom_stays_in_bounds_under_any_input() {
		let mut state = state();
		for _ in 0..500 {
			state.zoom_at(10.0, 10.0, 1.1);
			assert!(in_bounds(&state));
		}
		assert_eq!(state.transform.k, BOUNDS.max);
		for factor in [1e-300, 0.0, -3.0, f64::NAN, f64::INFINITY, 1e300] {
			state.zoom_at(400.0, 300.0, factor);
			assert!(in_bounds(&state));
		}
		for steps in [-1e9, 1e9, f64::NAN, -1.0] {
			state.zoom_steps(steps);
			assert!(in_bounds(&state));
		}
		for _ in 0..500 {
			state.zoom_steps(-1.0);
		}
		assert_eq!(state.transform.k, BOUNDS.min);
	}

	#[test]
	fn zoom_keeps_the_anchor_point_fixed() {
		let mut state = state();
		let before = state.screen_to_graph(200.0, 150.0);
		state.zoom_at(200.0, 150.0, 1.5);
		let after = state.screen_to_graph(200.0, 150.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn pan_and_zoom_compose_and_reset_restores_default() {
		let mut state = state();
		let default = state.default_transform();
		state.begin_pan(100.0, 100.0);
		state.pan_to(160.0, 70.0);
		state.end_pan();
		state.pan_to(500.0, 500.0);
		assert_eq!((state.transform.x, state.transform.y), (default.x + 60.0, default.y - 30.0));
		state.zoom_steps(3.0);
		assert!(state.transform.k > 1.0);
		state.reset_view();
		assert_eq!(state.transform, default);
		assert_eq!(state.transform.k, 1.0);
	}

	#[test]
	fn root_is_centred_vertically_after_reset() {
		let state = state();
		let root = &state.layout.nodes[0];
		let screen_y = root.y * state.transform.k + state.transform.y;
		assert_eq!(screen_y, 300.0);
	}

	#[test]
	fn hit_testing_respects_the_grow_animation() {
		let mut state = state();
		let root = state.layout.nodes[0].clone();
		let (sx, sy) = (root.x + state.transform.x, root.y + state.transform.y);
		assert_eq!(state.node_at_position(sx, sy), None);
		for _ in 0..60 {
			state.tick(0.016);
		}
		assert_eq!(state.node_at_position(sx, sy), Some(0));
		assert_eq!(state.node_at_position(-500.0, -500.0), None);
	}

	#[test]
	fn hover_highlights_direct_neighbours() {
		let mut state = state();
		state.set_hover(Some(0));
		assert!(state.is_highlighted(0));
		assert!(state.is_highlighted(1));
		assert!(state.is_highlighted(2));
		state.set_hover(Some(1));
		assert!(state.is_highlighted(0));
		assert!(!state.is_highlighted(2));
	}

	#[test]
	fn clearing_the_recipe_empties_the_layout() {
		let mut state = state();
		state.set_recipe(None);
		assert!(state.layout.is_empty());
		assert!(!state.animation_running);
	}
}
