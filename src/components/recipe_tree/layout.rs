//! Depth-first horizontal tree layout.
//!
//! The root sits on the left and each level moves one `LEVEL_GAP` to the right. Leaves take
//! successive vertical slots in visit order and every parent is centred between its first and
//! last child, which keeps subtrees from overlapping without a second pass.

use super::types::{TreeEdge, TreeLayout, TreeNode};
use crate::search::RecipeNode;

const COLORS: &[&str] = &[
	"#6366f1", "#1f77b4", "#2ca02c", "#ff7f0e", "#9467bd", "#17becf", "#e377c2", "#bcbd22",
	"#8c564b", "#d62728",
];

pub const LEVEL_GAP: f64 = 180.0;
pub const SIBLING_GAP: f64 = 84.0;
pub const ROOT_SIZE: f64 = 60.0;
pub const MIN_SIZE: f64 = 30.0;
const SIZE_DECAY: f64 = 0.85;

/// Node side length at `depth`; never grows with depth and never drops below `MIN_SIZE`.
pub fn node_size(depth: usize) -> f64 {
	let exponent = i32::try_from(depth).unwrap_or(i32::MAX);
	(ROOT_SIZE * SIZE_DECAY.powi(exponent)).max(MIN_SIZE)
}

/// Colour of edges leaving a node at `depth`.
pub fn depth_color(depth: usize) -> &'static str {
	COLORS[depth % COLORS.len()]
}

pub fn layout_recipe(root: &RecipeNode) -> TreeLayout {
	let mut layout = TreeLayout::default();
	let mut next_slot = 0usize;
	place(root, 0, &mut next_slot, &mut layout);
	// stable: siblings keep their visit order within a depth
	layout.edges.sort_by_key(|e| e.depth);
	layout
}

fn place(node: &RecipeNode, depth: usize, next_slot: &mut usize, layout: &mut TreeLayout) -> usize {
	let index = layout.nodes.len();
	layout.nodes.push(TreeNode {
		name: node.name.clone(),
		icon_ref: node.icon_ref.clone(),
		step: node.first_step().map(str::to_string),
		depth,
		x: depth as f64 * LEVEL_GAP,
		y: 0.0,
		size: node_size(depth),
	});
	layout.max_depth = layout.max_depth.max(depth);

	let y = if node.is_leaf() {
		let y = *next_slot as f64 * SIBLING_GAP;
		*next_slot += 1;
		y
	} else {
		let mut span: Option<(f64, f64)> = None;
		for child in &node.children {
			let child_index = place(child, depth + 1, next_slot, layout);
			layout.edges.push(TreeEdge {
				source: index,
				target: child_index,
				depth,
			});
			let child_y = layout.nodes[child_index].y;
			span = Some(span.map_or((child_y, child_y), |(first, _)| (first, child_y)));
		}
		span.map_or(0.0, |(first, last)| (first + last) / 2.0)
	};
	layout.nodes[index].y = y;
	index
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn clay_tree() -> RecipeNode {
		RecipeNode::leaf("Brick").with_children(vec![
			RecipeNode::leaf("Mud").with_children(vec![
				RecipeNode::leaf("Water"),
				RecipeNode::leaf("Earth"),
			]),
			RecipeNode::leaf("Stone").with_children(vec![RecipeNode::leaf("Clay").with_children(
				vec![RecipeNode::leaf("Mud"), RecipeNode::leaf("Sand")],
			)]),
		])
	}

	#[test]
	fn sizes_never_grow_with_depth() {
		let mut previous = node_size(0);
		for depth in 1..64 {
			let size = node_size(depth);
			assert!(size <= previous);
			assert!(size >= MIN_SIZE);
			previous = size;
		}
		assert_eq!(node_size(usize::MAX), MIN_SIZE);
	}

	#[test]
	fn parents_are_centred_on_their_children() {
		let layout = layout_recipe(&clay_tree());
		let y = |name: &str| layout.nodes.iter().find(|n| n.name == name).unwrap().y;
		assert_eq!(y("Mud"), (y("Water") + y("Earth")) / 2.0);
		assert_eq!(y("Stone"), y("Clay"));
		assert_eq!(layout.nodes[0].y, (y("Mud") + y("Stone")) / 2.0);
	}

	#[test]
	fn leaves_get_distinct_slots_in_visit_order() {
		let layout = layout_recipe(&clay_tree());
		let leaves: Vec<(&str, f64)> = (0..layout.nodes.len())
			.filter(|i| !layout.edges.iter().any(|e| e.source == *i))
			.map(|i| (layout.nodes[i].name.as_str(), layout.nodes[i].y))
			.collect();
		assert_eq!(
			leaves,
			vec![
				("Water", 0.0),
				("Earth", SIBLING_GAP),
				("Mud", 2.0 * SIBLING_GAP),
				("Sand", 3.0 * SIBLING_GAP),
			]
		);
	}

	#[test]
	fn depth_drives_x_and_edge_order() {
		let layout = layout_recipe(&clay_tree());
		assert_eq!(layout.max_depth, 3);
		assert_eq!(layout.nodes[0].name, "Brick");
		for node in &layout.nodes {
			assert_eq!(node.x, node.depth as f64 * LEVEL_GAP);
		}
		let depths: Vec<usize> = layout.edges.iter().map(|e| e.depth).collect();
		assert_eq!(depths, vec![0, 0, 1, 1, 1, 2, 2]);
		assert_eq!(depth_color(0), depth_color(COLORS.len()));
	}

	#[test]
	fn lone_root_is_a_single_node() {
		let layout = layout_recipe(&RecipeNode::leaf("Air"));
		assert_eq!(layout.nodes.len(), 1);
		assert!(layout.edges.is_empty());
		let bounds = layout.bounds();
		assert_eq!(bounds.height(), ROOT_SIZE);
		assert_eq!(bounds.center_y(), 0.0);
	}
}
