use std::collections::HashMap;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::layout::depth_color;
use super::state::RecipeTreeState;
use super::types::TreeNode;

/// Icons keyed by URL, loaded lazily by the canvas component.
pub type IconCache = HashMap<String, HtmlImageElement>;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &RecipeTreeState, icons: &IconCache, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, icons, ctx);
	ctx.restore();
}

fn draw_edges(state: &RecipeTreeState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let nodes = &state.layout.nodes;

	// edges are sorted by source depth, so shallower links are painted first
	for edge in &state.layout.edges {
		let (from, to) = (&nodes[edge.source], &nodes[edge.target]);
		let alpha = state.level_alpha(to.depth);
		if alpha <= 0.0 {
			continue;
		}
		let highlighted = state.is_highlighted(edge.source) && state.is_highlighted(edge.target);
		let (dim, width) = if highlighted {
			(1.0, (2.0 + 1.0 * t) / k.max(0.5))
		} else {
			(1.0 - 0.6 * t, 2.0 / k.max(0.5))
		};

		ctx.set_global_alpha(alpha * dim);
		ctx.set_stroke_style_str(depth_color(edge.depth));
		ctx.set_line_width(width);

		// horizontal cubic link, right edge of parent to left edge of child
		let (x1, y1) = (from.x + from.size / 2.0, from.y);
		let (x2, y2) = (to.x - to.size / 2.0, to.y);
		let mid_x = (x1 + x2) / 2.0;
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.bezier_curve_to(mid_x, y1, mid_x, y2, x2, y2);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &RecipeTreeState, icons: &IconCache, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.hover.highlight_t);
	let has_highlight = state.has_active_highlight();

	for (idx, node) in state.layout.nodes.iter().enumerate() {
		let alpha = state.level_alpha(node.depth);
		if alpha <= 0.0 {
			continue;
		}
		let dim = if has_highlight && !state.is_highlighted(idx) {
			1.0 - 0.6 * t
		} else {
			1.0
		};
		ctx.set_global_alpha(alpha * dim);
		draw_node(node, idx == 0, state.hover.node == Some(idx), t, icons, ctx);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_node(
	node: &TreeNode,
	is_root: bool,
	is_hovered: bool,
	t: f64,
	icons: &IconCache,
	ctx: &CanvasRenderingContext2d,
) {
	let half = node.size / 2.0;
	let (left, top) = (node.x - half, node.y - half);

	ctx.set_fill_style_str(if is_root { "#4f46e5" } else { "#26264a" });
	ctx.set_stroke_style_str(depth_color(node.depth));
	ctx.set_line_width(if is_hovered { 2.0 + 2.0 * t } else { 1.5 });
	rounded_square(ctx, left, top, node.size, node.size * 0.15);
	ctx.fill();
	ctx.stroke();

	if let Some(image) = icons.get(&node.icon_ref) {
		if image.complete() && image.natural_width() > 0 {
			let pad = node.size * 0.12;
			let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
				image,
				left + pad,
				top + pad,
				node.size - 2.0 * pad,
				node.size - 2.0 * pad,
			);
		}
	}

	let font = (node.size * 0.24).max(10.0);
	ctx.set_text_align("center");
	ctx.set_fill_style_str("white");
	ctx.set_font(&format!("{font}px sans-serif"));
	let _ = ctx.fill_text(&node.name, node.x, node.y + half + font + 2.0);

	if let Some(step) = &node.step {
		ctx.set_fill_style_str("rgba(200, 210, 255, 0.75)");
		ctx.set_font(&format!("{}px sans-serif", font * 0.8));
		let _ = ctx.fill_text(step, node.x, node.y + half + 2.0 * font + 4.0);
	}
}

fn rounded_square(ctx: &CanvasRenderingContext2d, left: f64, top: f64, size: f64, radius: f64) {
	let (right, bottom) = (left + size, top + size);
	ctx.begin_path();
	ctx.move_to(left + radius, top);
	let _ = ctx.arc_to(right, top, right, bottom, radius);
	let _ = ctx.arc_to(right, bottom, left, bottom, radius);
	let _ = ctx.arc_to(left, bottom, left, top, radius);
	let _ = ctx.arc_to(left, top, right, top, radius);
	ctx.close_path();
}
