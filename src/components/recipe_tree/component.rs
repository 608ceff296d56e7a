use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent, TouchEvent,
	WheelEvent,
};

use super::render::{self, IconCache};
use super::state::{RecipeTreeState, ZoomBounds};
use crate::search::RecipeNode;

const FRAME_DT: f64 = 0.016;

/// Zoomable, pannable canvas drawing a single recipe tree.
#[component]
pub fn RecipeTreeCanvas(
	#[prop(into)] recipe: Signal<Option<RecipeNode>>,
	zoom: ZoomBounds,
	#[prop(default = 0.1)] zoom_step: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<RecipeTreeState>>> = Rc::new(RefCell::new(None));
	let icons: Rc<RefCell<IconCache>> = Rc::default();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, icons_init, animate_init, resize_cb_init) =
		(state.clone(), icons.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("Canvas 2D context unavailable; recipe tree will not render");
			return;
		};

		let (w, h) = fit_to_parent(&canvas);
		let initial = recipe.get_untracked();
		load_icons(&icons_init, initial.as_ref());
		let mut tree = RecipeTreeState::new(w, h, zoom, zoom_step);
		tree.set_recipe(initial.as_ref());
		*state_init.borrow_mut() = Some(tree);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = fit_to_parent(&canvas_resize);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, icons_anim, animate_inner, resize_inner) = (
			state_init.clone(),
			icons_init.clone(),
			animate_init.clone(),
			resize_cb_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			// Unmounted: stop the frame loop and free everything it holds.
			if !canvas.is_connected() {
				if let (Some(win), Some(cb)) = (web_sys::window(), release(&resize_inner)) {
					let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
				state_anim.borrow_mut().take();
				// this closure is still running; drop it once it has returned
				if let Some(frame) = release(&animate_inner) {
					spawn_local(async move { drop(frame) });
				}
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.animation_running {
					s.tick(FRAME_DT);
				}
				render::render(s, &icons_anim.borrow(), &ctx);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let (state_recipe, icons_recipe) = (state.clone(), icons.clone());
	Effect::new(move |_| {
		let current = recipe.get();
		load_icons(&icons_recipe, current.as_ref());
		if let Some(ref mut s) = *state_recipe.borrow_mut() {
			s.set_recipe(current.as_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, ev.client_x(), ev.client_y()) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_pan(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, ev.client_x(), ev.client_y()) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.pan.active {
				s.pan_to(x, y);
			} else {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_pan();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_pan();
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, ev.client_x(), ev.client_y()) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_at(x, y, factor);
		}
	};

	let state_ts = state.clone();
	let on_touchstart = move |ev: TouchEvent| {
		let Some((x, y)) = single_touch(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_ts.borrow_mut() {
			s.begin_pan(x, y);
		}
	};

	let state_tm = state.clone();
	let on_touchmove = move |ev: TouchEvent| {
		let Some((x, y)) = single_touch(canvas_ref, &ev) else {
			return;
		};
		ev.prevent_default();
		if let Some(ref mut s) = *state_tm.borrow_mut() {
			s.pan_to(x, y);
		}
	};

	let state_te = state.clone();
	let on_touchend = move |_: TouchEvent| {
		if let Some(ref mut s) = *state_te.borrow_mut() {
			s.end_pan();
		}
	};

	let (state_in, state_reset, state_out) = (state.clone(), state.clone(), state);
	let zoom_in = move |_| {
		if let Some(ref mut s) = *state_in.borrow_mut() {
			s.zoom_steps(1.0);
		}
	};
	let reset = move |_| {
		if let Some(ref mut s) = *state_reset.borrow_mut() {
			s.reset_view();
		}
	};
	let zoom_out = move |_| {
		if let Some(ref mut s) = *state_out.borrow_mut() {
			s.zoom_steps(-1.0);
		}
	};

	view! {
		<div class="tree-container">
			<canvas
				node_ref=canvas_ref
				class="recipe-tree-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:touchstart=on_touchstart
				on:touchmove=on_touchmove
				on:touchend=on_touchend
				style="display: block; cursor: grab;"
			/>
			<div class="zoom-controls">
				<button class="zoom-button" title="Zoom in" on:click=zoom_in>"+"</button>
				<button class="zoom-button" title="Reset view" on:click=reset>"⟳"</button>
				<button class="zoom-button" title="Zoom out" on:click=zoom_out>"-"</button>
			</div>
		</div>
	}
}

/// Empty a callback slot. A closure stored in a slot it also captures keeps itself alive until
/// the slot is emptied.
fn release<T>(slot: &Rc<RefCell<Option<T>>>) -> Option<T> {
	slot.borrow_mut().take()
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Size the canvas backing store to its container and return the new size.
fn fit_to_parent(canvas: &HtmlCanvasElement) -> (f64, f64) {
	let (w, h) = canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|(w, h)| *w > 0.0 && *h > 0.0)
		.unwrap_or((800.0, 600.0));
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}

fn local_point(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	client_x: i32,
	client_y: i32,
) -> Option<(f64, f64)> {
	let rect = canvas_ref.get()?.get_bounding_client_rect();
	Some((client_x as f64 - rect.left(), client_y as f64 - rect.top()))
}

/// Canvas-local position of a one-finger touch; multi-touch gestures are left to the browser.
fn single_touch(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &TouchEvent) -> Option<(f64, f64)> {
	let touches = ev.touches();
	if touches.length() != 1 {
		return None;
	}
	let touch = touches.get(0)?;
	local_point(canvas_ref, touch.client_x(), touch.client_y())
}

fn load_icons(icons: &Rc<RefCell<IconCache>>, recipe: Option<&RecipeNode>) {
	let Some(root) = recipe else {
		return;
	};
	let mut cache = icons.borrow_mut();
	let mut pending = vec![root];
	while let Some(node) = pending.pop() {
		if !node.icon_ref.is_empty() && !cache.contains_key(&node.icon_ref) {
			if let Ok(image) = HtmlImageElement::new() {
				image.set_src(&node.icon_ref);
				cache.insert(node.icon_ref.clone(), image);
			}
		}
		pending.extend(node.children.iter());
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	struct Frame {
		_slot: Rc<RefCell<Option<Frame>>>,
	}

	#[test]
	fn releasing_a_self_referencing_slot_frees_it() {
		let slot: Rc<RefCell<Option<Frame>>> = Rc::new(RefCell::new(None));
		*slot.borrow_mut() = Some(Frame {
			_slot: Rc::clone(&slot),
		});
		let watch = Rc::downgrade(&slot);
		assert_eq!(Rc::strong_count(&slot), 2);

		let frame = release(&slot);
		assert!(frame.is_some());
		assert!(slot.borrow().is_none());
		assert!(release(&slot).is_none());

		drop(frame);
		drop(slot);
		assert!(watch.upgrade().is_none());
	}
}
