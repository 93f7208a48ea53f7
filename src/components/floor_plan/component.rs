use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent, TouchEvent, Window,
};

use super::inbox::{SurfaceInbox, SurfaceSlot};
use super::render;
use super::state::FloorPlanState;
use crate::config::SurfaceConfig;
use crate::wayfinding::Canvas;

fn with_state(slot: &SurfaceSlot, f: impl FnOnce(&mut FloorPlanState)) {
	if let Ok(mut guard) = slot.try_borrow_mut() {
		if let Some(ref mut s) = *guard {
			f(s);
		}
	}
}

/// Client coordinates relative to the canvas' top-left corner.
fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, client_x: i32, client_y: i32) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((client_x as f64 - rect.left(), client_y as f64 - rect.top()))
}

fn first_touch(ev: &TouchEvent) -> Option<(i32, i32)> {
	ev.touches().get(0).map(|t| (t.client_x(), t.client_y()))
}

/// Floor-plan image with the route overlay and its own pan/zoom controls.
///
/// The host talks to it only by posting commands to `inbox`; the view state
/// never leaves the component.
#[component]
pub fn FloorPlanCanvas(
	inbox: SurfaceInbox,
	canvas: Canvas,
	#[prop(default = None)] image: Option<String>,
	#[prop(default = SurfaceConfig::default())] config: SurfaceConfig,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SurfaceSlot = inbox.slot().clone();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, inbox_init) = (state.clone(), animate.clone(), inbox.clone());

	Effect::new(move |_| {
		let Some(el) = canvas_ref.get() else {
			return;
		};
		let el: HtmlCanvasElement = el.into();
		let Some(window): Option<Window> = web_sys::window() else {
			return;
		};

		let (w, h) = (
			width.unwrap_or_else(|| el.parent_element().map(|p| p.client_width() as f64).unwrap_or(800.0)),
			height.unwrap_or_else(|| el.parent_element().map(|p| p.client_height() as f64).unwrap_or(600.0)),
		);
		el.set_width(w as u32);
		el.set_height(h as u32);

		let Some(ctx) = el
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("floor plan canvas has no 2d context");
			return;
		};

		let plan = image.as_deref().and_then(|src| {
			let img = HtmlImageElement::new().ok()?;
			img.set_src(src);
			Some(img)
		});

		// Keep the view and any drawn route across re-runs of this effect.
		if inbox_init.is_ready() {
			with_state(&state_init, |s| s.resize(w, h));
		} else {
			inbox_init.attach(FloorPlanState::new(canvas, config.clone(), w, h));
			debug!("floor plan surface ready ({w}x{h})");
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		let mut last_frame: Option<f64> = None;
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = last_frame.map(|t| (now - t) / 1000.0).unwrap_or(0.0);
			last_frame = Some(now);

			if let Ok(mut guard) = state_anim.try_borrow_mut() {
				if let Some(ref mut s) = *guard {
					s.tick(dt);
					render::render(s, &ctx, plan.as_ref());
				}
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_point(canvas_ref, ev.client_x(), ev.client_y()) {
			with_state(&state_md, |s| s.begin_pan(x, y));
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_point(canvas_ref, ev.client_x(), ev.client_y()) {
			with_state(&state_mm, |s| {
				s.move_pan(x, y);
			});
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| with_state(&state_mu, FloorPlanState::end_pan);

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| with_state(&state_ml, FloorPlanState::end_pan);

	let state_ts = state.clone();
	let on_touchstart = move |ev: TouchEvent| {
		if let Some((x, y)) = first_touch(&ev).and_then(|(cx, cy)| canvas_point(canvas_ref, cx, cy)) {
			with_state(&state_ts, |s| s.begin_pan(x, y));
		}
	};

	let state_tm = state.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		if let Some((x, y)) = first_touch(&ev).and_then(|(cx, cy)| canvas_point(canvas_ref, cx, cy)) {
			with_state(&state_tm, |s| {
				s.move_pan(x, y);
			});
		}
	};

	let state_te = state.clone();
	let on_touchend = move |_: TouchEvent| with_state(&state_te, FloorPlanState::end_pan);

	let state_tc = state.clone();
	let on_touchcancel = move |_: TouchEvent| with_state(&state_tc, FloorPlanState::end_pan);

	let state_zi = state.clone();
	let on_zoom_in = move |_: MouseEvent| with_state(&state_zi, |s| s.view.zoom_in());

	let state_zo = state.clone();
	let on_zoom_out = move |_: MouseEvent| with_state(&state_zo, |s| s.view.zoom_out());

	let state_rs = state;
	let on_reset = move |_: MouseEvent| with_state(&state_rs, |s| s.view.reset());

	view! {
		<div class="floor-plan" style="position: relative; width: 100%; height: 100%; overflow: hidden;">
			<canvas
				node_ref=canvas_ref
				class="floor-plan-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:touchstart=on_touchstart
				on:touchmove=on_touchmove
				on:touchend=on_touchend
				on:touchcancel=on_touchcancel
				style="display: block; cursor: move; touch-action: none;"
			/>
			<div class="floor-plan-controls">
				<button id="zoom-in" on:click=on_zoom_in>"+"</button>
				<button id="zoom-out" on:click=on_zoom_out>"-"</button>
				<button id="reset" on:click=on_reset>"↺"</button>
			</div>
		</div>
	}
}
