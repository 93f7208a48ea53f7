use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::state::FloorPlanState;
use crate::wayfinding::PathSegment;

pub fn render(state: &FloorPlanState, ctx: &CanvasRenderingContext2d, plan: Option<&HtmlImageElement>) {
	ctx.set_fill_style_str(&state.config.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let (k, tx, ty) = state.view.screen_transform(state.width, state.height);
	ctx.save();
	let _ = ctx.translate(tx, ty);
	let _ = ctx.scale(k, k);
	if let Some(img) = plan.filter(|img| img.complete() && img.natural_width() > 0) {
		let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
			img,
			0.0,
			0.0,
			state.canvas.width,
			state.canvas.height,
		);
	}
	draw_route(state, ctx);
	ctx.restore();
}

// Stroke sizes are in floor-plan units so the route scales with the plan.
fn draw_route(state: &FloorPlanState, ctx: &CanvasRenderingContext2d) {
	let Some(overlay) = state.overlay() else {
		return;
	};
	let style = &state.config.route;

	ctx.set_stroke_style_str(&style.color);
	ctx.set_line_width(style.width);
	ctx.set_line_cap("round");
	ctx.set_line_join("round");
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(style.dash[0]),
		&JsValue::from_f64(style.dash[1]),
	));
	ctx.set_line_dash_offset(state.dash_offset());

	ctx.begin_path();
	for segment in overlay.segments() {
		match *segment {
			PathSegment::MoveTo(p) => ctx.move_to(p.x, p.y),
			PathSegment::LineTo(p) => ctx.line_to(p.x, p.y),
		}
	}
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}
