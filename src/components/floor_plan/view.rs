use crate::config::SurfaceConfig;

/// Visible window onto the floor-plan canvas, in canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl ViewBox {
	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}
}

/// Zoom/pan state of the surface. Only changed through the named transitions.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
	scale: f64,
	view_box: ViewBox,
	canvas_width: f64,
	canvas_height: f64,
	min_scale: f64,
	max_scale: f64,
	zoom_step: f64,
}

impl ViewState {
	pub fn new(canvas_width: f64, canvas_height: f64, config: &SurfaceConfig) -> Self {
		Self {
			scale: 1.0,
			view_box: ViewBox {
				x: 0.0,
				y: 0.0,
				width: canvas_width,
				height: canvas_height,
			},
			canvas_width,
			canvas_height,
			min_scale: config.min_scale,
			max_scale: config.max_scale,
			zoom_step: config.zoom_step,
		}
	}

	pub fn scale(&self) -> f64 {
		self.scale
	}

	pub fn view_box(&self) -> ViewBox {
		self.view_box
	}

	pub fn zoom_in(&mut self) {
		self.zoom_to(self.scale * self.zoom_step);
	}

	pub fn zoom_out(&mut self) {
		self.zoom_to(self.scale / self.zoom_step);
	}

	/// Back to the full canvas at scale 1.
	pub fn reset(&mut self) {
		self.scale = 1.0;
		self.view_box = ViewBox {
			x: 0.0,
			y: 0.0,
			width: self.canvas_width,
			height: self.canvas_height,
		};
	}

	/// Drags the content by a pointer movement of `(dx, dy)` screen pixels on a
	/// surface rendered at `rendered_width` x `rendered_height` pixels.
	///
	/// The translation is not clamped; the view can leave the floor plan.
	pub fn pan_by(&mut self, dx: f64, dy: f64, rendered_width: f64, rendered_height: f64) {
		if rendered_width <= 0.0 || rendered_height <= 0.0 {
			return;
		}
		self.view_box.x -= dx * self.view_box.width / rendered_width;
		self.view_box.y -= dy * self.view_box.height / rendered_height;
	}

	/// Uniform scale and offset mapping view-box units to pixels, fitting the
	/// view box inside the surface and centering it (SVG `xMidYMid meet`).
	pub fn screen_transform(&self, rendered_width: f64, rendered_height: f64) -> (f64, f64, f64) {
		let vb = self.view_box;
		let k = (rendered_width / vb.width).min(rendered_height / vb.height);
		let tx = (rendered_width - vb.width * k) / 2.0 - vb.x * k;
		let ty = (rendered_height - vb.height * k) / 2.0 - vb.y * k;
		(k, tx, ty)
	}

	fn zoom_to(&mut self, scale: f64) {
		let (cx, cy) = self.view_box.center();
		self.scale = scale.clamp(self.min_scale, self.max_scale);
		self.view_box.width = self.canvas_width / self.scale;
		self.view_box.height = self.canvas_height / self.scale;
		self.view_box.x = cx - self.view_box.width / 2.0;
		self.view_box.y = cy - self.view_box.height / 2.0;
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn view() -> ViewState {
		ViewState::new(1024.0, 1024.0, &SurfaceConfig::default())
	}

	fn assert_close(actual: f64, expected: f64) {
		assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
	}

	#[test]
	fn starts_on_the_full_canvas() {
		let view = view();
		assert_eq!(view.scale(), 1.0);
		assert_eq!(
			view.view_box(),
			ViewBox { x: 0.0, y: 0.0, width: 1024.0, height: 1024.0 }
		);
	}

	#[test]
	fn zoom_in_compounds_until_the_upper_clamp() {
		let mut view = view();
		for _ in 0..4 {
			view.zoom_in();
		}
		assert_close(view.scale(), 2.0736);

		view.zoom_in();
		assert_close(view.scale(), 2.48832);
		view.zoom_in();
		assert_close(view.scale(), 2.985984);
		view.zoom_in();
		assert_eq!(view.scale(), 3.0);
		view.zoom_in();
		assert_eq!(view.scale(), 3.0);
	}

	#[test]
	fn zoom_out_stops_at_the_lower_clamp() {
		let mut view = view();
		for _ in 0..10 {
			view.zoom_out();
		}
		assert_eq!(view.scale(), 0.5);
		assert_close(view.view_box().width, 2048.0);
	}

	#[rstest]
	#[case::zoom_in(ViewState::zoom_in)]
	#[case::zoom_out(ViewState::zoom_out)]
	fn zoom_keeps_the_previous_center(#[case] zoom: fn(&mut ViewState)) {
		let mut view = view();
		view.pan_by(-100.0, 50.0, 512.0, 512.0);
		let (cx, cy) = view.view_box().center();

		zoom(&mut view);

		let (nx, ny) = view.view_box().center();
		assert_close(nx, cx);
		assert_close(ny, cy);
		assert_close(view.view_box().width, 1024.0 / view.scale());
	}

	#[test]
	fn pan_is_size_invariant_across_zoom_levels() {
		let mut view = view();
		// At scale 1 a 512px surface shows 1024 units: one pixel is two units.
		view.pan_by(10.0, -5.0, 512.0, 512.0);
		assert_close(view.view_box().x, -20.0);
		assert_close(view.view_box().y, 10.0);

		view.reset();
		view.zoom_in();
		let before = view.view_box();
		view.pan_by(10.0, 0.0, 512.0, 512.0);
		assert_close(before.x - view.view_box().x, 10.0 * before.width / 512.0);
	}

	#[test]
	fn pan_is_not_clamped() {
		let mut view = view();
		for _ in 0..100 {
			view.pan_by(-500.0, -500.0, 512.0, 512.0);
		}
		assert!(view.view_box().x > 1024.0 * 10.0);
	}

	#[test]
	fn reset_restores_the_initial_extent() {
		let initial = view();
		let mut view = view();
		view.zoom_in();
		view.pan_by(37.0, -12.5, 300.0, 700.0);
		view.zoom_out();
		view.zoom_out();
		view.pan_by(-3.0, 99.0, 300.0, 700.0);

		view.reset();
		assert_eq!(view, initial);
	}

	#[test]
	fn screen_transform_centers_the_view_box() {
		let view = view();
		// Wide surface: height limits the fit, horizontal slack is split.
		let (k, tx, ty) = view.screen_transform(800.0, 512.0);
		assert_close(k, 0.5);
		assert_close(tx, 144.0);
		assert_close(ty, 0.0);
	}
}
