use log::{error, info};

use super::view::ViewState;
use crate::config::SurfaceConfig;
use crate::wayfinding::{Canvas, RouteOverlay, SurfaceCommand};

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub last_x: f64,
	pub last_y: f64,
}

/// Everything the floor-plan surface owns: view, drag gesture, current route
/// overlay and its animation clock. The host only reaches it through
/// [`FloorPlanState::execute`].
pub struct FloorPlanState {
	pub view: ViewState,
	pub pan: PanState,
	pub config: SurfaceConfig,
	pub canvas: Canvas,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	overlay: Option<RouteOverlay>,
}

impl FloorPlanState {
	pub fn new(canvas: Canvas, config: SurfaceConfig, width: f64, height: f64) -> Self {
		Self {
			view: ViewState::new(canvas.width, canvas.height, &config),
			pan: PanState::default(),
			config,
			canvas,
			width,
			height,
			flow_time: 0.0,
			overlay: None,
		}
	}

	pub fn overlay(&self) -> Option<&RouteOverlay> {
		self.overlay.as_ref()
	}

	/// Runs one message from the host. The new overlay is built in full before
	/// it replaces the old one, so a half-applied command is never drawn.
	pub fn execute(&mut self, message: &str) {
		let command = match SurfaceCommand::from_message(message) {
			Ok(command) => command,
			Err(e) => {
				error!("ignoring surface command: {e}");
				return;
			}
		};

		match command {
			SurfaceCommand::DrawRoute { path, coordinates } => {
				let overlay = RouteOverlay::build(path.nodes(), &coordinates);
				match &overlay {
					Some(o) => info!(
						"route overlay drawn: {} points, {} skipped",
						o.segments().len(),
						o.skipped().len()
					),
					None => info!("route overlay cleared"),
				}
				self.overlay = overlay;
			}
		}
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			last_x: x,
			last_y: y,
		};
	}

	/// Applies the pointer movement since the previous call. Returns whether a
	/// drag was in progress.
	pub fn move_pan(&mut self, x: f64, y: f64) -> bool {
		if !self.pan.active {
			return false;
		}
		let (dx, dy) = (x - self.pan.last_x, y - self.pan.last_y);
		self.view.pan_by(dx, dy, self.width, self.height);
		self.pan.last_x = x;
		self.pan.last_y = y;
		true
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Current dash offset of the route stroke, wrapping every dash period.
	pub fn dash_offset(&self) -> f64 {
		let style = &self.config.route;
		-(self.flow_time * style.dash_speed) % style.dash_period()
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
