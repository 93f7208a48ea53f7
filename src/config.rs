//! Tunables for the floor-plan surface.

use serde::{Deserialize, Serialize};

/// Stroke used for the route overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteStyle {
	pub color: String,
	pub width: f64,
	/// Dash and gap lengths, in floor-plan units.
	pub dash: [f64; 2],
	/// Dash offset advance per second; sets the marching-ants speed.
	pub dash_speed: f64,
}

impl Default for RouteStyle {
	fn default() -> Self {
		Self {
			color: "#3498db".into(),
			width: 5.0,
			dash: [10.0, 5.0],
			dash_speed: 30.0,
		}
	}
}

impl RouteStyle {
	/// Length of one dash plus its gap.
	pub fn dash_period(&self) -> f64 {
		self.dash[0] + self.dash[1]
	}
}

/// Zoom limits and styling of the floor-plan surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceConfig {
	pub min_scale: f64,
	pub max_scale: f64,
	/// Factor applied per zoom-in, divided per zoom-out.
	pub zoom_step: f64,
	pub background: String,
	pub route: RouteStyle,
}

impl Default for SurfaceConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.5,
			max_scale: 3.0,
			zoom_step: 1.2,
			background: "#ffffff".into(),
			route: RouteStyle::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_documents_fill_in_defaults() {
		let config: SurfaceConfig =
			serde_json::from_str(r##"{"maxScale": 4.0, "route": {"color": "#912338"}}"##).unwrap();

		assert_eq!(config.max_scale, 4.0);
		assert_eq!(config.min_scale, 0.5);
		assert_eq!(config.zoom_step, 1.2);
		assert_eq!(config.route.color, "#912338");
		assert_eq!(config.route.dash, [10.0, 5.0]);
		assert_eq!(config.route.dash_period(), 15.0);
	}
}
