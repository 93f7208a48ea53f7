//! One-way command channel from the host into the floor-plan surface.
//!
//! The host never sees the surface's state. It serializes a [`SurfaceCommand`]
//! to JSON and posts it through a [`CommandSink`]; delivery is at most once,
//! with no acknowledgment and no retry. Whatever happens on the other side
//! (surface still loading, bad anchors) is only visible in the logs.

use log::{error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::projector::CoordinateTable;
use super::solver::Route;

#[derive(Debug, Error)]
pub enum BridgeError {
	#[error("malformed surface command: {0}")]
	Malformed(#[from] serde_json::Error),
}

/// Messages understood by the floor-plan surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SurfaceCommand {
	/// Replace the drawn route. Routes shorter than two nodes only clear it.
	DrawRoute {
		path: Route,
		coordinates: CoordinateTable,
	},
}

impl SurfaceCommand {
	pub fn draw_route(route: &Route, coordinates: &CoordinateTable) -> Self {
		SurfaceCommand::DrawRoute {
			path: route.clone(),
			coordinates: coordinates.clone(),
		}
	}

	pub fn to_message(&self) -> Result<String, BridgeError> {
		Ok(serde_json::to_string(self)?)
	}

	pub fn from_message(message: &str) -> Result<Self, BridgeError> {
		Ok(serde_json::from_str(message)?)
	}
}

/// Receiving end of the channel. Posting never reports back.
pub trait CommandSink {
	fn post(&self, message: String);
}

impl<T: CommandSink + ?Sized> CommandSink for &T {
	fn post(&self, message: String) {
		(**self).post(message)
	}
}

/// Host half of the bridge: owns the floor's anchors and emits one command per
/// computed route.
pub struct VisualizationBridge<S> {
	sink: S,
	coordinates: CoordinateTable,
}

impl<S: CommandSink> VisualizationBridge<S> {
	pub fn new(sink: S, coordinates: CoordinateTable) -> Self {
		Self { sink, coordinates }
	}

	/// Sends `route` to the surface. Empty and single-node routes are sent too
	/// so the previous overlay gets cleared.
	pub fn show_route(&self, route: &Route) {
		match SurfaceCommand::draw_route(route, &self.coordinates).to_message() {
			Ok(message) => {
				info!("posting route overlay ({} nodes)", route.len());
				self.sink.post(message);
			}
			Err(e) => error!("dropping route overlay: {e}"),
		}
	}
}
