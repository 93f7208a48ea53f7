//! Per-floor configuration document: topology, anchors and canvas extent.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::graph::BuildingGraph;
use super::projector::CoordinateTable;

const HALL_8: &str = include_str!("../../assets/hall-8.json");

#[derive(Debug, Error)]
pub enum FloorDataError {
	#[error("invalid floor document: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("floor canvas must have a positive size, got {width}x{height}")]
	Canvas { width: f64, height: f64 },
}

/// Native size of the floor-plan image; anchors live in this space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
	pub width: f64,
	pub height: f64,
}

/// Everything loaded once per floor. Immutable for the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorData {
	pub name: String,
	/// URL of the floor-plan image drawn under the route.
	#[serde(default)]
	pub image: Option<String>,
	pub canvas: Canvas,
	pub graph: BuildingGraph,
	#[serde(default)]
	pub coordinates: CoordinateTable,
}

impl FloorData {
	pub fn from_json(document: &str) -> Result<Self, FloorDataError> {
		let floor: FloorData = serde_json::from_str(document)?;

		let Canvas { width, height } = floor.canvas;
		if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
			return Err(FloorDataError::Canvas { width, height });
		}

		for (node, _) in floor.coordinates.iter() {
			if !floor.graph.contains(node.as_str()) {
				debug!("{}: anchor for {node} has no graph node", floor.name);
			}
		}

		info!(
			"loaded floor {} ({} nodes, {} anchors)",
			floor.name,
			floor.graph.len(),
			floor.coordinates.len()
		);
		Ok(floor)
	}

	/// The bundled Hall building 8th floor.
	pub fn hall_8() -> Result<Self, FloorDataError> {
		Self::from_json(HALL_8)
	}
}
