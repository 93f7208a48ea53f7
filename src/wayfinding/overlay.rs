//! Polyline built from a route and its drawing anchors.

use log::warn;

use super::graph::NodeId;
use super::projector::{Point, Projector};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
	MoveTo(Point),
	LineTo(Point),
}

impl PathSegment {
	pub fn point(&self) -> Point {
		match *self {
			PathSegment::MoveTo(p) | PathSegment::LineTo(p) => p,
		}
	}
}

/// The route polyline as drawn on the floor plan.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteOverlay {
	segments: Vec<PathSegment>,
	skipped: Vec<NodeId>,
}

impl RouteOverlay {
	/// Resolves every node of `path` in order.
	///
	/// The first resolved point opens the polyline and each later one extends
	/// it. Nodes without an anchor are left out, so the line runs straight
	/// from the previous resolved point to the next one. Returns `None` when
	/// there is nothing to draw: fewer than two nodes, or no anchor at all.
	pub fn build(path: &[NodeId], projector: &impl Projector) -> Option<Self> {
		if path.len() < 2 {
			return None;
		}

		let mut segments = Vec::with_capacity(path.len());
		let mut skipped = Vec::new();
		for node in path {
			let Some(point) = projector.project(node.as_str()) else {
				warn!("missing coordinates for node {node}");
				skipped.push(node.clone());
				continue;
			};
			segments.push(if segments.is_empty() {
				PathSegment::MoveTo(point)
			} else {
				PathSegment::LineTo(point)
			});
		}

		if segments.is_empty() {
			return None;
		}
		Some(Self { segments, skipped })
	}

	pub fn segments(&self) -> &[PathSegment] {
		&self.segments
	}

	pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
		self.segments.iter().map(PathSegment::point)
	}

	/// Route nodes that had no anchor and were left out of the line.
	pub fn skipped(&self) -> &[NodeId] {
		&self.skipped
	}

	/// SVG `d` attribute for the polyline, e.g. `M 110 180 L 280 180`.
	pub fn svg_path_data(&self) -> String {
		let parts: Vec<String> = self
			.segments
			.iter()
			.map(|segment| match segment {
				PathSegment::MoveTo(p) => format!("M {} {}", p.x, p.y),
				PathSegment::LineTo(p) => format!("L {} {}", p.x, p.y),
			})
			.collect();
		parts.join(" ")
	}
}
