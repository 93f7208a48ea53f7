//! Drawing anchors for graph nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::graph::NodeId;

/// A point in the floor-plan image's native coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Resolves a node id to the point it is drawn at.
///
/// Returns `None` for nodes without a digitized anchor; callers decide how to
/// degrade.
pub trait Projector {
	fn project(&self, node: &str) -> Option<Point>;
}

/// Per-floor node id to drawing point table. May cover only part of the graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordinateTable {
	points: BTreeMap<NodeId, Point>,
}

impl CoordinateTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, node: impl Into<NodeId>, point: Point) -> Option<Point> {
		self.points.insert(node.into(), point)
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &Point)> {
		self.points.iter()
	}
}

impl Projector for CoordinateTable {
	fn project(&self, node: &str) -> Option<Point> {
		self.points.get(node).copied()
	}
}

impl<N: Into<NodeId>> FromIterator<(N, Point)> for CoordinateTable {
	fn from_iter<T: IntoIterator<Item = (N, Point)>>(iter: T) -> Self {
		Self {
			points: iter.into_iter().map(|(node, point)| (node.into(), point)).collect(),
		}
	}
}

/// Digitized anchors come either flat or wrapped as `{"nearestPoint": {..}}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum AnchorEntry {
	Flat(Point),
	Nearest {
		#[serde(rename = "nearestPoint")]
		nearest_point: Point,
	},
}

impl From<AnchorEntry> for Point {
	fn from(entry: AnchorEntry) -> Self {
		match entry {
			AnchorEntry::Flat(point) => point,
			AnchorEntry::Nearest { nearest_point } => nearest_point,
		}
	}
}

impl Serialize for CoordinateTable {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.points.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for CoordinateTable {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let entries = BTreeMap::<NodeId, AnchorEntry>::deserialize(deserializer)?;
		Ok(entries.into_iter().map(|(node, entry)| (node, Point::from(entry))).collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn projects_known_nodes_and_reports_absence() {
		let table: CoordinateTable =
			[("H801", Point::new(110.0, 180.0)), ("H803", Point::new(280.0, 180.0))]
				.into_iter()
				.collect();

		assert_eq!(table.project("H803"), Some(Point::new(280.0, 180.0)));
		assert_eq!(table.project("H805"), None);
	}

	#[test]
	fn reads_flat_and_nearest_point_entries() {
		let table: CoordinateTable = serde_json::from_str(
			r#"{"H801":{"x":110,"y":180},"H831":{"nearestPoint":{"x":320.5,"y":950}}}"#,
		)
		.unwrap();

		assert_eq!(table.len(), 2);
		assert_eq!(table.project("H801"), Some(Point::new(110.0, 180.0)));
		assert_eq!(table.project("H831"), Some(Point::new(320.5, 950.0)));
	}

	#[test]
	fn writes_flat_entries() {
		let mut table = CoordinateTable::new();
		table.insert("H831", Point::new(320.5, 950.0));
		assert_eq!(
			serde_json::to_string(&table).unwrap(),
			r#"{"H831":{"x":320.5,"y":950.0}}"#
		);
	}
}
