//! Walkable topology of one building floor.
//!
//! The graph is an adjacency list keyed by [`NodeId`]. Both the node order and
//! every neighbor list keep the order they were supplied in; the solver breaks
//! ties between equally short routes by that order, so it is part of the
//! public contract rather than an accident of the storage.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Identifier of a room or corridor junction, unique within one floor (e.g. `H831`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for NodeId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for NodeId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for NodeId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

/// Structural problems found while validating an adjacency list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
	#[error("node {0} is declared more than once")]
	DuplicateNode(NodeId),
	#[error("node {node} lists neighbor {neighbor} more than once")]
	DuplicateNeighbor { node: NodeId, neighbor: NodeId },
	#[error("node {node} references unknown neighbor {neighbor}")]
	UnknownNeighbor { node: NodeId, neighbor: NodeId },
	#[error("edge {from} -> {to} has no matching edge {to} -> {from}")]
	AsymmetricEdge { from: NodeId, to: NodeId },
}

/// Validated, read-only adjacency list of one floor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildingGraph {
	nodes: Vec<NodeId>,
	index: HashMap<NodeId, usize>,
	adjacency: Vec<Vec<usize>>,
}

impl BuildingGraph {
	/// Builds a graph from `(node, neighbors)` entries, preserving their order.
	///
	/// Fails if a node is declared twice, a neighbor list repeats an id, a
	/// neighbor is not itself a node, or an edge is missing its reverse.
	pub fn from_adjacency<I, N, A>(entries: I) -> Result<Self, GraphError>
	where
		I: IntoIterator<Item = (N, A)>,
		N: Into<NodeId>,
		A: IntoIterator,
		A::Item: Into<NodeId>,
	{
		let mut nodes = Vec::new();
		let mut index = HashMap::new();
		let mut raw: Vec<Vec<NodeId>> = Vec::new();

		for (node, neighbors) in entries {
			let node = node.into();
			if index.contains_key(&node) {
				return Err(GraphError::DuplicateNode(node));
			}
			index.insert(node.clone(), nodes.len());
			nodes.push(node);
			raw.push(neighbors.into_iter().map(Into::into).collect());
		}

		let mut adjacency = Vec::with_capacity(raw.len());
		for (idx, neighbors) in raw.into_iter().enumerate() {
			let mut seen = HashSet::with_capacity(neighbors.len());
			let mut resolved = Vec::with_capacity(neighbors.len());
			for neighbor in neighbors {
				let Some(&n) = index.get(&neighbor) else {
					return Err(GraphError::UnknownNeighbor {
						node: nodes[idx].clone(),
						neighbor,
					});
				};
				if !seen.insert(n) {
					return Err(GraphError::DuplicateNeighbor {
						node: nodes[idx].clone(),
						neighbor,
					});
				}
				resolved.push(n);
			}
			adjacency.push(resolved);
		}

		for (from, neighbors) in adjacency.iter().enumerate() {
			for &to in neighbors {
				if !adjacency[to].contains(&from) {
					return Err(GraphError::AsymmetricEdge {
						from: nodes[from].clone(),
						to: nodes[to].clone(),
					});
				}
			}
		}

		Ok(Self {
			nodes,
			index,
			adjacency,
		})
	}

	/// Node ids in declaration order.
	pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
		self.nodes.iter()
	}

	/// Neighbors of `id` in their stored order, or `None` for an unknown id.
	pub fn neighbors(&self, id: &str) -> Option<impl Iterator<Item = &NodeId>> {
		let idx = *self.index.get(id)?;
		Some(self.adjacency[idx].iter().map(|&n| &self.nodes[n]))
	}

	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	pub fn are_adjacent(&self, a: &str, b: &str) -> bool {
		match (self.index.get(a), self.index.get(b)) {
			(Some(&a), Some(&b)) => self.adjacency[a].contains(&b),
			_ => false,
		}
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub(crate) fn neighbor_indices(&self, idx: usize) -> &[usize] {
		&self.adjacency[idx]
	}

	pub(crate) fn node_at(&self, idx: usize) -> &NodeId {
		&self.nodes[idx]
	}
}

impl Serialize for BuildingGraph {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.nodes.len()))?;
		for (idx, node) in self.nodes.iter().enumerate() {
			let neighbors: Vec<&NodeId> =
				self.adjacency[idx].iter().map(|&n| &self.nodes[n]).collect();
			map.serialize_entry(node, &neighbors)?;
		}
		map.end()
	}
}

impl<'de> Deserialize<'de> for BuildingGraph {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct AdjacencyVisitor;

		impl<'de> Visitor<'de> for AdjacencyVisitor {
			type Value = BuildingGraph;

			fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("a map from node id to a list of neighbor ids")
			}

			fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
				// Walk entries directly so document order survives.
				let mut entries: Vec<(NodeId, Vec<NodeId>)> =
					Vec::with_capacity(access.size_hint().unwrap_or(0));
				while let Some(entry) = access.next_entry()? {
					entries.push(entry);
				}
				BuildingGraph::from_adjacency(entries).map_err(serde::de::Error::custom)
			}
		}

		deserializer.deserialize_map(AdjacencyVisitor)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn corridor() -> BuildingGraph {
		BuildingGraph::from_adjacency([
			("H801", vec!["H803"]),
			("H803", vec!["H801", "H805"]),
			("H805", vec!["H803", "H807"]),
			("H807", vec!["H805"]),
		])
		.unwrap()
	}

	#[test]
	fn keeps_declaration_and_neighbor_order() {
		let graph = BuildingGraph::from_adjacency([
			("H8C02", vec!["H8C03", "H8C01", "H805"]),
			("H8C01", vec!["H8C02"]),
			("H8C03", vec!["H8C02"]),
			("H805", vec!["H8C02"]),
		])
		.unwrap();

		let ids: Vec<&str> = graph.node_ids().map(NodeId::as_str).collect();
		assert_eq!(ids, ["H8C02", "H8C01", "H8C03", "H805"]);

		let neighbors: Vec<&str> = graph.neighbors("H8C02").unwrap().map(NodeId::as_str).collect();
		assert_eq!(neighbors, ["H8C03", "H8C01", "H805"]);
	}

	#[test]
	fn answers_membership_and_adjacency() {
		let graph = corridor();
		assert_eq!(graph.len(), 4);
		assert!(graph.contains("H805"));
		assert!(!graph.contains("H999"));
		assert!(graph.are_adjacent("H803", "H805"));
		assert!(graph.are_adjacent("H805", "H803"));
		assert!(!graph.are_adjacent("H801", "H805"));
		assert!(!graph.are_adjacent("H801", "H999"));
		assert!(graph.neighbors("H999").is_none());
	}

	#[test]
	fn isolated_node_is_valid() {
		let graph =
			BuildingGraph::from_adjacency([("H801", vec!["H803"]), ("H803", vec!["H801"]), ("H999", vec![])])
				.unwrap();
		assert_eq!(graph.neighbors("H999").unwrap().count(), 0);
	}

	#[rstest]
	#[case::dangling(
		vec![("H801", vec!["H803"]), ("H803", vec!["H801", "H899"])],
		GraphError::UnknownNeighbor { node: "H803".into(), neighbor: "H899".into() }
	)]
	#[case::one_way(
		vec![("H801", vec!["H803"]), ("H803", vec![])],
		GraphError::AsymmetricEdge { from: "H801".into(), to: "H803".into() }
	)]
	#[case::repeated_key(
		vec![("H801", vec![]), ("H801", vec![])],
		GraphError::DuplicateNode("H801".into())
	)]
	#[case::repeated_neighbor(
		vec![("H801", vec!["H803", "H803"]), ("H803", vec!["H801"])],
		GraphError::DuplicateNeighbor { node: "H801".into(), neighbor: "H803".into() }
	)]
	fn rejects_invalid_adjacency(#[case] entries: Vec<(&str, Vec<&str>)>, #[case] expected: GraphError) {
		assert_eq!(BuildingGraph::from_adjacency(entries).unwrap_err(), expected);
	}

	#[test]
	fn deserializes_in_document_order() {
		let graph: BuildingGraph =
			serde_json::from_str(r#"{"H807":["H805"],"H805":["H807","H803"],"H803":["H805"]}"#).unwrap();
		let ids: Vec<&str> = graph.node_ids().map(NodeId::as_str).collect();
		assert_eq!(ids, ["H807", "H805", "H803"]);

		let json = serde_json::to_string(&graph).unwrap();
		assert_eq!(json, r#"{"H807":["H805"],"H805":["H807","H803"],"H803":["H805"]}"#);
	}

	#[test]
	fn deserialization_runs_validation() {
		let err = serde_json::from_str::<BuildingGraph>(r#"{"H801":["H803"]}"#).unwrap_err();
		assert!(err.to_string().contains("unknown neighbor H803"), "{err}");
	}
}
