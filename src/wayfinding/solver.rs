//! Minimum-hop routing over a [`BuildingGraph`].

use std::collections::VecDeque;
use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::graph::{BuildingGraph, NodeId};

/// Text shown in place of the steps when no route exists.
pub const NO_PATH_FOUND: &str = "No path found";

/// Ordered node ids from start to end. Empty means "no route".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(Vec<NodeId>);

impl Route {
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn nodes(&self) -> &[NodeId] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Number of edges walked; zero for empty and single-node routes.
	pub fn hops(&self) -> usize {
		self.0.len().saturating_sub(1)
	}

	/// Step labels for the route list, or the single [`NO_PATH_FOUND`] entry.
	pub fn display_steps(&self) -> Vec<String> {
		if self.0.is_empty() {
			return vec![NO_PATH_FOUND.to_string()];
		}
		self.0.iter().map(ToString::to_string).collect()
	}
}

impl From<Vec<NodeId>> for Route {
	fn from(nodes: Vec<NodeId>) -> Self {
		Self(nodes)
	}
}

impl fmt::Display for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			return f.write_str(NO_PATH_FOUND);
		}
		for (i, node) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(" -> ")?;
			}
			write!(f, "{node}")?;
		}
		Ok(())
	}
}

/// Breadth-first search from `start` to `end`.
///
/// Neighbors are expanded in stored order and each node keeps the predecessor
/// that discovered it first, so among equally short routes the one found via
/// adjacency order wins. Unknown and unreachable endpoints both yield an empty
/// route; only the log line tells them apart.
pub fn find_shortest_path(graph: &BuildingGraph, start: &str, end: &str) -> Route {
	if start == end {
		return Route(vec![NodeId::new(start)]);
	}

	let (Some(from), Some(to)) = (graph.index_of(start), graph.index_of(end)) else {
		debug!("no route {start} -> {end}: unknown node");
		return Route::empty();
	};

	let mut predecessor: Vec<Option<usize>> = vec![None; graph.len()];
	let mut visited = vec![false; graph.len()];
	let mut queue = VecDeque::from([from]);
	visited[from] = true;

	'search: while let Some(current) = queue.pop_front() {
		for &next in graph.neighbor_indices(current) {
			if visited[next] {
				continue;
			}
			visited[next] = true;
			predecessor[next] = Some(current);
			if next == to {
				break 'search;
			}
			queue.push_back(next);
		}
	}

	if !visited[to] {
		debug!("no route {start} -> {end}: unreachable");
		return Route::empty();
	}

	let mut nodes = vec![graph.node_at(to).clone()];
	let mut cursor = to;
	while let Some(prev) = predecessor[cursor] {
		nodes.push(graph.node_at(prev).clone());
		cursor = prev;
	}
	nodes.reverse();

	debug!("route {start} -> {end}: {} hops", nodes.len() - 1);
	Route(nodes)
}
