//! Indoor routing core: floor topology, solver, anchors and the command sent to
//! the floor-plan surface. Nothing in here touches the browser.

pub mod bridge;
pub mod floor;
pub mod graph;
pub mod overlay;
pub mod projector;
pub mod solver;

pub use bridge::{BridgeError, CommandSink, SurfaceCommand, VisualizationBridge};
pub use floor::{Canvas, FloorData, FloorDataError};
pub use graph::{BuildingGraph, GraphError, NodeId};
pub use overlay::{PathSegment, RouteOverlay};
pub use projector::{CoordinateTable, Point, Projector};
pub use solver::{NO_PATH_FOUND, Route, find_shortest_path};
