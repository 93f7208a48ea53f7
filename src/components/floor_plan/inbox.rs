use std::cell::RefCell;
use std::rc::Rc;

use log::warn;

use super::state::FloorPlanState;
use crate::wayfinding::CommandSink;

/// Shared slot holding the surface state once its canvas has mounted.
pub type SurfaceSlot = Rc<RefCell<Option<FloorPlanState>>>;

/// Delivery point for host commands. Messages posted before the surface is
/// ready are dropped, not queued.
#[derive(Clone, Default)]
pub struct SurfaceInbox {
	slot: SurfaceSlot,
}

impl SurfaceInbox {
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn slot(&self) -> &SurfaceSlot {
		&self.slot
	}

	/// Whether a command posted now would be executed.
	pub fn is_ready(&self) -> bool {
		self.slot.try_borrow_mut().map(|s| s.is_some()).unwrap_or(false)
	}

	/// Installs the surface state; commands posted from now on are executed.
	pub fn attach(&self, state: FloorPlanState) {
		*self.slot.borrow_mut() = Some(state);
	}

	/// Read access to the surface, if it is mounted and not mid-frame.
	pub fn inspect<R>(&self, f: impl FnOnce(&FloorPlanState) -> R) -> Option<R> {
		let slot = self.slot.try_borrow().ok()?;
		slot.as_ref().map(f)
	}
}

impl CommandSink for SurfaceInbox {
	fn post(&self, message: String) {
		let Ok(mut slot) = self.slot.try_borrow_mut() else {
			warn!("floor plan busy, dropping command");
			return;
		};
		match slot.as_mut() {
			Some(state) => state.execute(&message),
			None => warn!("floor plan not ready, dropping command"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::SurfaceConfig;
	use crate::wayfinding::{Canvas, CoordinateTable, NodeId, Point, Route, VisualizationBridge};

	fn anchors() -> CoordinateTable {
		[("H831", Point::new(320.0, 950.0)), ("H8C08", Point::new(350.0, 870.0))]
			.into_iter()
			.collect()
	}

	fn route() -> Route {
		Route::from(vec![NodeId::new("H831"), NodeId::new("H8C08")])
	}

	fn mount(inbox: &SurfaceInbox) {
		inbox.attach(FloorPlanState::new(
			Canvas { width: 1024.0, height: 1024.0 },
			SurfaceConfig::default(),
			600.0,
			600.0,
		));
	}

	#[test]
	fn commands_before_mount_are_dropped() {
		let inbox = SurfaceInbox::new();
		let bridge = VisualizationBridge::new(inbox.clone(), anchors());
		assert!(!inbox.is_ready());

		bridge.show_route(&route());
		mount(&inbox);
		assert!(inbox.is_ready());

		assert_eq!(inbox.inspect(|s| s.overlay().is_none()), Some(true));
	}

	#[test]
	fn commands_after_mount_are_executed() {
		let inbox = SurfaceInbox::new();
		let bridge = VisualizationBridge::new(inbox.clone(), anchors());
		mount(&inbox);

		bridge.show_route(&route());

		let drawn = inbox.inspect(|s| s.overlay().map(|o| o.svg_path_data()));
		assert_eq!(drawn, Some(Some("M 320 950 L 350 870".to_string())));
	}

	#[test]
	fn command_during_a_surface_borrow_is_dropped() {
		let inbox = SurfaceInbox::new();
		let bridge = VisualizationBridge::new(inbox.clone(), anchors());
		mount(&inbox);

		{
			let _frame = inbox.slot().borrow();
			assert!(!inbox.is_ready());
			bridge.show_route(&route());
		}
		assert!(inbox.is_ready());

		assert_eq!(inbox.inspect(|s| s.overlay().is_none()), Some(true));
	}
}
