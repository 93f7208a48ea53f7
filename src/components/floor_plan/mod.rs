mod component;
mod inbox;
mod render;
mod state;
mod view;

pub use component::FloorPlanCanvas;
pub use inbox::SurfaceInbox;
pub use state::{FloorPlanState, PanState};
pub use view::{ViewBox, ViewState};
