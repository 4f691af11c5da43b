mod controller;
mod handle;
mod state;

pub use controller::OverlayController;
pub use handle::OverlayHandle;
pub use state::OverlayState;

/// Token identifying one overlay for the lifetime of its controller.
pub type Generation = u64;
