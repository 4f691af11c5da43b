//! Blocking overlay lifecycle.
//!
//! An [`OverlayController`] keeps at most one full-screen "please wait"
//! curtain alive. Showing a new overlay tears the previous one down first,
//! and each [`OverlayHandle`] fades its overlay out when released.

pub mod animation;
pub mod config;
pub mod overlay;
pub mod paths;
pub mod view;

pub use config::{ConfigError, CurtainConfig};
pub use overlay::{Generation, OverlayController, OverlayHandle, OverlayState};
pub use view::{
    Fade, HeadlessView, OverlayView, SurfaceError, SurfaceId, SurfaceResult, SurfaceSnapshot,
};

pub fn version() -> &'static str {
    option_env!("VERSION").unwrap_or("v0.0.0-dev")
}
