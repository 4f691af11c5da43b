mod headless;
pub mod mock;

pub use headless::{HeadlessView, SurfaceSnapshot, MAX_ANIMATION_FPS};

use thiserror::Error;

pub type SurfaceId = u64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("Surface {0} was detached by the host")]
    Detached(SurfaceId),
    #[error("Surface {0} is already closed")]
    Closed(SurfaceId),
    #[error("Render target error: {0}")]
    Host(String),
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// A single opacity transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub from: f32,
    pub to: f32,
    pub duration_ms: u32,
}

impl Fade {
    pub fn enter(duration_ms: u32) -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            duration_ms,
        }
    }

    pub fn exit(duration_ms: u32) -> Self {
        Self {
            from: 1.0,
            to: 0.0,
            duration_ms,
        }
    }
}

/// Render target for blocking overlays.
///
/// Implementations own the actual curtain (backdrop, message text, and an
/// indeterminate busy indicator). All calls arrive on the render target's own
/// thread.
pub trait OverlayView {
    /// Allocates a surface at zero opacity, attached but not yet visible.
    fn create(&self) -> SurfaceId;

    fn set_message(&self, surface: SurfaceId, text: &str) -> SurfaceResult<()>;

    /// Starts a single-shot opacity transition. `on_complete` must be invoked
    /// exactly once after the transition finishes, on the render target's
    /// scheduling thread.
    fn run_transition(&self, surface: SurfaceId, fade: Fade, on_complete: Box<dyn FnOnce()>);

    /// Releases the surface. May fail if the host already tore it down.
    fn close(&self, surface: SurfaceId) -> SurfaceResult<()>;
}
