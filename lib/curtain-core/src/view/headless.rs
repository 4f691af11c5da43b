use crate::animation::{ease_in_out_sine, Animator};
use crate::config::CurtainConfig;
use crate::view::{Fade, OverlayView, SurfaceError, SurfaceId, SurfaceResult};
use log::{trace, warn};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSnapshot {
    pub opacity: f32,
    pub message: String,
}

/// Frame rates above this are clamped; the frame period never drops below 1ms.
pub const MAX_ANIMATION_FPS: u32 = 1000;

/// In-memory render target.
///
/// Fades run on `tokio::task::spawn_local`, so every call that starts a
/// transition must happen inside a `LocalSet`. Without any tokio runtime the
/// surface jumps straight to its target opacity and the completion fires at once.
pub struct HeadlessView {
    fps: u32,
    default_message: String,
    next_id: Cell<SurfaceId>,
    surfaces: Rc<RefCell<HashMap<SurfaceId, SurfaceSnapshot>>>,
}

impl HeadlessView {
    pub fn new(config: &CurtainConfig) -> Self {
        Self {
            fps: config.animation_fps.clamp(1, MAX_ANIMATION_FPS),
            default_message: config.default_message.clone(),
            next_id: Cell::new(1),
            surfaces: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn snapshot(&self, surface: SurfaceId) -> Option<SurfaceSnapshot> {
        self.surfaces.borrow().get(&surface).cloned()
    }

    pub fn live_surfaces(&self) -> Vec<SurfaceId> {
        let mut ids: Vec<_> = self.surfaces.borrow().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Drops a surface behind the controller's back, as a host tearing down
    /// its window would.
    pub fn detach(&self, surface: SurfaceId) -> bool {
        self.surfaces.borrow_mut().remove(&surface).is_some()
    }
}

impl Default for HeadlessView {
    fn default() -> Self {
        Self::new(&CurtainConfig::default())
    }
}

impl OverlayView for HeadlessView {
    fn create(&self) -> SurfaceId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.surfaces.borrow_mut().insert(
            id,
            SurfaceSnapshot {
                opacity: 0.0,
                message: self.default_message.clone(),
            },
        );
        trace!("Created surface {id}");
        id
    }

    fn set_message(&self, surface: SurfaceId, text: &str) -> SurfaceResult<()> {
        let mut surfaces = self.surfaces.borrow_mut();
        let snapshot = surfaces
            .get_mut(&surface)
            .ok_or(SurfaceError::Detached(surface))?;
        snapshot.message = text.to_string();
        Ok(())
    }

    fn run_transition(&self, surface: SurfaceId, fade: Fade, on_complete: Box<dyn FnOnce()>) {
        if tokio::runtime::Handle::try_current().is_err() {
            warn!("No tokio runtime for the fade on surface {surface}, skipping to the end");
            if let Some(snapshot) = self.surfaces.borrow_mut().get_mut(&surface) {
                snapshot.opacity = fade.to;
            }
            on_complete();
            return;
        }

        let surfaces = self.surfaces.clone();
        let frame_duration = Duration::from_secs_f64(1.0 / self.fps as f64)
            .max(Duration::from_millis(1));

        tokio::task::spawn_local(async move {
            let mut animator = Animator::new(fade.from, fade.from, ease_in_out_sine);
            animator.start_from(fade.from, fade.to, fade.duration_ms);
            let mut ticker = tokio::time::interval(frame_duration);

            while animator.is_animating() {
                ticker.tick().await;
                let Some(opacity) = animator.update() else {
                    break;
                };
                match surfaces.borrow_mut().get_mut(&surface) {
                    Some(snapshot) => snapshot.opacity = opacity,
                    // Closed mid-fade; the completion still has to fire.
                    None => break,
                }
            }

            trace!("Transition on surface {surface} finished");
            on_complete();
        });
    }

    fn close(&self, surface: SurfaceId) -> SurfaceResult<()> {
        self.surfaces
            .borrow_mut()
            .remove(&surface)
            .map(|_| ())
            .ok_or(SurfaceError::Detached(surface))
    }
}
