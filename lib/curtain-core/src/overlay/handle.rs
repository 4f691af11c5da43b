use crate::overlay::controller::ControllerInner;
use crate::overlay::state::{Disposal, OverlayState};
use crate::overlay::Generation;
use crate::view::SurfaceId;
use log::trace;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub(crate) type EntryRef = Rc<RefCell<OverlayEntry>>;

pub(crate) struct OverlayEntry {
    pub(crate) generation: Generation,
    pub(crate) state: OverlayState,
    /// Set once the enter transition has been started
    pub(crate) shown: bool,
    pub(crate) message: String,
    /// `None` once dismissed, never restored
    pub(crate) surface: Option<SurfaceId>,
}

impl OverlayEntry {
    pub(crate) fn new(generation: Generation, surface: SurfaceId, message: String) -> Self {
        Self {
            generation,
            state: OverlayState::Created,
            shown: false,
            message,
            surface: Some(surface),
        }
    }
}

/// Handle to one blocking overlay.
///
/// Dropping the handle releases the overlay: a fully shown overlay fades out,
/// anything else is dismissed on the spot.
#[must_use = "dropping an OverlayHandle releases the overlay immediately"]
pub struct OverlayHandle {
    entry: EntryRef,
    controller: Rc<ControllerInner>,
}

impl OverlayHandle {
    pub(crate) fn new(entry: EntryRef, controller: Rc<ControllerInner>) -> Self {
        Self { entry, controller }
    }

    pub(crate) fn entry(&self) -> &EntryRef {
        &self.entry
    }

    /// Replaces the displayed message. The first update on an overlay that has
    /// not appeared yet also starts its fade-in.
    ///
    /// Does nothing once the overlay is dismissed.
    pub fn update_progress(&self, message: impl Into<String>) {
        let message = message.into();

        let surface = {
            let mut entry = self.entry.borrow_mut();
            if entry.state.is_dismissed() {
                return;
            }
            entry.message = message.clone();
            entry.surface
        };

        if let Some(surface) = surface {
            // A surface the host already dropped is handled at dismissal.
            let _ = self.controller.view.set_message(surface, &message);
        }

        self.controller.begin_enter(&self.entry);
    }

    /// Numeric variant of [`update_progress`](Self::update_progress).
    ///
    /// The indicator stays indeterminate, so `value` and `max` do not change
    /// what is rendered.
    pub fn update_progress_value(&self, message: impl Into<String>, value: u32, max: u32) {
        trace!(
            "Overlay {} progress {}/{}",
            self.generation(),
            value,
            max
        );
        self.update_progress(message);
    }

    /// Tears the overlay down immediately, without a fade.
    pub fn dismiss(&self) {
        self.controller.dismiss_entry(&self.entry);
    }

    /// Scoped release: fades out a shown overlay and dismisses it once the
    /// fade completes, otherwise dismisses right away.
    pub fn dispose_scoped(&self) {
        let disposal = self.entry.borrow().state.on_dispose();
        match disposal {
            Disposal::Animate => self.controller.begin_exit(&self.entry),
            Disposal::Immediate => {
                self.controller.dismiss_entry(&self.entry);
            }
            Disposal::Ignore => {}
        }
    }

    pub fn state(&self) -> OverlayState {
        self.entry.borrow().state
    }

    /// Whether the enter transition has been started.
    pub fn is_shown(&self) -> bool {
        self.entry.borrow().shown
    }

    pub fn is_dismissed(&self) -> bool {
        self.state().is_dismissed()
    }

    pub fn message(&self) -> String {
        self.entry.borrow().message.clone()
    }

    pub fn generation(&self) -> Generation {
        self.entry.borrow().generation
    }

    pub fn surface(&self) -> Option<SurfaceId> {
        self.entry.borrow().surface
    }
}

impl fmt::Debug for OverlayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.entry.borrow();
        f.debug_struct("OverlayHandle")
            .field("generation", &entry.generation)
            .field("state", &entry.state)
            .field("message", &entry.message)
            .field("surface", &entry.surface)
            .finish()
    }
}

impl Drop for OverlayHandle {
    fn drop(&mut self) {
        self.dispose_scoped();
    }
}
