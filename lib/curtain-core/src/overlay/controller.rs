use crate::config::CurtainConfig;
use crate::overlay::handle::{EntryRef, OverlayEntry, OverlayHandle};
use crate::overlay::state::OverlayState;
use crate::overlay::Generation;
use crate::view::{Fade, OverlayView, SurfaceError};
use log::debug;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Outcome of tearing an overlay down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Teardown {
    Closed,
    /// The render target had already lost the surface. Counts as closed.
    AlreadyTornDown(SurfaceError),
    AlreadyDismissed,
}

struct Slot {
    generation: Generation,
    entry: EntryRef,
}

pub(crate) struct ControllerInner {
    pub(crate) view: Rc<dyn OverlayView>,
    config: CurtainConfig,
    current: RefCell<Option<Slot>>,
    next_generation: Cell<Generation>,
}

/// Owns the single active-overlay slot.
///
/// Clones share the slot. The controller is tied to the thread it was
/// created on; separate controllers never see each other's overlays.
#[derive(Clone)]
pub struct OverlayController {
    inner: Rc<ControllerInner>,
}

impl OverlayController {
    pub fn new(view: Rc<dyn OverlayView>) -> Self {
        Self::with_config(view, CurtainConfig::default())
    }

    pub fn with_config(view: Rc<dyn OverlayView>, config: CurtainConfig) -> Self {
        Self {
            inner: Rc::new(ControllerInner {
                view,
                config,
                current: RefCell::new(None),
                next_generation: Cell::new(1),
            }),
        }
    }

    /// Replaces whatever overlay is active with a new one and starts fading it in.
    pub fn show(&self, message: impl Into<String>) -> OverlayHandle {
        let handle = self.prepare(message);
        self.inner.begin_enter(handle.entry());
        handle
    }

    /// Like [`show`](Self::show), but the overlay stays invisible until its
    /// first progress update.
    pub fn prepare(&self, message: impl Into<String>) -> OverlayHandle {
        let message = message.into();

        // The previous overlay must be gone before the new one is installed.
        if let Some(teardown) = self.inner.dismiss_current() {
            debug!("Replaced active overlay ({teardown:?})");
        }

        let generation = self.inner.next_generation.get();
        self.inner.next_generation.set(generation + 1);

        let surface = self.inner.view.create();
        let _ = self.inner.view.set_message(surface, &message);

        let entry = Rc::new(RefCell::new(OverlayEntry::new(generation, surface, message)));
        *self.inner.current.borrow_mut() = Some(Slot {
            generation,
            entry: entry.clone(),
        });
        debug!("Installed overlay {generation} on surface {surface}");

        OverlayHandle::new(entry, self.inner.clone())
    }

    pub fn has_active(&self) -> bool {
        self.inner.current.borrow().is_some()
    }

    pub fn current_generation(&self) -> Option<Generation> {
        self.inner
            .current
            .borrow()
            .as_ref()
            .map(|slot| slot.generation)
    }

    /// Immediately dismisses the active overlay, if any.
    pub fn dismiss_current(&self) {
        self.inner.dismiss_current();
    }

    pub fn config(&self) -> &CurtainConfig {
        &self.inner.config
    }
}

impl ControllerInner {
    fn dismiss_current(&self) -> Option<Teardown> {
        let entry = self
            .current
            .borrow()
            .as_ref()
            .map(|slot| slot.entry.clone());
        entry.map(|entry| self.dismiss_entry(&entry))
    }

    /// Closes the entry's surface without animation and frees the slot if the
    /// entry still holds it. Close failures are folded into the outcome.
    pub(crate) fn dismiss_entry(&self, entry: &EntryRef) -> Teardown {
        let (generation, surface) = {
            let mut entry = entry.borrow_mut();
            if entry.state.is_dismissed() {
                let generation = entry.generation;
                drop(entry);
                self.release_slot(generation);
                return Teardown::AlreadyDismissed;
            }
            entry.state = OverlayState::Dismissed;
            (entry.generation, entry.surface.take())
        };

        let teardown = match surface {
            Some(surface) => match self.view.close(surface) {
                Ok(()) => Teardown::Closed,
                Err(e) => Teardown::AlreadyTornDown(e),
            },
            None => Teardown::Closed,
        };

        self.release_slot(generation);
        debug!("Dismissed overlay {generation}");
        teardown
    }

    /// Clears the slot only if `generation` still occupies it.
    pub(crate) fn release_slot(&self, generation: Generation) {
        let mut current = self.current.borrow_mut();
        if current
            .as_ref()
            .is_some_and(|slot| slot.generation == generation)
        {
            *current = None;
        }
    }

    pub(crate) fn begin_enter(self: &Rc<Self>, entry: &EntryRef) {
        let (generation, surface) = {
            let mut entry = entry.borrow_mut();
            let Some(next) = entry.state.on_update() else {
                return;
            };
            let Some(surface) = entry.surface else {
                return;
            };
            entry.state = next;
            entry.shown = true;
            (entry.generation, surface)
        };

        debug!("Fading in overlay {generation}");
        let controller = Rc::downgrade(self);
        let weak_entry = Rc::downgrade(entry);
        self.view.run_transition(
            surface,
            Fade::enter(self.config.fade_in_ms),
            Box::new(move || {
                let (Some(controller), Some(entry)) = (controller.upgrade(), weak_entry.upgrade())
                else {
                    return;
                };
                controller.finish_enter(&entry);
            }),
        );
    }

    fn finish_enter(&self, entry: &EntryRef) {
        let mut entry = entry.borrow_mut();
        if let Some(next) = entry.state.on_enter_complete() {
            entry.state = next;
        }
    }

    pub(crate) fn begin_exit(self: &Rc<Self>, entry: &EntryRef) {
        let (generation, surface) = {
            let mut entry = entry.borrow_mut();
            if entry.state != OverlayState::Shown {
                return;
            }
            let Some(surface) = entry.surface else {
                return;
            };
            entry.state = OverlayState::Exiting;
            (entry.generation, surface)
        };

        debug!("Fading out overlay {generation}");
        let controller = Rc::downgrade(self);
        let weak_entry = Rc::downgrade(entry);
        self.view.run_transition(
            surface,
            Fade::exit(self.config.fade_out_ms),
            Box::new(move || {
                let (Some(controller), Some(entry)) = (controller.upgrade(), weak_entry.upgrade())
                else {
                    return;
                };
                controller.dismiss_entry(&entry);
            }),
        );
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        if let Some(slot) = self.current.get_mut().take() {
            let surface = {
                let mut entry = slot.entry.borrow_mut();
                entry.state = OverlayState::Dismissed;
                entry.surface.take()
            };
            if let Some(surface) = surface {
                let _ = self.view.close(surface);
            }
        }
    }
}
