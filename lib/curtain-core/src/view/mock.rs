use crate::view::{Fade, OverlayView, SurfaceError, SurfaceId, SurfaceResult};
use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Create(SurfaceId),
    SetMessage(SurfaceId, String),
    RunTransition(SurfaceId, Fade),
    Close(SurfaceId),
}

/// A transition completion the mock is holding back.
pub struct PendingCompletion {
    pub surface: SurfaceId,
    pub fade: Fade,
    callback: Box<dyn FnOnce()>,
}

impl PendingCompletion {
    pub fn fire(self) {
        (self.callback)();
    }
}

/// Render target that records every call and only completes transitions when
/// told to.
pub struct MockView {
    next_id: Cell<SurfaceId>,
    recycle_ids: bool,
    fail_close: Cell<bool>,
    calls: RefCell<Vec<ViewCall>>,
    closed: RefCell<HashSet<SurfaceId>>,
    pending: RefCell<VecDeque<PendingCompletion>>,
}

impl MockView {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            recycle_ids: false,
            fail_close: Cell::new(false),
            calls: RefCell::new(Vec::new()),
            closed: RefCell::new(HashSet::new()),
            pending: RefCell::new(VecDeque::new()),
        }
    }

    /// Hands out the same surface id for every `create`, like a host that
    /// pools its popups.
    pub fn with_recycled_ids() -> Self {
        Self {
            recycle_ids: true,
            ..Self::new()
        }
    }

    /// Makes every following `close` fail as if the host had already torn
    /// the surface down.
    pub fn fail_close(&self, fail: bool) {
        self.fail_close.set(fail);
    }

    pub fn calls(&self) -> Vec<ViewCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn transitions(&self) -> Vec<(SurfaceId, Fade)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                ViewCall::RunTransition(id, fade) => Some((*id, *fade)),
                _ => None,
            })
            .collect()
    }

    pub fn close_count(&self, surface: SurfaceId) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call == ViewCall::Close(surface))
            .count()
    }

    pub fn pending_completions(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Fires the oldest held-back completion. Returns false if none is pending.
    pub fn complete_next(&self) -> bool {
        // Pop before firing; the callback may start another transition.
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some(completion) => {
                completion.fire();
                true
            }
            None => false,
        }
    }

    pub fn complete_all(&self) {
        while self.complete_next() {}
    }

    /// Takes every held-back completion without firing it.
    pub fn take_completions(&self) -> Vec<PendingCompletion> {
        self.pending.borrow_mut().drain(..).collect()
    }
}

impl Default for MockView {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayView for MockView {
    fn create(&self) -> SurfaceId {
        let id = self.next_id.get();
        if !self.recycle_ids {
            self.next_id.set(id + 1);
        }
        self.closed.borrow_mut().remove(&id);
        self.calls.borrow_mut().push(ViewCall::Create(id));
        id
    }

    fn set_message(&self, surface: SurfaceId, text: &str) -> SurfaceResult<()> {
        self.calls
            .borrow_mut()
            .push(ViewCall::SetMessage(surface, text.to_string()));
        if self.closed.borrow().contains(&surface) {
            return Err(SurfaceError::Closed(surface));
        }
        Ok(())
    }

    fn run_transition(&self, surface: SurfaceId, fade: Fade, on_complete: Box<dyn FnOnce()>) {
        self.calls
            .borrow_mut()
            .push(ViewCall::RunTransition(surface, fade));
        self.pending.borrow_mut().push_back(PendingCompletion {
            surface,
            fade,
            callback: on_complete,
        });
    }

    fn close(&self, surface: SurfaceId) -> SurfaceResult<()> {
        self.calls.borrow_mut().push(ViewCall::Close(surface));
        if self.fail_close.get() {
            return Err(SurfaceError::Host("surface already destroyed".to_string()));
        }
        if !self.closed.borrow_mut().insert(surface) {
            return Err(SurfaceError::Closed(surface));
        }
        Ok(())
    }
}
