/// Lifecycle of a single overlay.
///
/// ```text
/// Created --enter--> Entering --enter complete--> Shown
/// Shown --dispose--> Exiting --exit complete--> Dismissed
/// Created | Entering --dispose--> Dismissed
/// any live state --dismiss--> Dismissed
/// ```
///
/// `Dismissed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayState {
    Created,
    Entering,
    Shown,
    Exiting,
    Dismissed,
}

/// What a scoped release should do from the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Disposal {
    /// Fade out, then dismiss.
    Animate,
    /// Dismiss right away, nothing was fully visible.
    Immediate,
    /// Already exiting or dismissed.
    Ignore,
}

impl OverlayState {
    pub fn is_dismissed(self) -> bool {
        self == OverlayState::Dismissed
    }

    /// The state a message update moves to, if it starts the enter transition.
    pub(crate) fn on_update(self) -> Option<OverlayState> {
        match self {
            OverlayState::Created => Some(OverlayState::Entering),
            _ => None,
        }
    }

    pub(crate) fn on_enter_complete(self) -> Option<OverlayState> {
        match self {
            OverlayState::Entering => Some(OverlayState::Shown),
            _ => None,
        }
    }

    pub(crate) fn on_dispose(self) -> Disposal {
        match self {
            OverlayState::Shown => Disposal::Animate,
            OverlayState::Created | OverlayState::Entering => Disposal::Immediate,
            OverlayState::Exiting | OverlayState::Dismissed => Disposal::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OverlayState; 5] = [
        OverlayState::Created,
        OverlayState::Entering,
        OverlayState::Shown,
        OverlayState::Exiting,
        OverlayState::Dismissed,
    ];

    #[test]
    fn test_only_created_enters_on_update() {
        for state in ALL {
            let expected = (state == OverlayState::Created).then_some(OverlayState::Entering);
            assert_eq!(state.on_update(), expected, "{state:?}");
        }
    }

    #[test]
    fn test_only_entering_completes_enter() {
        for state in ALL {
            let expected = (state == OverlayState::Entering).then_some(OverlayState::Shown);
            assert_eq!(state.on_enter_complete(), expected, "{state:?}");
        }
    }

    #[test]
    fn test_dispose_animates_only_when_shown() {
        assert_eq!(OverlayState::Shown.on_dispose(), Disposal::Animate);
        assert_eq!(OverlayState::Created.on_dispose(), Disposal::Immediate);
        assert_eq!(OverlayState::Entering.on_dispose(), Disposal::Immediate);
        assert_eq!(OverlayState::Exiting.on_dispose(), Disposal::Ignore);
        assert_eq!(OverlayState::Dismissed.on_dispose(), Disposal::Ignore);
    }

    #[test]
    fn test_dismissed_never_leaves() {
        let state = OverlayState::Dismissed;
        assert!(state.is_dismissed());
        assert_eq!(state.on_update(), None);
        assert_eq!(state.on_enter_complete(), None);
        assert_eq!(state.on_dispose(), Disposal::Ignore);
    }
}
