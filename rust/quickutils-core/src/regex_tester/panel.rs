//! Single-instance panel handle
//!
//! Only one Regex Tester panel exists at a time. Opening while one is open
//! reveals it instead of creating another; closing clears the handle.

use std::cell::RefCell;

use super::session::TesterSession;
use crate::config::TesterConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Created,
    Revealed,
}

/// Optional handle with create-or-reveal semantics
#[derive(Debug)]
pub struct PanelSlot<P> {
    current: Option<P>,
}

impl<P> Default for PanelSlot<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> PanelSlot<P> {
    pub const fn new() -> Self {
        Self { current: None }
    }

    pub fn open_or_reveal(&mut self, create: impl FnOnce() -> P) -> PanelAction {
        if self.current.is_some() {
            return PanelAction::Revealed;
        }
        self.current = Some(create());
        PanelAction::Created
    }

    /// Drop the handle, returning the panel that was open
    pub fn dispose(&mut self) -> Option<P> {
        self.current.take()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn get(&self) -> Option<&P> {
        self.current.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut P> {
        self.current.as_mut()
    }
}

// =============================================================================
// Process-wide Regex Tester panel
// =============================================================================

thread_local! {
    static TESTER_PANEL: RefCell<PanelSlot<TesterSession>> = const { RefCell::new(PanelSlot::new()) };
}

pub fn open_tester_panel(config: TesterConfig) -> PanelAction {
    let action = TESTER_PANEL.with(|slot| {
        slot.borrow_mut()
            .open_or_reveal(|| TesterSession::new(config))
    });
    log::debug!("Regex Tester panel {:?}", action);
    action
}

pub fn close_tester_panel() -> bool {
    TESTER_PANEL.with(|slot| slot.borrow_mut().dispose().is_some())
}

pub fn is_tester_panel_open() -> bool {
    TESTER_PANEL.with(|slot| slot.borrow().is_open())
}

/// Run `f` against the open panel's session, if any
pub fn with_tester_panel<R>(f: impl FnOnce(&mut TesterSession) -> R) -> Option<R> {
    TESTER_PANEL.with(|slot| slot.borrow_mut().get_mut().map(f))
}
