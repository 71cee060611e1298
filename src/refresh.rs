//! Refresh Gate
//!
//! Busy flag that keeps a single nutrition fetch in flight.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct RefreshGate {
    busy: Rc<Cell<bool>>,
}

impl RefreshGate {
    /// Claim the gate. `None` while another fetch holds it.
    pub fn try_enter(&self) -> Option<RefreshGuard> {
        if self.busy.replace(true) {
            return None;
        }
        Some(RefreshGuard {
            busy: Rc::clone(&self.busy),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

/// Releases the gate when dropped
#[derive(Debug)]
pub struct RefreshGuard {
    busy: Rc<Cell<bool>>,
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}
