//! Session identity tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one media session. Two sessions for the same identifier get
/// different ids, so a reload can be told apart from its predecessor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u32);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// Monotonic allocator for SessionId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_session: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids start at 1 so 0 never names a live session.
    #[inline]
    pub fn alloc_session(&mut self) -> SessionId {
        self.next_session = self.next_session.wrapping_add(1);
        SessionId(self.next_session)
    }
}
