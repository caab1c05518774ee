// sftpbatch Session State
//
// The interpreter holds at most one live session:
//
//   NoSession ──OPEN──▶ SessionOpen ──CLOSE──▶ NoSession
//                          │  ▲
//                          └──┘ OPEN (prior handle is parked, not closed)
//
// CLOSE / DOWN / UP / DIR in NoSession fail with NoActiveSession.

#[derive(Debug)]
pub enum SessionState<S> {
    NoSession,
    SessionOpen(S),
}

impl<S> Default for SessionState<S> {
    fn default() -> Self {
        SessionState::NoSession
    }
}

impl<S> SessionState<S> {
    pub fn is_open(&self) -> bool {
        matches!(self, SessionState::SessionOpen(_))
    }

    pub fn session_mut(&mut self) -> Option<&mut S> {
        match self {
            SessionState::SessionOpen(s) => Some(s),
            SessionState::NoSession      => None,
        }
    }

    /// Moves to SessionOpen, handing back the session it replaces
    pub fn open(&mut self, session: S) -> Option<S> {
        match std::mem::replace(self, SessionState::SessionOpen(session)) {
            SessionState::SessionOpen(prev) => Some(prev),
            SessionState::NoSession         => None,
        }
    }

    /// Moves to NoSession, handing back the session that was open
    pub fn take(&mut self) -> Option<S> {
        match std::mem::take(self) {
            SessionState::SessionOpen(s) => Some(s),
            SessionState::NoSession      => None,
        }
    }
}
