// src/state.rs

use crate::models::EnvironmentRecord;

/// A request, made from inside an active session, to leave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchRequest {
    /// Environment to activate next. `None` returns to the menu.
    pub target: Option<String>,
}

/// Runtime-only session state. Never persisted.
///
/// Owned by the session loop and threaded through each transition. Proxy commands
/// can only influence it through [`SessionState::request_switch`].
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    active: Option<EnvironmentRecord>,
    switch: Option<SwitchRequest>,
    pending_target: Option<String>,
}

impl SessionState {
    /// Starts a session that will jump straight to `target` on the first menu cycle.
    pub fn with_pending_target(target: Option<String>) -> Self {
        Self {
            pending_target: target.filter(|t| !t.trim().is_empty()),
            ..Default::default()
        }
    }

    /// The environment currently bound, if any.
    pub fn active(&self) -> Option<&EnvironmentRecord> {
        self.active.as_ref()
    }

    /// Binds `record` as the session's active environment.
    pub fn set_active(&mut self, record: EnvironmentRecord) {
        self.active = Some(record);
    }

    /// The single mutation point available to proxy commands.
    pub fn request_switch(&mut self, target: Option<String>) {
        self.switch = Some(SwitchRequest { target });
    }

    /// Leaves the active environment, carrying a named switch target forward to the
    /// next menu cycle. Returns `true` if a switch had been requested.
    pub fn finish_active(&mut self) -> bool {
        self.active = None;
        match self.switch.take() {
            Some(request) => {
                self.pending_target = request.target;
                true
            }
            None => false,
        }
    }

    /// Consumes the pending switch target, if any.
    pub fn take_pending_target(&mut self) -> Option<String> {
        self.pending_target.take()
    }
}
