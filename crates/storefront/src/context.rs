use std::sync::Arc;

use fastchow_core::SessionId;

use crate::app::sessions::StorefrontSession;

/// Cart session bound to the current request.
///
/// Inserted by the session middleware; present on every route.
#[derive(Debug, Clone)]
pub struct SessionContext {
    session: Arc<StorefrontSession>,
}

impl SessionContext {
    pub fn new(session: Arc<StorefrontSession>) -> Self {
        Self { session }
    }

    pub fn session_id(&self) -> SessionId {
        self.session.id()
    }

    pub fn session(&self) -> &Arc<StorefrontSession> {
        &self.session
    }
}
