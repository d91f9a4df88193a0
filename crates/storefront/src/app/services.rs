//! Shared state handed to every handler through an `Extension`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use fastchow_catalog::Catalog;
use fastchow_checkout::{StubWallet, WalletConnector};

use crate::app::realtime::{REALTIME_CAPACITY, RealtimeMessage};
use crate::app::sessions::SessionStore;
use crate::config::StorefrontConfig;

pub struct StorefrontServices {
    pub catalog: Catalog,
    pub sessions: Arc<SessionStore>,
    pub wallet: Arc<dyn WalletConnector>,
    pub sse_keep_alive: Duration,
    realtime_tx: broadcast::Sender<RealtimeMessage>,
}

impl StorefrontServices {
    pub fn realtime_tx(&self) -> &broadcast::Sender<RealtimeMessage> {
        &self.realtime_tx
    }
}

pub fn build_services(config: &StorefrontConfig) -> StorefrontServices {
    let (realtime_tx, _) = broadcast::channel(REALTIME_CAPACITY);

    StorefrontServices {
        catalog: Catalog::standard(),
        sessions: Arc::new(SessionStore::new(realtime_tx.clone(), config.session_idle)),
        wallet: Arc::new(StubWallet),
        sse_keep_alive: config.sse_keepalive,
        realtime_tx,
    }
}
