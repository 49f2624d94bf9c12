//! Turns issued requests into network calls.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::news::NewsApi;

use super::events::AppEvent;
use super::state::BrowserState;

/// Starts one fetch for every request sequence number the reducer issues.
///
/// Requests are never cancelled; the reducer discards responses whose
/// sequence number is no longer the latest.
pub struct FetchOrchestrator<A> {
    api: Arc<A>,
    tx: UnboundedSender<AppEvent>,
    dispatched: u64,
}

impl<A> FetchOrchestrator<A>
where
    A: NewsApi + Send + Sync + 'static,
{
    pub fn new(api: Arc<A>, tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            api,
            tx,
            dispatched: 0,
        }
    }

    /// Dispatch the latest request if it has not been sent yet.
    /// Returns the sequence number that was dispatched.
    pub fn sync(&mut self, state: &BrowserState) -> Option<u64> {
        let (seq, request) = state.latest_request()?;
        if seq <= self.dispatched {
            return None;
        }
        self.dispatched = seq;
        debug!(seq, endpoint = request.endpoint(), page = request.page, "dispatching request");

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = api.fetch(&request).await;
            let _ = tx.send(AppEvent::Fetched { seq, outcome });
        });
        Some(seq)
    }
}
