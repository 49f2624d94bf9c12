use std::thread;

use console::{Key, Term};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::news::ResultSet;

/// Everything the event loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Key(Key),
    /// Search buffer went quiet; tagged with the debouncer generation.
    SearchSettled { generation: u64, text: String },
    /// Outcome of the request tagged `seq`.
    Fetched {
        seq: u64,
        outcome: Result<ResultSet, FetchError>,
    },
    /// The terminal stopped delivering keys.
    InputClosed,
}

impl AppEvent {
    pub fn search_settled(generation: u64, text: String) -> Self {
        AppEvent::SearchSettled { generation, text }
    }
}

/// Read keys on a dedicated thread; `Term::read_key` blocks.
pub fn spawn_key_reader(tx: UnboundedSender<AppEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let term = Term::stdout();
        loop {
            match term.read_key() {
                Ok(key) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        debug!("event loop gone; key reader exiting");
                        break;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "failed to read key");
                    let _ = tx.send(AppEvent::InputClosed);
                    break;
                }
            }
        }
    })
}
