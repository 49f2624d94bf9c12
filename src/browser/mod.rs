//! The article browser: state, reducer, and the event loop that runs the
//! effects (requests, the search debounce timer, opening articles).

mod debounce;
mod events;
mod intent;
mod keys;
mod orchestrator;
pub mod pager;
mod reducer;
mod state;

pub use debounce::Debouncer;
pub use events::{AppEvent, spawn_key_reader};
pub use intent::BrowserIntent;
pub use keys::{Command, command_for_key};
pub use orchestrator::FetchOrchestrator;
pub use reducer::BrowserReducer;
pub use state::{BrowserState, Focus, ViewMode};

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use console::Term;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::mvi::Reducer;
use crate::news::{Category, NewsApi, NewsClient};
use crate::open_url::open_url;
use crate::ui;

#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub category: Category,
    pub view: ViewMode,
    pub debounce: Duration,
    pub open_command: Option<String>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            category: Category::General,
            view: ViewMode::Cards,
            debounce: Duration::from_millis(500),
            open_command: None,
        }
    }
}

impl From<&RuntimeConfig> for BrowserOptions {
    fn from(cfg: &RuntimeConfig) -> Self {
        Self {
            category: cfg.category,
            view: cfg.view,
            debounce: cfg.debounce,
            open_command: cfg.open_command.clone(),
        }
    }
}

/// Owns the state and applies events to it.
pub struct Browser<A> {
    state: BrowserState,
    fetcher: FetchOrchestrator<A>,
    debouncer: Debouncer<String, AppEvent>,
    open_command: Option<String>,
}

impl<A> Browser<A>
where
    A: NewsApi + Send + Sync + 'static,
{
    pub fn new(api: Arc<A>, tx: UnboundedSender<AppEvent>, options: BrowserOptions) -> Self {
        Self {
            state: BrowserState::new(options.category, options.view),
            fetcher: FetchOrchestrator::new(api, tx.clone()),
            debouncer: Debouncer::new(options.debounce, tx, AppEvent::search_settled),
            open_command: options.open_command,
        }
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn start(&mut self) {
        self.apply(BrowserIntent::Start);
    }

    /// Apply one event. Returns `false` once the browser should exit.
    pub fn handle(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Key(key) => {
                if let Some(cmd) = command_for_key(&self.state.focus, key) {
                    self.run_command(cmd);
                }
            }
            AppEvent::SearchSettled { generation, text } => {
                if self.debouncer.is_current(generation) {
                    self.apply(BrowserIntent::SearchSettled(text));
                } else {
                    debug!(generation, "dropping superseded search");
                }
            }
            AppEvent::Fetched { seq, outcome } => match outcome {
                Ok(results) => {
                    if seq == self.state.request_seq {
                        info!(
                            seq,
                            articles = results.articles.len(),
                            total = results.total,
                            "results updated"
                        );
                    } else {
                        debug!(seq, latest = self.state.request_seq, "discarding stale response");
                    }
                    self.apply(BrowserIntent::FetchSucceeded { seq, results });
                }
                Err(err) => {
                    warn!(seq, error = %err, "news request failed; keeping previous results");
                    self.apply(BrowserIntent::FetchFailed { seq });
                }
            },
            AppEvent::InputClosed => {
                info!("terminal input closed");
                return false;
            }
        }
        !self.state.quit
    }

    fn run_command(&mut self, cmd: Command) {
        match cmd {
            Command::Reduce(intent) => {
                let leaves_search = matches!(
                    intent,
                    BrowserIntent::SelectCategory(_)
                        | BrowserIntent::NextCategory
                        | BrowserIntent::PreviousCategory
                );
                self.apply(intent);
                if leaves_search {
                    self.debouncer.cancel();
                }
            }
            Command::Edit(intent) => {
                let before = self.state.search_input.clone();
                self.apply(intent);
                if self.state.search_input != before {
                    self.debouncer.schedule(self.state.search_input.clone());
                }
            }
            Command::Submit => {
                self.debouncer.cancel();
                self.apply(BrowserIntent::SubmitSearch);
            }
            Command::OpenSelected => self.open_selected(),
        }
    }

    fn apply(&mut self, intent: BrowserIntent) {
        let state = std::mem::take(&mut self.state);
        self.state = BrowserReducer::reduce(state, intent);
        self.fetcher.sync(&self.state);
    }

    fn open_selected(&self) {
        let Some(article) = self.state.selected_article() else {
            return;
        };
        if article.url.is_empty() {
            debug!(title = %article.title, "article has no url");
            return;
        }
        if let Err(err) = open_url(&article.url, self.open_command.as_deref()) {
            warn!(error = %err, url = %article.url, "failed to open article");
        }
    }
}

/// Restores the cursor however the loop exits.
struct CursorGuard<'a>(&'a Term);

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        let _ = self.0.show_cursor();
    }
}

pub async fn run(cfg: &RuntimeConfig) -> Result<()> {
    let client = Arc::new(NewsClient::new(cfg.api.clone(), cfg.timeout)?);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut browser = Browser::new(client, tx.clone(), BrowserOptions::from(cfg));

    let term = Term::stdout();
    let _ = term.hide_cursor();
    let _guard = CursorGuard(&term);
    let _reader = spawn_key_reader(tx);

    info!(category = %cfg.category, "browser started");
    browser.start();
    ui::draw(&term, browser.state(), cfg.header.as_deref())?;

    while let Some(event) = rx.recv().await {
        if !browser.handle(event) {
            break;
        }
        ui::draw(&term, browser.state(), cfg.header.as_deref())?;
    }

    let _ = term.clear_screen();
    info!("browser closed");
    Ok(())
}
