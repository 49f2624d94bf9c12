//! State of the article browser.

use std::str::FromStr;

use crate::mvi::UiState;
use crate::news::{Article, Category, NewsRequest, QueryState, ResultSet};

use super::pager::pages_for;

/// Which layout renders the result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Cards with image, source, title, clipped description, authors and date.
    #[default]
    Cards,
    /// Three-column "Top Headlines" grid showing title and description only.
    Highlights,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Cards => ViewMode::Highlights,
            ViewMode::Highlights => ViewMode::Cards,
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cards" | "card" | "grid" => Ok(ViewMode::Cards),
            "highlights" | "highlight" | "headlines" => Ok(ViewMode::Highlights),
            other => Err(format!("unknown view '{}' (expected cards or highlights)", other)),
        }
    }
}

/// Where key presses go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    /// Keys navigate categories, pages and cards.
    #[default]
    Browse,
    /// Keys edit the search buffer.
    Search,
    /// Keys edit a page number to jump to.
    PageJump(String),
}

/// Immutable snapshot of the browser.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrowserState {
    /// Committed query; the last issued request was built from it.
    pub query: QueryState,
    /// Query behind `results`; `None` until a request succeeds.
    pub shown: Option<QueryState>,
    /// Search box contents, updated on every keystroke.
    pub search_input: String,
    pub focus: Focus,
    pub view: ViewMode,
    pub results: ResultSet,
    /// Focused card index into `results.articles`.
    pub selected: Option<usize>,
    /// Set while the latest request is outstanding.
    pub loading: bool,
    /// Sequence number of the latest issued request; 0 before the first one.
    pub request_seq: u64,
    pub quit: bool,
}

impl UiState for BrowserState {}

impl BrowserState {
    pub fn new(category: Category, view: ViewMode) -> Self {
        Self {
            query: QueryState::new(category),
            view,
            ..Self::default()
        }
    }

    pub fn page_count(&self) -> u32 {
        pages_for(self.results.total)
    }

    /// The request tagged with `request_seq`, if one has been issued.
    pub fn latest_request(&self) -> Option<(u64, NewsRequest)> {
        (self.request_seq > 0).then(|| (self.request_seq, self.query.request()))
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.selected.and_then(|i| self.results.articles.get(i))
    }

    pub fn is_searching(&self) -> bool {
        self.query.is_searching()
    }

    /// Whether a request is in flight or its results are on screen.
    /// Otherwise re-selecting the current query retries it.
    pub(super) fn is_settled(&self) -> bool {
        self.request_seq > 0 && (self.loading || self.shown.is_some())
    }

    /// Start a new request for the current query.
    pub(super) fn issue(mut self) -> Self {
        self.request_seq += 1;
        self.loading = true;
        self
    }
}
