//! Intents understood by the browser reducer.

use crate::mvi::Intent;
use crate::news::{Category, ResultSet};

#[derive(Debug, Clone, PartialEq)]
pub enum BrowserIntent {
    /// Issue the initial request.
    Start,

    SelectCategory(Category),
    NextCategory,
    PreviousCategory,

    /// Move key input into the search box.
    FocusSearch,
    /// Return key input to browsing; the buffer is kept.
    Blur,
    /// Keystroke in the search box.
    SearchChar(char),
    SearchBackspace,
    /// Debounce timer fired with this buffer content.
    SearchSettled(String),
    /// Enter in the search box: commit the buffer right away.
    SubmitSearch,

    SetPage(u32),
    NextPage,
    PreviousPage,
    /// Open the jump-to-page prompt.
    BeginPageJump,
    PageJumpDigit(char),
    PageJumpBackspace,
    /// Apply the typed page number.
    SubmitPageJump,

    SelectNext,
    SelectPrevious,
    ToggleView,
    Quit,

    /// Response for request `seq` arrived.
    FetchSucceeded { seq: u64, results: ResultSet },
    /// Request `seq` failed; the error itself is logged by the runtime.
    FetchFailed { seq: u64 },
}

impl Intent for BrowserIntent {}
