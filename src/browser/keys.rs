use console::Key;

use crate::news::Category;

use super::intent::BrowserIntent;
use super::state::Focus;

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Reduce(BrowserIntent),
    /// Search buffer changed; restart the debounce timer after reducing.
    Edit(BrowserIntent),
    /// Enter in the search box; cancel the debounce timer after reducing.
    Submit,
    OpenSelected,
}

pub fn command_for_key(focus: &Focus, key: Key) -> Option<Command> {
    match focus {
        Focus::Browse => browse_key(key),
        Focus::Search => search_key(key),
        Focus::PageJump(_) => page_jump_key(key),
    }
}

fn browse_key(key: Key) -> Option<Command> {
    let intent = match key {
        Key::Char('q') | Key::Char('Q') | Key::Escape => BrowserIntent::Quit,
        Key::Tab => BrowserIntent::NextCategory,
        Key::BackTab => BrowserIntent::PreviousCategory,
        Key::Char(c @ '1'..='7') => {
            let idx = c as usize - '1' as usize;
            BrowserIntent::SelectCategory(Category::ALL[idx])
        }
        Key::Char('/') | Key::Char('s') => BrowserIntent::FocusSearch,
        Key::ArrowRight | Key::PageDown | Key::Char('l') | Key::Char('n') => {
            BrowserIntent::NextPage
        }
        Key::ArrowLeft | Key::PageUp | Key::Char('h') | Key::Char('p') => {
            BrowserIntent::PreviousPage
        }
        Key::Char('g') => BrowserIntent::BeginPageJump,
        Key::ArrowDown | Key::Char('j') => BrowserIntent::SelectNext,
        Key::ArrowUp | Key::Char('k') => BrowserIntent::SelectPrevious,
        Key::Char('v') => BrowserIntent::ToggleView,
        Key::Enter | Key::Char('o') => return Some(Command::OpenSelected),
        _ => return None,
    };
    Some(Command::Reduce(intent))
}

fn search_key(key: Key) -> Option<Command> {
    match key {
        Key::Enter => Some(Command::Submit),
        Key::Escape | Key::Tab | Key::ArrowDown => Some(Command::Reduce(BrowserIntent::Blur)),
        Key::Backspace => Some(Command::Edit(BrowserIntent::SearchBackspace)),
        Key::Char(c) if !c.is_control() => Some(Command::Edit(BrowserIntent::SearchChar(c))),
        _ => None,
    }
}

fn page_jump_key(key: Key) -> Option<Command> {
    let intent = match key {
        Key::Enter => BrowserIntent::SubmitPageJump,
        Key::Escape => BrowserIntent::Blur,
        Key::Backspace => BrowserIntent::PageJumpBackspace,
        Key::Char(c) if c.is_ascii_digit() => BrowserIntent::PageJumpDigit(c),
        _ => return None,
    };
    Some(Command::Reduce(intent))
}
