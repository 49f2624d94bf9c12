//! Reducer for the article browser.

use crate::mvi::Reducer;

use super::intent::BrowserIntent;
use super::state::{BrowserState, Focus};

/// Longest page number the jump prompt accepts.
const MAX_PAGE_DIGITS: usize = 6;

pub struct BrowserReducer;

impl Reducer for BrowserReducer {
    type State = BrowserState;
    type Intent = BrowserIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            BrowserIntent::Start => {
                if state.request_seq == 0 {
                    state.issue()
                } else {
                    state
                }
            }

            BrowserIntent::SelectCategory(category) => select_category(state, category),
            BrowserIntent::NextCategory => {
                let next = state.query.category.next();
                select_category(state, next)
            }
            BrowserIntent::PreviousCategory => {
                let previous = state.query.category.previous();
                select_category(state, previous)
            }

            BrowserIntent::FocusSearch => BrowserState {
                focus: Focus::Search,
                ..state
            },
            BrowserIntent::Blur => BrowserState {
                focus: Focus::Browse,
                ..state
            },
            BrowserIntent::SearchChar(c) => {
                let mut state = state;
                if state.focus == Focus::Search && !c.is_control() {
                    state.search_input.push(c);
                }
                state
            }
            BrowserIntent::SearchBackspace => {
                let mut state = state;
                if state.focus == Focus::Search {
                    state.search_input.pop();
                }
                state
            }
            BrowserIntent::SearchSettled(text) => {
                // A settle for text the user has since changed or cleared is stale.
                if text == state.search_input {
                    commit_search(state, text)
                } else {
                    state
                }
            }
            BrowserIntent::SubmitSearch => {
                let text = state.search_input.clone();
                let mut state = commit_search(state, text);
                state.focus = Focus::Browse;
                state
            }

            BrowserIntent::SetPage(page) => set_page(state, page),
            BrowserIntent::NextPage => {
                let page = state.query.page;
                if page < state.page_count() {
                    set_page(state, page + 1)
                } else {
                    state
                }
            }
            BrowserIntent::PreviousPage => {
                let page = state.query.page;
                if page > 1 {
                    set_page(state, page - 1)
                } else {
                    state
                }
            }
            BrowserIntent::BeginPageJump => BrowserState {
                focus: Focus::PageJump(String::new()),
                ..state
            },
            BrowserIntent::PageJumpDigit(d) => {
                let mut state = state;
                if let Focus::PageJump(buf) = &mut state.focus {
                    if d.is_ascii_digit() && buf.len() < MAX_PAGE_DIGITS {
                        buf.push(d);
                    }
                }
                state
            }
            BrowserIntent::PageJumpBackspace => {
                let mut state = state;
                if let Focus::PageJump(buf) = &mut state.focus {
                    buf.pop();
                }
                state
            }
            BrowserIntent::SubmitPageJump => {
                let mut state = state;
                let typed = match std::mem::take(&mut state.focus) {
                    Focus::PageJump(buf) => buf.parse::<u32>().ok(),
                    other => {
                        state.focus = other;
                        return state;
                    }
                };
                match typed {
                    Some(page) if page > 0 => set_page(state, page),
                    _ => state,
                }
            }

            BrowserIntent::SelectNext => {
                let mut state = state;
                let len = state.results.articles.len();
                state.selected = match (state.selected, len) {
                    (_, 0) => None,
                    (None, _) => Some(0),
                    (Some(i), len) => Some((i + 1).min(len - 1)),
                };
                state
            }
            BrowserIntent::SelectPrevious => {
                let mut state = state;
                let len = state.results.articles.len();
                state.selected = match (state.selected, len) {
                    (_, 0) => None,
                    (None, _) => Some(0),
                    (Some(i), _) => Some(i.saturating_sub(1)),
                };
                state
            }
            BrowserIntent::ToggleView => {
                let view = state.view.toggled();
                BrowserState { view, ..state }
            }
            BrowserIntent::Quit => BrowserState {
                quit: true,
                ..state
            },

            BrowserIntent::FetchSucceeded { seq, results } => {
                if seq != state.request_seq {
                    return state;
                }
                let shown = Some(state.query.clone());
                BrowserState {
                    results,
                    shown,
                    loading: false,
                    selected: None,
                    ..state
                }
            }
            BrowserIntent::FetchFailed { seq } => {
                if seq != state.request_seq {
                    return state;
                }
                // Point the query back at what is still on screen.
                let query = state.shown.clone().unwrap_or(state.query);
                BrowserState {
                    query,
                    loading: false,
                    ..state
                }
            }
        }
    }
}

/// Selecting a category leaves search mode and starts over at page 1.
fn select_category(mut state: BrowserState, category: crate::news::Category) -> BrowserState {
    let unchanged =
        !state.query.is_searching() && state.query.category == category && state.query.page == 1;
    state.search_input.clear();
    state.focus = Focus::Browse;
    if unchanged && state.is_settled() {
        return state;
    }
    state.query.category = category;
    state.query.search.clear();
    state.query.page = 1;
    state.selected = None;
    state.issue()
}

fn commit_search(mut state: BrowserState, text: String) -> BrowserState {
    let text = text.trim();
    if text == state.query.search && state.is_settled() {
        return state;
    }
    state.query.search = text.to_string();
    state.query.page = 1;
    state.selected = None;
    state.issue()
}

fn set_page(mut state: BrowserState, page: u32) -> BrowserState {
    let count = state.page_count();
    let target = if count > 0 {
        page.clamp(1, count)
    } else {
        page.max(1)
    };
    if target == state.query.page && state.is_settled() {
        return state;
    }
    state.query.page = target;
    state.selected = None;
    state.issue()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::state::ViewMode;
    use crate::news::{Article, Category, Filter, NewsRequest, ResultSet};

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                title: format!("story {}", i),
                ..Article::default()
            })
            .collect()
    }

    fn results(n: usize, total: u64) -> ResultSet {
        ResultSet {
            articles: articles(n),
            total,
        }
    }

    fn reduce_all(state: BrowserState, intents: Vec<BrowserIntent>) -> BrowserState {
        intents.into_iter().fold(state, BrowserReducer::reduce)
    }

    /// Started browser with one page of results loaded.
    fn loaded(total: u64) -> BrowserState {
        let state = BrowserReducer::reduce(BrowserState::default(), BrowserIntent::Start);
        let seq = state.request_seq;
        BrowserReducer::reduce(
            state,
            BrowserIntent::FetchSucceeded {
                seq,
                results: results(10.min(total as usize), total),
            },
        )
    }

    fn latest(state: &BrowserState) -> NewsRequest {
        state.latest_request().expect("request issued").1
    }

    #[test]
    fn start_issues_general_headlines() {
        let state = BrowserReducer::reduce(BrowserState::default(), BrowserIntent::Start);
        assert!(state.loading);
        assert_eq!(state.request_seq, 1);
        assert_eq!(
            latest(&state),
            NewsRequest {
                filter: Filter::Category(Category::General),
                page: 1
            }
        );

        let again = BrowserReducer::reduce(state.clone(), BrowserIntent::Start);
        assert_eq!(again, state);
    }

    #[test]
    fn every_category_requests_page_one() {
        for category in Category::ALL {
            let mut state = loaded(40);
            state = BrowserReducer::reduce(state, BrowserIntent::SetPage(3));
            state = BrowserReducer::reduce(state, BrowserIntent::SelectCategory(category));
            assert_eq!(
                latest(&state),
                NewsRequest {
                    filter: Filter::Category(category),
                    page: 1
                },
                "category {}",
                category
            );
        }
    }

    #[test]
    fn reselecting_active_category_is_a_noop() {
        let state = loaded(40);
        let seq = state.request_seq;
        let state = BrowserReducer::reduce(state, BrowserIntent::SelectCategory(Category::General));
        assert_eq!(state.request_seq, seq);
    }

    #[test]
    fn category_leaves_search_mode() {
        let state = reduce_all(
            loaded(40),
            vec![
                BrowserIntent::FocusSearch,
                BrowserIntent::SearchChar('a'),
                BrowserIntent::SubmitSearch,
                BrowserIntent::FocusSearch,
                BrowserIntent::SearchChar('b'),
                BrowserIntent::SelectCategory(Category::Health),
            ],
        );
        assert!(!state.is_searching());
        assert!(state.search_input.is_empty());
        assert_eq!(state.focus, Focus::Browse);
        assert_eq!(latest(&state).filter, Filter::Category(Category::Health));
    }

    #[test]
    fn keystrokes_do_not_issue_requests() {
        let state = loaded(40);
        let seq = state.request_seq;
        let state = reduce_all(
            state,
            vec![
                BrowserIntent::FocusSearch,
                BrowserIntent::SearchChar('r'),
                BrowserIntent::SearchChar('u'),
                BrowserIntent::SearchChar('s'),
                BrowserIntent::SearchChar('x'),
                BrowserIntent::SearchBackspace,
                BrowserIntent::SearchChar('t'),
            ],
        );
        assert_eq!(state.search_input, "rust");
        assert_eq!(state.request_seq, seq);
    }

    #[test]
    fn settled_search_issues_one_request() {
        let state = reduce_all(
            loaded(40),
            vec![
                BrowserIntent::SetPage(4),
                BrowserIntent::FocusSearch,
                BrowserIntent::SearchChar('a'),
                BrowserIntent::SearchChar('i'),
            ],
        );
        let seq = state.request_seq;
        let state = BrowserReducer::reduce(state, BrowserIntent::SearchSettled("ai".into()));
        assert_eq!(state.request_seq, seq + 1);
        assert_eq!(
            latest(&state),
            NewsRequest {
                filter: Filter::Search("ai".into()),
                page: 1
            }
        );
    }

    #[test]
    fn stale_settle_is_ignored() {
        let state = reduce_all(
            loaded(40),
            vec![BrowserIntent::FocusSearch, BrowserIntent::SearchChar('a')],
        );
        let seq = state.request_seq;
        let state = BrowserReducer::reduce(state, BrowserIntent::SearchSettled("ab".into()));
        assert_eq!(state.request_seq, seq);
        assert!(!state.is_searching());
    }

    #[test]
    fn clearing_search_returns_to_category() {
        let state = reduce_all(
            loaded(40),
            vec![
                BrowserIntent::SelectCategory(Category::Sports),
                BrowserIntent::FocusSearch,
                BrowserIntent::SearchChar('x'),
                BrowserIntent::SubmitSearch,
                BrowserIntent::FocusSearch,
                BrowserIntent::SearchBackspace,
                BrowserIntent::SearchSettled(String::new()),
            ],
        );
        assert_eq!(latest(&state).filter, Filter::Category(Category::Sports));
    }

    #[test]
    fn page_change_keeps_filter() {
        let state = reduce_all(
            loaded(40),
            vec![
                BrowserIntent::FocusSearch,
                BrowserIntent::SearchChar('e'),
                BrowserIntent::SearchChar('u'),
                BrowserIntent::SubmitSearch,
            ],
        );
        let seq = state.request_seq;
        let state = BrowserReducer::reduce(
            state,
            BrowserIntent::FetchSucceeded {
                seq,
                results: results(10, 35),
            },
        );
        let state = BrowserReducer::reduce(state, BrowserIntent::SetPage(3));
        assert_eq!(
            latest(&state),
            NewsRequest {
                filter: Filter::Search("eu".into()),
                page: 3
            }
        );
    }

    #[test]
    fn page_is_clamped_and_same_page_is_noop() {
        let state = loaded(23);
        let seq = state.request_seq;

        let same = BrowserReducer::reduce(state.clone(), BrowserIntent::SetPage(1));
        assert_eq!(same.request_seq, seq);

        let clamped = BrowserReducer::reduce(state.clone(), BrowserIntent::SetPage(99));
        assert_eq!(clamped.query.page, 3);

        let prev = BrowserReducer::reduce(state, BrowserIntent::PreviousPage);
        assert_eq!(prev.request_seq, seq);
    }

    #[test]
    fn next_page_stops_at_last() {
        let state = reduce_all(loaded(23), vec![BrowserIntent::SetPage(3)]);
        let seq = state.request_seq;
        let state = BrowserReducer::reduce(state, BrowserIntent::NextPage);
        assert_eq!(state.request_seq, seq);
        assert_eq!(state.query.page, 3);
    }

    #[test]
    fn page_jump_applies_typed_number() {
        let state = reduce_all(
            loaded(95),
            vec![
                BrowserIntent::BeginPageJump,
                BrowserIntent::PageJumpDigit('7'),
                BrowserIntent::PageJumpDigit('x'),
                BrowserIntent::SubmitPageJump,
            ],
        );
        assert_eq!(state.focus, Focus::Browse);
        assert_eq!(latest(&state).page, 7);
    }

    #[test]
    fn empty_page_jump_changes_nothing() {
        let state = loaded(95);
        let seq = state.request_seq;
        let state = reduce_all(
            state,
            vec![BrowserIntent::BeginPageJump, BrowserIntent::SubmitPageJump],
        );
        assert_eq!(state.request_seq, seq);
        assert_eq!(state.focus, Focus::Browse);
    }

    #[test]
    fn failure_keeps_previous_results() {
        let before = reduce_all(loaded(40), vec![BrowserIntent::SetPage(2)]);
        let seq = before.request_seq;
        let after = BrowserReducer::reduce(before.clone(), BrowserIntent::FetchFailed { seq });
        assert_eq!(after.results, before.results);
        assert!(!after.loading);
    }

    fn fail_latest(state: BrowserState) -> BrowserState {
        let seq = state.request_seq;
        BrowserReducer::reduce(state, BrowserIntent::FetchFailed { seq })
    }

    #[test]
    fn failed_category_can_be_retried() {
        let business = BrowserIntent::SelectCategory(Category::Business);
        let state = fail_latest(BrowserReducer::reduce(loaded(40), business.clone()));
        assert_eq!(state.query.category, Category::General);

        let seq = state.request_seq;
        let state = BrowserReducer::reduce(state, business);
        assert_eq!(state.request_seq, seq + 1);
        assert_eq!(latest(&state).filter, Filter::Category(Category::Business));
    }

    #[test]
    fn failed_page_leaves_pager_on_displayed_page() {
        let state = fail_latest(BrowserReducer::reduce(loaded(40), BrowserIntent::SetPage(2)));
        assert_eq!(state.query.page, 1);

        let seq = state.request_seq;
        let retry = BrowserReducer::reduce(state.clone(), BrowserIntent::SetPage(2));
        assert_eq!(retry.request_seq, seq + 1);
        assert_eq!(latest(&retry).page, 2);

        let next = BrowserReducer::reduce(state, BrowserIntent::NextPage);
        assert_eq!(latest(&next).page, 2);
    }

    #[test]
    fn failed_search_restores_displayed_query() {
        let state = reduce_all(
            loaded(40),
            vec![
                BrowserIntent::FocusSearch,
                BrowserIntent::SearchChar('x'),
                BrowserIntent::SubmitSearch,
            ],
        );
        let state = fail_latest(state);
        assert!(!state.is_searching());
        assert_eq!(state.search_input, "x");

        let seq = state.request_seq;
        let state = BrowserReducer::reduce(state, BrowserIntent::SubmitSearch);
        assert_eq!(state.request_seq, seq + 1);
        assert_eq!(latest(&state).filter, Filter::Search("x".into()));
    }

    #[test]
    fn first_load_failure_can_be_retried() {
        let state = BrowserReducer::reduce(BrowserState::default(), BrowserIntent::Start);
        let state = fail_latest(state);
        assert!(!state.loading);

        let state =
            BrowserReducer::reduce(state, BrowserIntent::SelectCategory(Category::General));
        assert_eq!(state.request_seq, 2);
        assert!(state.loading);
    }

    #[test]
    fn empty_submit_while_browsing_is_a_noop() {
        let state = reduce_all(loaded(40), vec![BrowserIntent::SetPage(3)]);
        let seq = state.request_seq;
        let state = reduce_all(
            state,
            vec![
                BrowserIntent::FocusSearch,
                BrowserIntent::SearchChar(' '),
                BrowserIntent::SubmitSearch,
                BrowserIntent::SearchSettled(" ".into()),
            ],
        );
        assert_eq!(state.request_seq, seq);
        assert_eq!(state.query.page, 3);
        assert_eq!(state.focus, Focus::Browse);
    }

    #[test]
    fn resubmitting_same_search_keeps_page() {
        let state = reduce_all(
            loaded(40),
            vec![
                BrowserIntent::FocusSearch,
                BrowserIntent::SearchChar('a'),
                BrowserIntent::SubmitSearch,
            ],
        );
        let seq = state.request_seq;
        let state = BrowserReducer::reduce(
            state,
            BrowserIntent::FetchSucceeded {
                seq,
                results: results(10, 35),
            },
        );
        let state = BrowserReducer::reduce(state, BrowserIntent::SetPage(2));
        let seq = state.request_seq;
        let state = reduce_all(
            state,
            vec![BrowserIntent::FocusSearch, BrowserIntent::SubmitSearch],
        );
        assert_eq!(state.request_seq, seq);
        assert_eq!(state.query.page, 2);
    }

    #[test]
    fn stale_response_is_discarded() {
        let state = reduce_all(
            loaded(40),
            vec![
                BrowserIntent::SelectCategory(Category::Business),
                BrowserIntent::SelectCategory(Category::Science),
            ],
        );
        let newest = state.request_seq;
        let state = BrowserReducer::reduce(
            state,
            BrowserIntent::FetchSucceeded {
                seq: newest,
                results: results(2, 2),
            },
        );
        let state = BrowserReducer::reduce(
            state,
            BrowserIntent::FetchSucceeded {
                seq: newest - 1,
                results: results(10, 80),
            },
        );
        assert_eq!(state.results.total, 2);
        assert!(!state.loading);
    }

    #[test]
    fn stale_failure_keeps_loading() {
        let state = reduce_all(
            loaded(40),
            vec![
                BrowserIntent::SelectCategory(Category::Business),
                BrowserIntent::SelectCategory(Category::Science),
            ],
        );
        let seq = state.request_seq - 1;
        let state = BrowserReducer::reduce(state, BrowserIntent::FetchFailed { seq });
        assert!(state.loading);
    }

    #[test]
    fn selection_moves_within_results() {
        let state = loaded(3);
        let state = reduce_all(
            state,
            vec![
                BrowserIntent::SelectNext,
                BrowserIntent::SelectNext,
                BrowserIntent::SelectNext,
                BrowserIntent::SelectNext,
            ],
        );
        assert_eq!(state.selected, Some(2));
        let state = BrowserReducer::reduce(state, BrowserIntent::SelectPrevious);
        assert_eq!(state.selected_article().unwrap().title, "story 1");
    }

    #[test]
    fn toggle_view_and_quit() {
        let state = reduce_all(
            BrowserState::new(Category::General, ViewMode::Cards),
            vec![BrowserIntent::ToggleView, BrowserIntent::Quit],
        );
        assert_eq!(state.view, ViewMode::Highlights);
        assert!(state.quit);
    }
}
