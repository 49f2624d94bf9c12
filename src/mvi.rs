//! Model-View-Intent primitives.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! State is an immutable snapshot, intents are user actions or system events
//! (key presses, settled timers, API responses), and the reducer is the only
//! place a state transition happens.

/// Snapshot holding everything the view needs to draw.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// User action or system event fed to a reducer.
pub trait Intent: Send + 'static {}

/// Pure transition function: `(State, Intent) -> State`.
///
/// Reducers never perform I/O. The runtime compares the new state with the
/// old one to decide which effects to run.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
