//! Terminal browser for a news API: category-filtered top headlines,
//! debounced keyword search, pagination, and two article layouts.

pub mod browser;
pub mod config;
pub mod error;
pub mod logging;
pub mod mvi;
pub mod news;
pub mod open_url;
pub mod ui;
pub mod util;
