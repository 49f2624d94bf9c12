mod fetch;
mod model;
mod query;

pub use fetch::{MAX_BODY_BYTES, NewsClient};
pub use model::{ApiResponse, Article, Author, Category, ResultSet, Source, UnknownCategory};
pub use query::{ApiSettings, Filter, NewsRequest, PAGE_SIZE, QueryState};

use crate::error::Result;
use std::future::Future;

/// Anything that can answer a [`NewsRequest`] with one page of results.
pub trait NewsApi {
    fn fetch(&self, request: &NewsRequest) -> impl Future<Output = Result<ResultSet>> + Send;
}
