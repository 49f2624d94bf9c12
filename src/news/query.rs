use super::model::Category;
use url::Url;

/// Articles requested per page.
pub const PAGE_SIZE: u32 = 10;

/// Connection settings shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: String,
    pub lang: String,
    pub country: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://gnews.io/api/v4".into(),
            api_key: String::new(),
            lang: "en".into(),
            country: "us".into(),
        }
    }
}

/// The single filter that applies to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Category(Category),
    Search(String),
}

/// User-controlled query: category, search text and page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub category: Category,
    pub search: String,
    pub page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            category: Category::General,
            search: String::new(),
            page: 1,
        }
    }
}

impl QueryState {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    /// Non-empty search text wins over the category.
    pub fn filter(&self) -> Filter {
        let q = self.search.trim();
        if q.is_empty() {
            Filter::Category(self.category)
        } else {
            Filter::Search(q.to_string())
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.filter(), Filter::Search(_))
    }

    pub fn request(&self) -> NewsRequest {
        NewsRequest {
            filter: self.filter(),
            page: self.page.max(1),
        }
    }
}

/// One page of either top headlines or search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRequest {
    pub filter: Filter,
    pub page: u32,
}

impl NewsRequest {
    pub fn endpoint(&self) -> &'static str {
        match self.filter {
            Filter::Category(_) => "top-headlines",
            Filter::Search(_) => "search",
        }
    }

    pub fn to_url(&self, api: &ApiSettings) -> Result<Url, url::ParseError> {
        let base = api.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/{}", base, self.endpoint()))?;
        {
            let mut q = url.query_pairs_mut();
            match &self.filter {
                Filter::Category(c) => q.append_pair("category", c.as_str()),
                Filter::Search(text) => q.append_pair("q", text),
            };
            q.append_pair("lang", &api.lang)
                .append_pair("country", &api.country)
                .append_pair("max", &PAGE_SIZE.to_string())
                .append_pair("page", &self.page.to_string())
                .append_pair("apikey", &api.api_key);
        }
        Ok(url)
    }
}
